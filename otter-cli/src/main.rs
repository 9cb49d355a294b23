//! Otter CLI
//!
//! Compiles a JSON style description to CSS and prints the resulting sheet.
//!
//! - `otter styles.json` defines one class per top-level entry
//! - `otter --selector body base.json` compiles a single block under a fixed selector
//! - `otter styles.json --update changes.json` reconciles a second description
//!   against the first and prints the sheet after the update

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::LevelFilter;
use otter_common::names::{NameGenerator, RandomSuffix};
use otter_css::{
    ClassNames, RegistryOptions, RuleList, SheetRule, StyleBinding, StyleNode, StyleRegistry,
    StyleSheet, StyleSheetDesc,
};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Otter: nested style descriptions to CSS
#[derive(Parser, Debug)]
#[command(name = "otter")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compile a style description
    otter styles.json

    # Reproducible class names
    otter --seed 7 styles.json

    # Compile a block under a fixed selector
    otter --selector body base.json

    # Apply an update and print the reconciled sheet as JSON
    otter styles.json --update changes.json --json
"#)]
struct Cli {
    /// JSON style description
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Compile the input as one block under this selector instead of
    /// generating classes
    #[arg(short, long, value_name = "SELECTOR")]
    selector: Option<String>,

    /// JSON description reconciled against the input
    #[arg(short, long, value_name = "FILE")]
    update: Option<PathBuf>,

    /// Prefix for generated class names
    #[arg(long, default_value = "otter")]
    prefix: String,

    /// Seed for class-name suffixes
    #[arg(long)]
    seed: Option<u64>,

    /// Print class names and rules as JSON
    #[arg(long)]
    json: bool,

    /// Log more (-v debug, -vv trace); `RUST_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    class_names: Option<&'a ClassNames>,
    rules: &'a [SheetRule],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let names = cli.seed.map_or_else(RandomSuffix::new, RandomSuffix::seeded);
    let options = RegistryOptions {
        animation_prefix: format!("{}-animation", cli.prefix),
        class_prefix: cli.prefix.clone(),
    };
    let mut registry = StyleRegistry::with_options(StyleSheet::new(), names, options);

    let input = read_json(&cli.input)?;
    let class_names = match &cli.selector {
        Some(selector) => {
            compile_selector(&mut registry, selector, input, cli.update.as_deref())?;
            None
        }
        None => Some(compile_classes(
            &mut registry,
            input,
            cli.update.as_deref(),
        )?),
    };

    let sheet = registry.into_sheet();
    if cli.json {
        let report = Report {
            class_names: class_names.as_ref(),
            rules: sheet.rules(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(class_names.as_ref(), &sheet);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn compile_selector<S: RuleList, N: NameGenerator>(
    registry: &mut StyleRegistry<S, N>,
    selector: &str,
    input: serde_json::Value,
    update: Option<&Path>,
) -> Result<()> {
    let node = StyleNode::try_from(input).context("input is not a style block")?;
    registry.set_style(selector, &node);

    if let Some(path) = update {
        let node = StyleNode::try_from(read_json(path)?).context("update is not a style block")?;
        registry.update_selector(selector, &node)?;
    }
    Ok(())
}

/// Define the input's classes, then render the input with the update's
/// entries swapped in.
fn compile_classes<S: RuleList, N: NameGenerator>(
    registry: &mut StyleRegistry<S, N>,
    input: serde_json::Value,
    update: Option<&Path>,
) -> Result<ClassNames> {
    let desc = StyleSheetDesc::try_from(input).context("input is not a style description")?;
    let mut binding = StyleBinding::new();
    let class_names = binding.render(registry, &desc)?;

    let Some(path) = update else {
        return Ok(class_names);
    };

    let changes =
        StyleSheetDesc::try_from(read_json(path)?).context("update is not a style description")?;
    let mut next = desc;
    for (entry, node) in changes.iter() {
        if class_names.get(entry).is_none() {
            bail!("update names unknown entry '{entry}'");
        }
        next.insert(entry, node.clone());
    }

    Ok(binding.render(registry, &next)?)
}

fn print_report(class_names: Option<&ClassNames>, sheet: &StyleSheet) {
    if let Some(class_names) = class_names {
        println!("{}", "=== Class Names ===".bold());
        for (entry, class_name) in class_names.iter() {
            println!("{entry} {} {}", "->".dimmed(), class_name.cyan());
        }
        println!();
    }

    println!("{}", "=== Stylesheet ===".bold());
    println!("{} rules", sheet.len());
    if !sheet.is_empty() {
        println!("{}", sheet.to_css());
    }
}
