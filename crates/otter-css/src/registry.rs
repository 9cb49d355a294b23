//! The style registry: the entry point hosts call.
//!
//! A [`StyleRegistry`] owns the host's [`RuleList`] and a [`NameGenerator`].
//! `create_style` defines styles for the first time (compile and append
//! everything), `update_style` reconciles a changed description against what
//! the sheet already holds.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::animation::Animation;
use crate::compile::compile;
use crate::error::{Result, StyleError};
use crate::extend::{extend_target, resolve_extends};
use crate::node::{StyleNode, StyleSheetDesc};
use crate::reconcile::{apply, reconcile};
use crate::sheet::RuleList;
use otter_common::names::NameGenerator;

/// Prefixes for generated names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryOptions {
    /// Class names are `<class_prefix>-<entry>-<suffix>`.
    pub class_prefix: String,
    /// Animation names are `<animation_prefix>-<suffix>`.
    pub animation_prefix: String,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            class_prefix: "otter".to_owned(),
            animation_prefix: "otter-animation".to_owned(),
        }
    }
}

/// Generated class names, keyed by entry name, in entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassNames {
    entries: Vec<(String, String)>,
}

impl ClassNames {
    /// The class name generated for `entry`.
    #[must_use]
    pub fn get(&self, entry: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == entry)
            .map(|(_, class_name)| class_name.as_str())
    }

    /// Iterate over `(entry, class name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, class_name)| (name.as_str(), class_name.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ClassNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, class_name) in &self.entries {
            map.serialize_entry(name, class_name)?;
        }
        map.end()
    }
}

/// Top-level keys become part of a class name, so they must look like one:
/// an ASCII letter or `_`, then ASCII letters, digits, `-` or `_`.
///
/// # Errors
///
/// Returns [`StyleError::InvalidClassName`] naming `key` otherwise.
pub fn validate_class_name(key: &str) -> Result<()> {
    let mut chars = key.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(StyleError::InvalidClassName {
            key: key.to_owned(),
        })
    }
}

/// Compiles style descriptions into a host-owned sheet.
///
/// Calls must be serialized: reconciliation reads record indices from the
/// sheet and assumes nothing else touches it until the ops are applied.
#[derive(Debug)]
pub struct StyleRegistry<S, N> {
    sheet: S,
    names: N,
    options: RegistryOptions,
}

impl<S: RuleList, N: NameGenerator> StyleRegistry<S, N> {
    /// Create a registry with default options.
    #[must_use]
    pub fn new(sheet: S, names: N) -> Self {
        Self::with_options(sheet, names, RegistryOptions::default())
    }

    /// Create a registry with explicit options.
    #[must_use]
    pub const fn with_options(sheet: S, names: N, options: RegistryOptions) -> Self {
        Self {
            sheet,
            names,
            options,
        }
    }

    /// The sheet being written to.
    #[must_use]
    pub const fn sheet(&self) -> &S {
        &self.sheet
    }

    /// Give the sheet back to the host.
    #[must_use]
    pub fn into_sheet(self) -> S {
        self.sheet
    }

    /// The options names are generated with.
    #[must_use]
    pub const fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Define every entry of `desc` and append its rules.
    ///
    /// Each entry gets a class name `<prefix>-<entry>-<suffix>`; its
    /// `extend` is resolved, it is compiled against `.<class name>`, and the
    /// resulting rules are appended. Nothing is appended unless every entry
    /// validates, resolves and compiles.
    ///
    /// # Errors
    ///
    /// [`StyleError::InvalidClassName`], [`StyleError::UnknownExtend`] or
    /// [`StyleError::ExtendCycle`].
    pub fn create_style(&mut self, desc: &StyleSheetDesc) -> Result<ClassNames> {
        for (key, _) in desc.iter() {
            validate_class_name(key)?;
        }
        let resolved = resolve_extends(desc)?;

        let mut entries = Vec::with_capacity(resolved.len());
        let mut rules = Vec::new();
        for (key, node) in resolved {
            let class_name = format!("{}-{key}-{}", self.options.class_prefix, self.names.suffix());
            rules.extend(compile(&format!(".{class_name}"), &node));
            entries.push((key, class_name));
        }

        log::debug!(target: "otter::registry", "created {} classes, {} rules", entries.len(), rules.len());
        for rule in &rules {
            self.sheet.append(&rule.selector(), &rule.block());
        }

        Ok(ClassNames { entries })
    }

    /// Compile `node` under a fixed selector (`body`, `:root`, ...) and
    /// append the rules unconditionally.
    pub fn set_style(&mut self, selector: &str, node: &StyleNode) {
        for rule in compile(selector, node) {
            self.sheet.append(&rule.selector(), &rule.block());
        }
    }

    /// Reconcile the rules of a generated class with a new description.
    ///
    /// The description is taken as already resolved: there are no sibling
    /// entries to inherit from, so an `extend` at its top level is an error.
    ///
    /// # Errors
    ///
    /// [`StyleError::UnknownExtend`] if `node` still names an entry to
    /// extend (the sheet is left untouched), or a failing
    /// [`RuleList::remove_at`].
    pub fn update_style(&mut self, class_name: &str, node: &StyleNode) -> Result<()> {
        self.update_selector(&format!(".{class_name}"), node)
    }

    /// Reconcile the rules under an arbitrary selector with a new description.
    ///
    /// # Errors
    ///
    /// Same as [`StyleRegistry::update_style`].
    pub fn update_selector(&mut self, selector: &str, node: &StyleNode) -> Result<()> {
        if let Some(target) = extend_target(node) {
            return Err(StyleError::UnknownExtend {
                entry: selector.to_owned(),
                target: target.to_owned(),
            });
        }
        let ops = reconcile(selector, node, self.sheet.rules());
        apply(&ops, &mut self.sheet)
    }

    /// Append the `@keyframes` rule for `animation` under a generated name.
    ///
    /// Returns the value to use for the `animation` property.
    pub fn create_animation(&mut self, animation: &Animation) -> String {
        let name = format!("{}-{}", self.options.animation_prefix, self.names.suffix());
        let (selector, block) = animation.keyframes_rule(&name);
        self.sheet.append(&selector, &block);
        animation.shorthand(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_class_name() {
        for key in ["wrapper", "container2", "_private", "main-nav", "A_b"] {
            assert!(validate_class_name(key).is_ok(), "{key}");
        }
        for key in ["#", "", "1abc", "-x", "has space", "a.b", "ünicode"] {
            assert_eq!(
                validate_class_name(key),
                Err(StyleError::InvalidClassName { key: key.to_owned() }),
                "{key}"
            );
        }
    }

    #[test]
    fn test_default_options() {
        let options = RegistryOptions::default();
        assert_eq!(options.class_prefix, "otter");
        assert_eq!(options.animation_prefix, "otter-animation");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: RegistryOptions =
            serde_json::from_str(r#"{ "classPrefix": "app" }"#).unwrap();
        assert_eq!(options.class_prefix, "app");
        assert_eq!(options.animation_prefix, "otter-animation");
    }
}
