//! `extend` resolution for top-level entries.
//!
//! An entry `{ extend: "base", ... }` inherits every key of the sibling entry
//! `base`. The merge is shallow and behaves like object spread
//! (`{ ...base, ...own }`):
//!
//! - base keys come first, in base order;
//! - an own key that collides keeps the base key's position but takes the own value;
//! - own-only keys follow in own order;
//! - nested blocks are inherited wholesale, never merged key by key.
//!
//! Chains resolve transitively: the extended entry is resolved before it is
//! merged, so `c → b → a` sees `a`'s keys too.

use std::collections::HashMap;

use crate::classify::{EXTEND_KEY, KeyKind, classify};
use crate::error::{Result, StyleError};
use crate::node::{StyleNode, StyleSheetDesc};

/// The entry named by a node's `extend` key, if any.
#[must_use]
pub fn extend_target(node: &StyleNode) -> Option<&str> {
    let value = node.get(EXTEND_KEY)?;
    match classify(EXTEND_KEY, value) {
        KeyKind::Extend(target) => Some(target),
        _ => None,
    }
}

/// Resolve every entry of `desc`, returning `(name, merged node)` in entry order.
///
/// # Errors
///
/// - [`StyleError::UnknownExtend`] if an entry extends a name not in `desc`.
/// - [`StyleError::ExtendCycle`] if a chain of `extend` keys loops.
///
/// The whole batch fails on the first error.
pub fn resolve_extends(desc: &StyleSheetDesc) -> Result<Vec<(String, StyleNode)>> {
    let mut resolved = HashMap::new();
    let mut entries = Vec::with_capacity(desc.len());

    for (name, node) in desc.iter() {
        let mut chain = Vec::new();
        let merged = resolve_entry(desc, name, node, &mut chain, &mut resolved)?;
        entries.push((name.to_owned(), merged));
    }

    Ok(entries)
}

fn resolve_entry<'a>(
    desc: &'a StyleSheetDesc,
    name: &'a str,
    node: &'a StyleNode,
    chain: &mut Vec<&'a str>,
    resolved: &mut HashMap<&'a str, StyleNode>,
) -> Result<StyleNode> {
    if let Some(done) = resolved.get(name) {
        return Ok(done.clone());
    }

    let Some(target) = extend_target(node) else {
        return Ok(node.clone());
    };

    if chain.contains(&name) {
        chain.push(name);
        return Err(StyleError::ExtendCycle {
            chain: chain.iter().map(ToString::to_string).collect(),
        });
    }

    let Some(base_node) = desc.get(target) else {
        return Err(StyleError::UnknownExtend {
            entry: name.to_owned(),
            target: target.to_owned(),
        });
    };

    chain.push(name);
    let base = resolve_entry(desc, target, base_node, chain, resolved)?;
    let _ = chain.pop();

    log::debug!(target: "otter::extend", "{name} extends {target}");
    let merged = merge_onto(base, node);
    let _ = resolved.insert(name, merged.clone());
    Ok(merged)
}

/// Spread `own` over `base`, dropping `own`'s `extend` key.
fn merge_onto(mut base: StyleNode, own: &StyleNode) -> StyleNode {
    for (key, value) in own.iter() {
        if matches!(classify(key, value), KeyKind::Extend(_)) {
            continue;
        }
        base.insert(key, value.clone());
    }
    base
}
