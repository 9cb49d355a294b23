//! Key classification.
//!
//! Every key of a [`StyleNode`] falls into one of four classes, decided by the
//! key's spelling and whether its value is a leaf or a nested node:
//!
//! | key | value | class |
//! |---|---|---|
//! | `extend` | text | [`KeyKind::Extend`] |
//! | anything else | leaf | [`KeyKind::Property`] |
//! | starts with `@` | node | [`KeyKind::AtRule`] |
//! | anything else | node | [`KeyKind::Combinator`] |
//!
//! Combinator keys are normally `:hover`, `[attr]`, `.other`, `#id`, or a
//! leading whitespace / `>` / `+` / `~` combinator. They are appended to the
//! parent selector verbatim, so no descendant space is implied unless the key
//! itself starts with one.

use strum_macros::Display;

use crate::node::{Scalar, StyleNode, StyleValue};

/// The key that names another top-level entry to inherit from.
pub const EXTEND_KEY: &str = "extend";

/// [Media Queries Level 4 § 2](https://www.w3.org/TR/mediaqueries-4/#media)
///
/// The at-keyword of the one at-rule the compiler wraps rules in.
pub const MEDIA_KEYWORD: &str = "@media";

/// What an `@`-prefixed key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtRuleKind<'a> {
    /// `@media <condition>`; holds the trimmed condition text.
    Media(&'a str),
    /// Any other at-rule; holds the full key. Dropped by the compiler.
    Unsupported(&'a str),
}

/// The class of a single key, carrying the value it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum KeyKind<'a> {
    /// A declaration: the key is a property name.
    Property(&'a Scalar),
    /// A nested block whose selector is the parent selector plus the key.
    Combinator(&'a StyleNode),
    /// A nested block wrapped in an at-rule around the parent selector.
    AtRule(AtRuleKind<'a>, &'a StyleNode),
    /// Inheritance from the named top-level entry.
    Extend(&'a str),
}

/// Classify `key` given the value stored under it.
#[must_use]
pub fn classify<'a>(key: &'a str, value: &'a StyleValue) -> KeyKind<'a> {
    match value {
        StyleValue::Leaf(Scalar::Text(target)) if key == EXTEND_KEY => KeyKind::Extend(target),
        StyleValue::Leaf(scalar) => KeyKind::Property(scalar),
        StyleValue::Node(node) if key.starts_with('@') => {
            KeyKind::AtRule(classify_at_rule(key), node)
        }
        StyleValue::Node(node) => KeyKind::Combinator(node),
    }
}

/// [Media Queries Level 4 § 2.1](https://www.w3.org/TR/mediaqueries-4/#media-syntax)
///
/// Only `@media` followed by whitespace or `(` and a non-empty condition is
/// accepted; `@mediafoo` and a bare `@media` are unsupported.
fn classify_at_rule(key: &str) -> AtRuleKind<'_> {
    if let Some(rest) = key.strip_prefix(MEDIA_KEYWORD) {
        let separated = rest.starts_with(|c: char| c.is_whitespace() || c == '(');
        let condition = rest.trim();
        if separated && !condition.is_empty() {
            return AtRuleKind::Media(condition);
        }
    }
    AtRuleKind::Unsupported(key)
}
