//! Selector-tree compiler.
//!
//! Flattens a nested [`StyleNode`] into an ordered list of flat [`Rule`]s.
//!
//! The traversal is a FIFO worklist: nested blocks found while scanning a
//! node's keys are queued behind everything already pending and flattened
//! later. A node's own declarations are therefore emitted before any of its
//! descendants, and descendants come out in the order they were discovered.
//! The worklist only borrows the caller's node; nothing is written back.

use std::collections::VecDeque;

use serde::Serialize;

use crate::classify::{AtRuleKind, KeyKind, MEDIA_KEYWORD, classify};
use crate::node::StyleNode;
use crate::property::process_property;
use otter_common::warning::warn_once;

/// [CSSOM § 6.6 CSS Declarations](https://www.w3.org/TR/cssom-1/#css-declarations)
///
/// A single `property: value` pair with the property already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// CSS property name (kebab-case).
    pub property: String,
    /// Value text.
    pub value: String,
}

impl Declaration {
    /// Create a declaration.
    #[must_use]
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Where a compiled rule lands in the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleTarget {
    /// A plain style rule.
    Style {
        /// Selector text.
        selector: String,
    },
    /// A style rule wrapped in `@media <condition> { ... }`.
    Media {
        /// Media condition without the `@media` keyword.
        condition: String,
        /// Selector of the wrapped style rule.
        selector: String,
    },
}

/// One flat rule produced by [`compile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Selector and optional media wrapper.
    pub target: RuleTarget,
    /// Declarations in key discovery order. Never empty for compiled rules.
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Selector text handed to the stylesheet: the style selector, or
    /// `@media <condition>` for wrapped rules.
    #[must_use]
    pub fn selector(&self) -> String {
        match &self.target {
            RuleTarget::Style { selector } => selector.clone(),
            RuleTarget::Media { condition, .. } => format!("{MEDIA_KEYWORD} {condition}"),
        }
    }

    /// Selector of the style rule itself, ignoring any media wrapper.
    #[must_use]
    pub fn style_selector(&self) -> &str {
        match &self.target {
            RuleTarget::Style { selector } | RuleTarget::Media { selector, .. } => selector,
        }
    }

    /// The media condition, if this rule is wrapped.
    #[must_use]
    pub fn media_condition(&self) -> Option<&str> {
        match &self.target {
            RuleTarget::Style { .. } => None,
            RuleTarget::Media { condition, .. } => Some(condition),
        }
    }

    /// Block text handed to the stylesheet alongside [`Rule::selector`].
    ///
    /// `width: 100px; color: red;` for plain rules,
    /// `.x { color: red; }` for wrapped ones.
    #[must_use]
    pub fn block(&self) -> String {
        let block = declaration_block(&self.declarations);
        match &self.target {
            RuleTarget::Style { .. } => block,
            RuleTarget::Media { selector, .. } => braced(selector, &block),
        }
    }
}

/// [CSSOM § 6.6.1 Serializing a CSS declaration block](https://www.w3.org/TR/cssom-1/#serialize-a-css-declaration-block)
///
/// Declarations joined with `"; "` plus a trailing `;`, or the empty string.
#[must_use]
pub fn declaration_block(declarations: &[Declaration]) -> String {
    if declarations.is_empty() {
        return String::new();
    }
    let joined = declarations
        .iter()
        .map(|declaration| format!("{}: {}", declaration.property, declaration.value))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{joined};")
}

/// `prelude { block }`, collapsing to `prelude { }` when the block is empty.
pub(crate) fn braced(prelude: &str, block: &str) -> String {
    if block.is_empty() {
        format!("{prelude} {{ }}")
    } else {
        format!("{prelude} {{ {block} }}")
    }
}

/// A node waiting to be flattened.
struct Pending<'a> {
    selector: String,
    media: Option<String>,
    node: &'a StyleNode,
}

/// Nested `@media` blocks narrow the enclosing condition.
fn compose_media(outer: Option<&str>, inner: &str) -> String {
    match outer {
        Some(outer) => format!("{outer} and {inner}"),
        None => inner.to_owned(),
    }
}

/// Compile `node` rooted at `root_selector` into flat rules.
///
/// - Property keys become declarations of the current selector.
/// - Combinator keys queue a child under `selector + key`.
/// - `@media` keys queue a child under the same selector, wrapped in the
///   media condition. Combinators inside compose against the selector, not
///   the at-rule text.
/// - Other at-rules and stray `extend` keys are dropped with a warning.
///
/// A node with no declarations of its own emits no rule.
#[must_use]
pub fn compile(root_selector: &str, node: &StyleNode) -> Vec<Rule> {
    let mut queue = VecDeque::from([Pending {
        selector: root_selector.to_owned(),
        media: None,
        node,
    }]);
    let mut rules = Vec::new();

    while let Some(Pending {
        selector,
        media,
        node,
    }) = queue.pop_front()
    {
        let mut declarations = Vec::new();

        for (key, value) in node.iter() {
            let kind = classify(key, value);
            log::trace!(target: "otter::compile", "{selector}: '{key}' is {kind}");

            match kind {
                KeyKind::Property(scalar) => {
                    declarations.push(Declaration::new(process_property(key), scalar.to_string()));
                }
                KeyKind::Combinator(child) => queue.push_back(Pending {
                    selector: format!("{selector}{key}"),
                    media: media.clone(),
                    node: child,
                }),
                KeyKind::AtRule(AtRuleKind::Media(condition), child) => queue.push_back(Pending {
                    selector: selector.clone(),
                    media: Some(compose_media(media.as_deref(), condition)),
                    node: child,
                }),
                KeyKind::AtRule(AtRuleKind::Unsupported(name), _) => {
                    warn_once("CSS", &format!("unsupported at-rule '{name}' ignored"));
                }
                KeyKind::Extend(target) => {
                    warn_once(
                        "CSS",
                        &format!("'extend: {target}' under {selector} ignored; only top-level entries can extend"),
                    );
                }
            }
        }

        if declarations.is_empty() {
            continue;
        }

        let target = match media {
            Some(condition) => RuleTarget::Media {
                condition,
                selector,
            },
            None => RuleTarget::Style { selector },
        };
        rules.push(Rule {
            target,
            declarations,
        });
    }

    log::debug!(target: "otter::compile", "{root_selector}: {} rules", rules.len());
    rules
}
