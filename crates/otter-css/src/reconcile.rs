//! Incremental stylesheet reconciler.
//!
//! Given a class selector and a new description for it, [`reconcile`]
//! compiles the description and works out the add/remove operations that
//! bring a sheet in line with it:
//!
//! - a compiled rule with no counterpart in the sheet is appended;
//! - a compiled rule that matches a record is merged into it (new values win,
//!   properties only the old record had survive), the old record is removed
//!   and the merged rule is appended at the end.
//!
//! Updated rules therefore move to the end of the sheet, after anything that
//! was inserted later. Cascade order between overlapping selectors changes
//! accordingly; later rules win ties.
//!
//! Records are matched by a key: the selector for plain rules, the inner
//! selector followed by `@media <condition>` for media rules, so a plain rule
//! and a media rule with the same selector never collide. Conditions compare
//! as exact strings.

use std::collections::HashMap;

use serde::Serialize;

use crate::classify::MEDIA_KEYWORD;
use crate::compile::{Declaration, Rule, compile};
use crate::error::Result;
use crate::node::StyleNode;
use crate::sheet::{RuleList, SheetRule};

/// One mutation of a [`RuleList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SheetOp {
    /// Append a rule at the end.
    Append {
        /// Selector text (`@media ...` for wrapped rules).
        selector: String,
        /// Block text.
        block: String,
    },
    /// Remove the record at this index, counted at the time the op runs.
    RemoveAt {
        /// Record index.
        index: usize,
    },
}

impl SheetOp {
    fn append(rule: &Rule) -> Self {
        Self::Append {
            selector: rule.selector(),
            block: rule.block(),
        }
    }
}

/// Matching key for a style selector with an optional media condition.
#[must_use]
pub fn match_key(selector: &str, condition: Option<&str>) -> String {
    match condition {
        Some(condition) => format!("{selector}{MEDIA_KEYWORD} {condition}"),
        None => selector.to_owned(),
    }
}

impl Rule {
    /// Key used to find this rule's counterpart in a sheet.
    #[must_use]
    pub fn match_key(&self) -> String {
        match_key(self.style_selector(), self.media_condition())
    }
}

impl SheetRule {
    /// Key used to match this record against compiled rules; keyframes have none.
    #[must_use]
    pub fn match_key(&self) -> Option<String> {
        self.style()
            .map(|rule| match_key(&rule.selector, self.media_condition()))
    }
}

/// Merge `new` into `old` by property name.
///
/// Old properties keep their positions (taking the new value when both have
/// one); properties only `new` has follow in `new`'s order.
#[must_use]
pub fn merge_declarations(old: &[Declaration], new: &[Declaration]) -> Vec<Declaration> {
    let mut merged = old.to_vec();
    for declaration in new {
        match merged
            .iter_mut()
            .find(|existing| existing.property == declaration.property)
        {
            Some(existing) => existing.value.clone_from(&declaration.value),
            None => merged.push(declaration.clone()),
        }
    }
    merged
}

/// Work out the operations that sync `existing` with `node` compiled under
/// `class_selector`.
///
/// An empty compile result yields no operations. Indices in the returned
/// [`SheetOp::RemoveAt`]s account for the operations before them, so the ops
/// must be applied in order to the same, otherwise untouched, sheet.
#[must_use]
pub fn reconcile(class_selector: &str, node: &StyleNode, existing: &[SheetRule]) -> Vec<SheetOp> {
    let rules = compile(class_selector, node);
    if rules.is_empty() {
        log::debug!(target: "otter::reconcile", "{class_selector}: nothing to update");
        return Vec::new();
    }

    // Keys of the sheet as it will look once the ops emitted so far have run.
    let mut live: Vec<Option<String>> = existing.iter().map(SheetRule::match_key).collect();
    let mut known: HashMap<String, Vec<Declaration>> = existing
        .iter()
        .filter_map(|record| Some((record.match_key()?, record.declarations().to_vec())))
        .collect();

    let mut ops = Vec::new();

    for rule in rules {
        if rule.declarations.is_empty() {
            continue;
        }

        let key = rule.match_key();
        let index = live.iter().rposition(|k| k.as_deref() == Some(key.as_str()));

        let rule = match index {
            None => {
                log::trace!(target: "otter::reconcile", "append {key}");
                rule
            }
            Some(index) => {
                log::trace!(target: "otter::reconcile", "replace {key} at {index}");
                let old = known.get(&key).map_or(&[][..], Vec::as_slice);
                let declarations = merge_declarations(old, &rule.declarations);
                ops.push(SheetOp::RemoveAt { index });
                let _ = live.remove(index);
                Rule {
                    target: rule.target,
                    declarations,
                }
            }
        };

        ops.push(SheetOp::append(&rule));
        live.push(Some(key.clone()));
        let _ = known.insert(key, rule.declarations);
    }

    log::debug!(target: "otter::reconcile", "{class_selector}: {} ops", ops.len());
    ops
}

/// Run `ops` against `sheet` in order.
///
/// # Errors
///
/// Propagates the first failing [`RuleList::remove_at`]; ops before it
/// have already been applied.
pub fn apply<S: RuleList + ?Sized>(ops: &[SheetOp], sheet: &mut S) -> Result<()> {
    for op in ops {
        match op {
            SheetOp::Append { selector, block } => sheet.append(selector, block),
            SheetOp::RemoveAt { index } => sheet.remove_at(*index)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_key() {
        assert_eq!(match_key(".x", None), ".x");
        assert_eq!(match_key(".x", Some("print")), ".x@media print");
    }

    #[test]
    fn test_sheet_rule_match_keys() {
        let style = SheetRule::from_parts(".x", "a: 1;");
        let media = SheetRule::from_parts("@media print", ".x { a: 1; }");
        let keyframes = SheetRule::from_parts("@keyframes spin", "from { a: 1; }");
        assert_eq!(style.match_key().as_deref(), Some(".x"));
        assert_eq!(media.match_key().as_deref(), Some(".x@media print"));
        assert_eq!(keyframes.match_key(), None);
    }

    #[test]
    fn test_merge_declarations_order() {
        let old = [Declaration::new("width", "10px"), Declaration::new("color", "red")];
        let new = [Declaration::new("top", "0"), Declaration::new("color", "blue")];
        assert_eq!(
            merge_declarations(&old, &new),
            vec![
                Declaration::new("width", "10px"),
                Declaration::new("color", "blue"),
                Declaration::new("top", "0"),
            ]
        );
    }
}
