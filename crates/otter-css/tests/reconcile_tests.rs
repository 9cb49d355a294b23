//! Integration tests for the stylesheet reconciler.

use otter_css::{RuleList, SheetOp, StyleError, StyleNode, StyleSheet, apply, reconcile};
use serde_json::json;

fn node(value: serde_json::Value) -> StyleNode {
    StyleNode::try_from(value).unwrap()
}

fn sheet(records: &[(&str, &str)]) -> StyleSheet {
    let mut sheet = StyleSheet::new();
    for (selector, block) in records {
        sheet.append(selector, block);
    }
    sheet
}

fn append(selector: &str, block: &str) -> SheetOp {
    SheetOp::Append {
        selector: selector.to_owned(),
        block: block.to_owned(),
    }
}

#[test]
fn test_empty_description_is_a_no_op() {
    let sheet = sheet(&[(".X", "width: 10px;")]);
    assert!(reconcile(".X", &StyleNode::new(), sheet.rules()).is_empty());
    assert!(reconcile(".X", &node(json!({ ":hover": {} })), sheet.rules()).is_empty());
}

#[test]
fn test_merge_keeps_untouched_properties() {
    let mut sheet = sheet(&[(".X", "width: 10px; color: red;")]);
    let ops = reconcile(".X", &node(json!({ "color": "blue" })), sheet.rules());
    assert_eq!(
        ops,
        vec![
            SheetOp::RemoveAt { index: 0 },
            append(".X", "width: 10px; color: blue;"),
        ]
    );

    apply(&ops, &mut sheet).unwrap();
    assert_eq!(sheet.to_css(), ".X { width: 10px; color: blue; }");
}

#[test]
fn test_new_rules_are_appended() {
    let sheet = sheet(&[(".X", "width: 10px;")]);
    let ops = reconcile(
        ".X",
        &node(json!({ ":focus": { "outline": "none" } })),
        sheet.rules(),
    );
    assert_eq!(ops, vec![append(".X:focus", "outline: none;")]);
}

#[test]
fn test_updated_rule_moves_to_end() {
    let mut sheet = sheet(&[(".X", "a: 1;"), (".Y", "b: 2;")]);
    let ops = reconcile(".X", &node(json!({ "a": "3" })), sheet.rules());
    apply(&ops, &mut sheet).unwrap();
    assert_eq!(sheet.to_css(), ".Y { b: 2; }\n.X { a: 3; }");
}

#[test]
fn test_plain_and_media_rules_do_not_collide() {
    let mut sheet = sheet(&[
        (".X", "color: red;"),
        ("@media print", ".X { color: black; }"),
    ]);
    let ops = reconcile(
        ".X",
        &node(json!({ "@media print": { "top": "0" } })),
        sheet.rules(),
    );
    assert_eq!(
        ops,
        vec![
            SheetOp::RemoveAt { index: 1 },
            append("@media print", ".X { color: black; top: 0; }"),
        ]
    );

    apply(&ops, &mut sheet).unwrap();
    assert_eq!(sheet.rules()[0].declarations()[0].value, "red");
}

#[test]
fn test_media_conditions_compare_exactly() {
    let sheet = sheet(&[("@media print", ".X { color: black; }")]);
    let ops = reconcile(
        ".X",
        &node(json!({ "@media screen": { "color": "white" } })),
        sheet.rules(),
    );
    assert_eq!(ops, vec![append("@media screen", ".X { color: white; }")]);
}

#[test]
fn test_indices_track_earlier_removals() {
    let mut sheet = sheet(&[
        (".X", "a: 1;"),
        (".X:hover", "b: 1;"),
        (".X:focus", "c: 1;"),
    ]);
    let ops = reconcile(
        ".X",
        &node(json!({ "a": "2", ":hover": { "b": "2" }, ":focus": { "c": "2" } })),
        sheet.rules(),
    );
    assert_eq!(
        ops,
        vec![
            SheetOp::RemoveAt { index: 0 },
            append(".X", "a: 2;"),
            SheetOp::RemoveAt { index: 0 },
            append(".X:hover", "b: 2;"),
            SheetOp::RemoveAt { index: 0 },
            append(".X:focus", "c: 2;"),
        ]
    );

    apply(&ops, &mut sheet).unwrap();
    assert_eq!(
        sheet.to_css(),
        ".X { a: 2; }\n.X:hover { b: 2; }\n.X:focus { c: 2; }"
    );
}

#[test]
fn test_keyframes_are_never_matched() {
    let sheet = sheet(&[("@keyframes spin", "from { top: 0; }"), (".X", "a: 1;")]);
    let ops = reconcile(".X", &node(json!({ "a": "2" })), sheet.rules());
    assert_eq!(ops[0], SheetOp::RemoveAt { index: 1 });
}

#[test]
fn test_reconcile_does_not_touch_inputs() {
    let sheet = sheet(&[(".X", "a: 1;")]);
    let input = node(json!({ "a": "2" }));
    let before = (sheet.clone(), input.clone());
    let _ = reconcile(".X", &input, sheet.rules());
    assert_eq!((sheet, input), before);
}

#[test]
fn test_apply_stops_at_bad_index() {
    let mut sheet = sheet(&[(".X", "a: 1;")]);
    let ops = [
        append(".Y", "b: 1;"),
        SheetOp::RemoveAt { index: 5 },
        append(".Z", "c: 1;"),
    ];
    assert_eq!(
        apply(&ops, &mut sheet),
        Err(StyleError::IndexOutOfRange { index: 5, len: 2 })
    );
    assert_eq!(sheet.len(), 2);
}

#[test]
fn test_ops_serialize_tagged() {
    let ops = vec![SheetOp::RemoveAt { index: 0 }, append(".X", "a: 1;")];
    assert_eq!(
        serde_json::to_value(&ops).unwrap(),
        json!([
            { "op": "removeAt", "index": 0 },
            { "op": "append", "selector": ".X", "block": "a: 1;" }
        ])
    );
}
