//! Integration tests for `extend` resolution.

use otter_css::{Rule, StyleError, StyleNode, StyleSheetDesc, compile, resolve_extends};
use serde_json::json;

fn desc(value: serde_json::Value) -> StyleSheetDesc {
    StyleSheetDesc::try_from(value).unwrap()
}

fn resolved(value: serde_json::Value) -> Vec<(String, StyleNode)> {
    resolve_extends(&desc(value)).unwrap()
}

fn blocks(rules: &[Rule]) -> Vec<(String, String)> {
    rules
        .iter()
        .map(|rule| (rule.selector(), rule.block()))
        .collect()
}

#[test]
fn test_own_keys_win() {
    let entries = resolved(json!({
        "A": { "x": 1, "y": 1 },
        "B": { "extend": "A", "x": 2 }
    }));
    let rules = compile(".b", &entries[1].1);
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].block(), "x: 2; y: 1;");
    assert!(entries[1].1.get("extend").is_none());
}

#[test]
fn test_inherits_nested_rules() {
    let entries = resolved(json!({
        "red": {
            "width": "100px",
            "backgroundColor": "red",
            ":hover": { "backgroundColor": "black" }
        },
        "blue": { "extend": "red", "backgroundColor": "blue" }
    }));
    assert_eq!(entries[0].0, "red");
    assert_eq!(entries[1].0, "blue");
    assert_eq!(
        blocks(&compile(".blue", &entries[1].1)),
        vec![
            (".blue".to_owned(), "width: 100px; background-color: blue;".to_owned()),
            (".blue:hover".to_owned(), "background-color: black;".to_owned()),
        ]
    );
}

#[test]
fn test_nested_blocks_replaced_not_merged() {
    let entries = resolved(json!({
        "a": { ":hover": { "color": "red", "top": "0" } },
        "b": { "extend": "a", ":hover": { "color": "blue" } }
    }));
    assert_eq!(
        blocks(&compile(".b", &entries[1].1)),
        vec![(".b:hover".to_owned(), "color: blue;".to_owned())]
    );
}

#[test]
fn test_chains_resolve_transitively() {
    let entries = resolved(json!({
        "c": { "extend": "b", "z": "3" },
        "b": { "extend": "a", "y": "2" },
        "a": { "x": "1" }
    }));
    assert_eq!(
        blocks(&compile(".c", &entries[0].1)),
        vec![(".c".to_owned(), "x: 1; y: 2; z: 3;".to_owned())]
    );
    assert_eq!(
        blocks(&compile(".b", &entries[1].1)),
        vec![(".b".to_owned(), "x: 1; y: 2;".to_owned())]
    );
}

#[test]
fn test_unknown_target() {
    let err = resolve_extends(&desc(json!({
        "red": { "backgroundColor": "red" },
        "blue": { "extend": "yellow", "backgroundColor": "blue" }
    })))
    .unwrap_err();
    assert_eq!(
        err,
        StyleError::UnknownExtend {
            entry: "blue".into(),
            target: "yellow".into(),
        }
    );
    assert_eq!(
        err.to_string(),
        "can't extend blue with yellow because yellow does not exist"
    );
}

#[test]
fn test_cycles_detected() {
    let err = resolve_extends(&desc(json!({
        "a": { "extend": "b" },
        "b": { "extend": "a" }
    })))
    .unwrap_err();
    assert_eq!(
        err,
        StyleError::ExtendCycle {
            chain: vec!["a".into(), "b".into(), "a".into()],
        }
    );

    let err = resolve_extends(&desc(json!({ "a": { "extend": "a", "x": "1" } }))).unwrap_err();
    assert!(matches!(err, StyleError::ExtendCycle { .. }));
}

#[test]
fn test_numeric_extend_is_a_property() {
    let entries = resolved(json!({ "a": { "extend": 1 } }));
    assert_eq!(
        blocks(&compile(".a", &entries[0].1)),
        vec![(".a".to_owned(), "extend: 1;".to_owned())]
    );
}

#[test]
fn test_input_left_untouched() {
    let input = desc(json!({
        "a": { "x": "1" },
        "b": { "extend": "a" }
    }));
    let before = input.clone();
    let _ = resolve_extends(&input).unwrap();
    assert_eq!(input, before);
    assert!(input.get("b").and_then(|b| b.get("extend")).is_some());
}
