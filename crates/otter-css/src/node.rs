//! The nested style description model.
//!
//! A [`StyleNode`] maps keys to either a scalar leaf (a CSS property value)
//! or another node (a sub-selector or at-rule block). Keys keep their
//! insertion order, which decides rule and declaration order downstream.
//!
//! Descriptions usually arrive as JSON objects. The boundary stays
//! duck-typed: any object made of strings, numbers and objects converts,
//! anything else is rejected with [`StyleError::InvalidValue`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

use crate::error::{Result, StyleError};

/// Key reported when the value being converted is the description itself.
const ROOT_KEY: &str = "<root>";

/// A leaf value: what ends up on the right-hand side of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Text used as-is.
    Text(String),
    /// A number, printed the way a script engine stringifies it.
    Number(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write_number(f, *number),
        }
    }
}

/// [ECMA-262 § 6.1.6.1.20 Number::toString](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Shortest round-trip digits. Magnitudes in `[1e-6, 1e21)` print as plain
/// decimals (`1`, `0.5`, `0.000001`); anything outside switches to exponent
/// form with a signed exponent (`1e+21`, `1e-7`).
fn write_number(f: &mut fmt::Formatter<'_>, number: f64) -> fmt::Result {
    if number == 0.0 {
        // -0 prints as 0
        return f.write_str("0");
    }
    if number.is_infinite() {
        return f.write_str(if number > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if number.is_nan() || (1e-6..1e21).contains(&number.abs()) {
        return write!(f, "{number}");
    }

    let exponential = format!("{number:e}");
    match exponential.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exponential),
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// The value stored under a key of a [`StyleNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A property value.
    Leaf(Scalar),
    /// A nested block (selector suffix or at-rule).
    Node(StyleNode),
}

impl StyleValue {
    /// The scalar, if this value is a leaf.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Scalar> {
        match self {
            Self::Leaf(scalar) => Some(scalar),
            Self::Node(_) => None,
        }
    }

    /// The nested node, if this value is a block.
    #[must_use]
    pub const fn as_node(&self) -> Option<&StyleNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Node(node) => Some(node),
        }
    }
}

impl From<Scalar> for StyleValue {
    fn from(value: Scalar) -> Self {
        Self::Leaf(value)
    }
}

impl From<StyleNode> for StyleValue {
    fn from(value: StyleNode) -> Self {
        Self::Node(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Leaf(value.into())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Leaf(value.into())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Leaf(value.into())
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Leaf(value.into())
    }
}

/// An insertion-ordered mapping from keys to [`StyleValue`]s.
///
/// Setting an existing key replaces its value in place, like assigning to an
/// object property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleNode {
    entries: Vec<(String, StyleValue)>,
}

impl StyleNode {
    /// Create an empty node.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`StyleNode::insert`].
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, keeping the key's original position if it exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the node has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Self::new();
        for (key, value) in iter {
            node.insert(key, value);
        }
        node
    }
}

fn node_from_map(map: Map<String, Value>) -> Result<StyleNode> {
    let mut node = StyleNode::new();
    for (key, value) in map {
        let value = match value {
            Value::String(text) => StyleValue::Leaf(Scalar::Text(text)),
            Value::Number(number) => match number.as_f64() {
                Some(number) => StyleValue::Leaf(Scalar::Number(number)),
                None => return Err(StyleError::InvalidValue { key }),
            },
            Value::Object(child) => StyleValue::Node(node_from_map(child)?),
            Value::Null | Value::Bool(_) | Value::Array(_) => {
                return Err(StyleError::InvalidValue { key });
            }
        };
        node.insert(key, value);
    }
    Ok(node)
}

impl TryFrom<Value> for StyleNode {
    type Error = StyleError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => node_from_map(map),
            _ => Err(StyleError::InvalidValue {
                key: ROOT_KEY.to_owned(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for StyleNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(de::Error::custom)
    }
}

/// A top-level style description: entry names mapped to their nodes.
///
/// Entry names become part of generated class names, and entries may
/// `extend` one another by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheetDesc {
    entries: Vec<(String, StyleNode)>,
}

impl StyleSheetDesc {
    /// Create an empty description.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`StyleSheetDesc::insert`].
    #[must_use]
    pub fn entry(mut self, name: impl Into<String>, node: StyleNode) -> Self {
        self.insert(name, node);
        self
    }

    /// Set entry `name`, keeping its original position if it exists.
    pub fn insert(&mut self, name: impl Into<String>, node: StyleNode) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((name, node)),
        }
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StyleNode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, StyleNode)> for StyleSheetDesc {
    fn from_iter<I: IntoIterator<Item = (K, StyleNode)>>(iter: I) -> Self {
        let mut desc = Self::new();
        for (name, node) in iter {
            desc.insert(name, node);
        }
        desc
    }
}

impl TryFrom<Value> for StyleSheetDesc {
    type Error = StyleError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(StyleError::InvalidValue {
                key: ROOT_KEY.to_owned(),
            });
        };

        let mut desc = Self::new();
        for (name, value) in map {
            let Value::Object(child) = value else {
                return Err(StyleError::InvalidValue { key: name });
            };
            let node = node_from_map(child)?;
            desc.insert(name, node);
        }
        Ok(desc)
    }
}

impl<'de> Deserialize<'de> for StyleSheetDesc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_display_drops_trailing_zero() {
        assert_eq!(Scalar::from(1).to_string(), "1");
        assert_eq!(Scalar::from(0.5).to_string(), "0.5");
        assert_eq!(Scalar::from(-2.0).to_string(), "-2");
        assert_eq!(Scalar::from(-0.0).to_string(), "0");
    }

    #[test]
    fn test_number_display_switches_to_exponent_form() {
        assert_eq!(Scalar::from(0.000_001).to_string(), "0.000001");
        assert_eq!(Scalar::from(1e-7).to_string(), "1e-7");
        assert_eq!(Scalar::from(-1.5e-7).to_string(), "-1.5e-7");
        assert_eq!(Scalar::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Scalar::from(1e21).to_string(), "1e+21");
        assert_eq!(Scalar::from(1.25e22).to_string(), "1.25e+22");
        assert_eq!(Scalar::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Scalar::from(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut node = StyleNode::new().set("a", "1").set("b", "2");
        node.insert("a", "3");
        let keys: Vec<&str> = node.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(node.get("a"), Some(&StyleValue::from("3")));
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let node = StyleNode::try_from(json!({
            "width": "100px",
            ":hover": { "color": "red" },
            "opacity": 1
        }))
        .unwrap();
        let keys: Vec<&str> = node.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["width", ":hover", "opacity"]);
        assert!(node.get(":hover").and_then(StyleValue::as_node).is_some());
        assert_eq!(
            node.get("opacity").and_then(StyleValue::as_leaf),
            Some(&Scalar::Number(1.0))
        );
    }

    #[test]
    fn test_from_json_rejects_non_scalar_leaves() {
        let err = StyleNode::try_from(json!({ "a": { "b": true } })).unwrap_err();
        assert_eq!(err, StyleError::InvalidValue { key: "b".into() });

        let err = StyleNode::try_from(json!(["a"])).unwrap_err();
        assert_eq!(err, StyleError::InvalidValue { key: ROOT_KEY.into() });
    }

    #[test]
    fn test_sheet_desc_requires_object_entries() {
        let err = StyleSheetDesc::try_from(json!({ "wrapper": "red" })).unwrap_err();
        assert_eq!(err, StyleError::InvalidValue { key: "wrapper".into() });
    }

    #[test]
    fn test_deserialize_via_serde() {
        let desc: StyleSheetDesc =
            serde_json::from_str(r#"{ "b": { "x": 1 }, "a": { "y": "2" } }"#).unwrap();
        let names: Vec<&str> = desc.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
