//! The live stylesheet the compiler writes into.
//!
//! [CSSOM § 6.1 CSSStyleSheet](https://www.w3.org/TR/cssom-1/#the-cssstylesheet-interface)
//!
//! "A CSS style sheet is an abstract concept that represents a style sheet as
//! defined by the CSS specification."
//!
//! The host owns the sheet (one per document or rendering root) and hands it
//! to the registry. The core needs exactly three things from it, captured by
//! [`RuleList`]: a snapshot of the current records, append, and remove-at.
//! [`StyleSheet`] is an in-memory implementation.

use serde::Serialize;

use crate::classify::MEDIA_KEYWORD;
use crate::compile::{Declaration, braced, declaration_block};
use crate::error::{Result, StyleError};

/// [CSS Animations Level 1 § 3](https://www.w3.org/TR/css-animations-1/#keyframes)
///
/// The at-keyword of animation keyframe rules.
pub const KEYFRAMES_KEYWORD: &str = "@keyframes";

/// [CSSOM § 6.4.3 CSSStyleRule](https://www.w3.org/TR/cssom-1/#the-cssstylerule-interface)
///
/// A plain style rule as stored in a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRecord {
    /// "The selectorText attribute"
    pub selector: String,
    /// Declarations, one per property.
    pub declarations: Vec<Declaration>,
}

impl StyleRecord {
    /// Build a record from selector text and declaration block text.
    #[must_use]
    pub fn parse(selector: &str, block: &str) -> Self {
        Self {
            selector: selector.trim().to_owned(),
            declarations: parse_declarations(block),
        }
    }

    /// [CSSOM § 6.4.3](https://www.w3.org/TR/cssom-1/#serialize-a-css-rule)
    ///
    /// `selector { a: 1; b: 2; }`
    #[must_use]
    pub fn css_text(&self) -> String {
        braced(&self.selector, &declaration_block(&self.declarations))
    }
}

/// [CSSOM § 6.4 CSS Rules](https://www.w3.org/TR/cssom-1/#css-rules)
///
/// One record of a sheet's rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SheetRule {
    /// A plain style rule.
    Style(StyleRecord),
    /// [CSS Conditional Rules § 6.1 CSSMediaRule](https://www.w3.org/TR/css-conditional-3/#the-cssmediarule-interface)
    ///
    /// A media rule holding exactly one style rule.
    Media {
        /// "The media attribute": the condition without `@media`.
        condition: String,
        /// The wrapped style rule.
        rule: StyleRecord,
    },
    /// [CSS Animations § 6.2 CSSKeyframesRule](https://www.w3.org/TR/css-animations-1/#interface-csskeyframesrule)
    Keyframes {
        /// Animation name.
        name: String,
        /// Keyframe blocks as text (`from { top: 0px; } to { top: 10px; }`).
        body: String,
    },
}

impl SheetRule {
    /// [CSSOM § 6.4.2 insert a CSS rule](https://www.w3.org/TR/cssom-1/#insert-a-css-rule)
    ///
    /// Build the record that appending `selector` / `block` produces:
    /// `@media` selectors wrap the style rule spelled out in `block`
    /// (`.x { a: 1; }`), `@keyframes` selectors keep the block as text, and
    /// anything else is a plain rule whose block is a declaration list.
    #[must_use]
    pub fn from_parts(selector: &str, block: &str) -> Self {
        let selector = selector.trim();

        if let Some(condition) = selector.strip_prefix(MEDIA_KEYWORD) {
            let (inner_selector, inner_block) = split_block(block);
            return Self::Media {
                condition: condition.trim().to_owned(),
                rule: StyleRecord::parse(inner_selector, inner_block),
            };
        }

        if let Some(name) = selector.strip_prefix(KEYFRAMES_KEYWORD) {
            return Self::Keyframes {
                name: name.trim().to_owned(),
                body: block.trim().to_owned(),
            };
        }

        Self::Style(StyleRecord::parse(selector, block))
    }

    /// The style rule this record holds, if any.
    #[must_use]
    pub const fn style(&self) -> Option<&StyleRecord> {
        match self {
            Self::Style(rule) | Self::Media { rule, .. } => Some(rule),
            Self::Keyframes { .. } => None,
        }
    }

    /// The media condition, for media records.
    #[must_use]
    pub fn media_condition(&self) -> Option<&str> {
        match self {
            Self::Media { condition, .. } => Some(condition),
            Self::Style(_) | Self::Keyframes { .. } => None,
        }
    }

    /// Declarations of the held style rule (empty for keyframes).
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        match self.style() {
            Some(rule) => &rule.declarations,
            None => &[],
        }
    }

    /// [CSSOM § 6.4.1 cssText](https://www.w3.org/TR/cssom-1/#dom-cssrule-csstext)
    #[must_use]
    pub fn css_text(&self) -> String {
        match self {
            Self::Style(rule) => rule.css_text(),
            Self::Media { condition, rule } => {
                braced(&format!("{MEDIA_KEYWORD} {condition}"), &rule.css_text())
            }
            Self::Keyframes { name, body } => braced(&format!("{KEYFRAMES_KEYWORD} {name}"), body),
        }
    }
}

/// An ordered, host-owned collection of rules.
///
/// Records are only ever appended at the end or removed by index; nothing
/// reorders unrelated records. Callers must serialize access: an index read
/// from [`RuleList::rules`] is only valid until the next mutation.
pub trait RuleList {
    /// [CSSOM § 6.1 cssRules](https://www.w3.org/TR/cssom-1/#dom-cssstylesheet-cssrules)
    ///
    /// The current records, in order.
    fn rules(&self) -> &[SheetRule];

    /// [CSSOM § 6.1 addRule()](https://www.w3.org/TR/cssom-1/#dom-cssstylesheet-addrule)
    ///
    /// Append a rule built from selector text and block text.
    fn append(&mut self, selector: &str, block: &str);

    /// [CSSOM § 6.1 deleteRule()](https://www.w3.org/TR/cssom-1/#dom-cssstylesheet-deleterule)
    ///
    /// Remove the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::IndexOutOfRange`] if `index` is past the end.
    fn remove_at(&mut self, index: usize) -> Result<()>;
}

/// In-memory [`RuleList`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleSheet {
    rules: Vec<SheetRule>,
}

impl StyleSheet {
    /// Create an empty sheet.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the sheet holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> impl Iterator<Item = &SheetRule> {
        self.rules.iter()
    }

    /// Serialize the whole sheet, one record per line.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(SheetRule::css_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl RuleList for StyleSheet {
    fn rules(&self) -> &[SheetRule] {
        &self.rules
    }

    fn append(&mut self, selector: &str, block: &str) {
        self.rules.push(SheetRule::from_parts(selector, block));
    }

    fn remove_at(&mut self, index: usize) -> Result<()> {
        if index >= self.rules.len() {
            return Err(StyleError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        let _ = self.rules.remove(index);
        Ok(())
    }
}

/// Split `.x { a: 1; }` into `(".x", "a: 1;")`.
///
/// Text without braces is all selector.
fn split_block(text: &str) -> (&str, &str) {
    let Some(open) = text.find('{') else {
        return (text.trim(), "");
    };
    let selector = text[..open].trim();
    let rest = &text[open + 1..];
    let body = rest.rfind('}').map_or(rest, |close| &rest[..close]);
    (selector, body.trim())
}

/// [CSS Syntax § 5.3.8 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
///
/// A minimal reading of a declaration block: split on `;` and the first `:`,
/// ignoring separators inside quotes or parentheses (`url(data:...;...)`).
/// A repeated property keeps its first position and its last value.
#[must_use]
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    let mut declarations: Vec<Declaration> = Vec::new();

    for item in split_top_level(block, ';') {
        let Some(colon) = find_top_level(item, ':') else {
            continue;
        };
        let property = item[..colon].trim();
        let value = item[colon + 1..].trim();
        if property.is_empty() {
            continue;
        }

        match declarations.iter_mut().find(|d| d.property == property) {
            Some(existing) => value.clone_into(&mut existing.value),
            None => declarations.push(Declaration::new(property, value)),
        }
    }

    declarations
}

/// Byte offsets of `separator` outside quotes and parentheses.
fn top_level_positions(text: &str, separator: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if c == separator && depth == 0 => positions.push(i),
            _ => {}
        }
    }

    positions
}

fn find_top_level(text: &str, separator: char) -> Option<usize> {
    top_level_positions(text, separator).first().copied()
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for position in top_level_positions(text, separator) {
        parts.push(&text[start..position]);
        start = position + separator.len_utf8();
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations_basic() {
        let declarations = parse_declarations("width: 100px; background-color: red;");
        assert_eq!(
            declarations,
            vec![
                Declaration::new("width", "100px"),
                Declaration::new("background-color", "red"),
            ]
        );
    }

    #[test]
    fn test_parse_declarations_respects_parens_and_quotes() {
        let declarations = parse_declarations(
            "background: url(data:image/png;base64,AAA); content: \"a;b\"; font-family: 'x:y'",
        );
        assert_eq!(declarations.len(), 3);
        assert_eq!(declarations[0].value, "url(data:image/png;base64,AAA)");
        assert_eq!(declarations[1].value, "\"a;b\"");
        assert_eq!(declarations[2].value, "'x:y'");
    }

    #[test]
    fn test_parse_declarations_repeated_property() {
        let declarations = parse_declarations("color: red; width: 1px; color: blue;");
        assert_eq!(
            declarations,
            vec![
                Declaration::new("color", "blue"),
                Declaration::new("width", "1px"),
            ]
        );
    }

    #[test]
    fn test_parse_declarations_skips_garbage() {
        assert!(parse_declarations("").is_empty());
        assert!(parse_declarations(" ; ;").is_empty());
        assert!(parse_declarations("nonsense; : red").is_empty());
    }

    #[test]
    fn test_split_block() {
        assert_eq!(split_block(".x { a: 1; }"), (".x", "a: 1;"));
        assert_eq!(split_block(".x"), (".x", ""));
    }
}
