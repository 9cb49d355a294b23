//! Keyframe animations.
//!
//! [CSS Animations Level 1](https://www.w3.org/TR/css-animations-1/)
//!
//! An [`Animation`] describes keyframes plus optional `animation` shorthand
//! parts. The registry appends an `@keyframes <name>` rule for it and hands
//! back either the bare name or a full shorthand value.

use serde::Deserialize;

use crate::compile::{Declaration, braced, declaration_block};
use crate::node::{Scalar, StyleSheetDesc, StyleValue};
use crate::property::process_property;
use crate::sheet::KEYFRAMES_KEYWORD;
use otter_common::warning::warn_once;

/// [§ 3 Keyframes](https://www.w3.org/TR/css-animations-1/#keyframes)
///
/// An animation definition. Keyframe selectors (`from`, `50%`, `to`) map to
/// nodes of property leaves.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    /// Keyframe selectors in order.
    pub keyframes: StyleSheetDesc,
    /// [§ 4.4 animation-duration](https://www.w3.org/TR/css-animations-1/#animation-duration)
    pub duration: Option<Scalar>,
    /// [§ 4.5 animation-timing-function](https://www.w3.org/TR/css-animations-1/#animation-timing-function)
    pub timing_function: Option<Scalar>,
    /// [§ 4.9 animation-delay](https://www.w3.org/TR/css-animations-1/#animation-delay)
    pub delay: Option<Scalar>,
    /// [§ 4.6 animation-iteration-count](https://www.w3.org/TR/css-animations-1/#animation-iteration-count)
    pub iteration_count: Option<Scalar>,
    /// [§ 4.7 animation-direction](https://www.w3.org/TR/css-animations-1/#animation-direction)
    pub direction: Option<Scalar>,
    /// [§ 4.10 animation-fill-mode](https://www.w3.org/TR/css-animations-1/#animation-fill-mode)
    pub fill_mode: Option<Scalar>,
}

impl Animation {
    /// Create an animation with no shorthand options set.
    #[must_use]
    pub fn new(keyframes: StyleSheetDesc) -> Self {
        Self {
            keyframes,
            ..Self::default()
        }
    }

    /// Whether any shorthand option is set.
    #[must_use]
    pub const fn has_options(&self) -> bool {
        self.duration.is_some()
            || self.timing_function.is_some()
            || self.delay.is_some()
            || self.iteration_count.is_some()
            || self.direction.is_some()
            || self.fill_mode.is_some()
    }

    /// [§ 4.1 The animation shorthand](https://www.w3.org/TR/css-animations-1/#animation)
    ///
    /// `name` alone when no option is set, otherwise
    /// `name duration timing-function delay iteration-count direction fill-mode`
    /// with the initial value for every unset part.
    #[must_use]
    pub fn shorthand(&self, name: &str) -> String {
        if !self.has_options() {
            return name.to_owned();
        }

        let part = |value: Option<&Scalar>, initial: &str| {
            value.map_or_else(|| initial.to_owned(), ToString::to_string)
        };

        format!(
            "{name} {} {} {} {} {} {}",
            part(self.duration.as_ref(), "0s"),
            part(self.timing_function.as_ref(), "ease"),
            part(self.delay.as_ref(), "0s"),
            part(self.iteration_count.as_ref(), "1"),
            part(self.direction.as_ref(), "normal"),
            part(self.fill_mode.as_ref(), "none"),
        )
    }

    /// The `@keyframes` rule for this animation as `(selector, block)`.
    ///
    /// Keyframe blocks are `selector { a: 1; }` joined with spaces; nested
    /// blocks inside a keyframe are skipped.
    #[must_use]
    pub fn keyframes_rule(&self, name: &str) -> (String, String) {
        let frames = self
            .keyframes
            .iter()
            .map(|(selector, node)| {
                let declarations: Vec<Declaration> = node
                    .iter()
                    .filter_map(|(property, value)| match value {
                        StyleValue::Leaf(scalar) => {
                            Some(Declaration::new(process_property(property), scalar.to_string()))
                        }
                        StyleValue::Node(_) => {
                            warn_once(
                                "CSS",
                                &format!("nested block '{property}' in keyframe '{selector}' ignored"),
                            );
                            None
                        }
                    })
                    .collect();
                braced(selector, &declaration_block(&declarations))
            })
            .collect::<Vec<_>>()
            .join(" ");

        (format!("{KEYFRAMES_KEYWORD} {name}"), frames)
    }
}
