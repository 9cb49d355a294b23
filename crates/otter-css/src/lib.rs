//! Style-object compiler and stylesheet reconciler for otter.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style model** - nested, insertion-ordered style descriptions built in
//!   code or read from JSON
//!   - Scalar leaves (strings, numbers) and nested blocks
//!   - Top-level descriptions keyed by entry name
//!
//! - **Selector-Tree Compiler** - nested descriptions flattened into rules
//!   - camelCase and vendor-prefixed property names
//!   - Pseudo-class, attribute, class, id and combinator suffixes
//!   - `@media` wrapping ([Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/))
//!   - `extend` inheritance between top-level entries
//!
//! - **Stylesheet Reconciler** - minimal add/remove operations against a live
//!   sheet ([CSSOM](https://www.w3.org/TR/cssom-1/))
//!   - Matching by selector and media condition
//!   - Declaration merging that keeps untouched properties
//!
//! - **Animations** - `@keyframes` rules and `animation` shorthand values
//!   ([CSS Animations Level 1](https://www.w3.org/TR/css-animations-1/))
//!
//! # Not Implemented
//!
//! - At-rules other than `@media` (silently dropped)
//! - Parsing raw CSS text beyond declaration lists
//! - Selector specificity and validation

/// `@keyframes` animations.
pub mod animation;
/// Per-component render binding.
pub mod binding;
/// Key classification.
pub mod classify;
/// The selector-tree compiler.
pub mod compile;
/// Error types.
pub mod error;
/// `extend` resolution.
pub mod extend;
/// The style description model.
pub mod node;
/// Property name normalization.
pub mod property;
/// The stylesheet reconciler.
pub mod reconcile;
/// Style registry (create / update entry points).
pub mod registry;
/// Stylesheet handle and in-memory sheet.
pub mod sheet;

// Re-exports for convenience
pub use animation::Animation;
pub use binding::StyleBinding;
pub use classify::{AtRuleKind, KeyKind, classify};
pub use compile::{Declaration, Rule, RuleTarget, compile};
pub use error::{Result, StyleError};
pub use extend::resolve_extends;
pub use node::{Scalar, StyleNode, StyleSheetDesc, StyleValue};
pub use property::process_property;
pub use reconcile::{SheetOp, apply, reconcile};
pub use registry::{ClassNames, RegistryOptions, StyleRegistry};
pub use sheet::{RuleList, SheetRule, StyleRecord, StyleSheet};
