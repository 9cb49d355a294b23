//! Common utilities for the otter style compiler.
//!
//! This crate provides shared infrastructure used by the compiler and its front ends:
//! - **Warning System** - deduplicated warnings for style input that is skipped
//! - **Name Generation** - suffixes for generated class and animation names

pub mod names;
pub mod warning;
