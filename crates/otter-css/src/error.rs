//! Errors raised while resolving, compiling or applying styles.

use thiserror::Error;

/// Failure of a style operation.
///
/// All failures are synchronous; a failing `create_style` appends nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// An entry extends a sibling entry that does not exist.
    #[error("can't extend {entry} with {target} because {target} does not exist")]
    UnknownExtend {
        /// The entry carrying the `extend` key.
        entry: String,
        /// The missing entry it names.
        target: String,
    },

    /// Following `extend` references leads back to an entry already on the chain.
    #[error("extend chain forms a cycle: {}", .chain.join(" -> "))]
    ExtendCycle {
        /// Entry names in the order they were followed, ending with the repeat.
        chain: Vec<String>,
    },

    /// A top-level key cannot be used to build a class name.
    #[error("{key} is not a valid classname")]
    InvalidClassName {
        /// The offending key.
        key: String,
    },

    /// A style value is neither a string, a number nor a nested object.
    #[error("value of '{key}' must be a string, a number or an object")]
    InvalidValue {
        /// Key holding the value (`<root>` for the top-level value itself).
        key: String,
    },

    /// A rule index outside the stylesheet was removed.
    #[error("rule index {index} is out of range for a sheet of {len} rules")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rules in the sheet at the time.
        len: usize,
    },
}

/// Result alias for style operations.
pub type Result<T> = std::result::Result<T, StyleError>;
