//! Suffix generation for class and animation names.
//!
//! Generated names look like `<prefix>-<key>-<suffix>`. The compiler treats
//! them as opaque strings, so any [`NameGenerator`] works as long as it keeps
//! handing out suffixes that are valid inside a CSS identifier.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Characters a generated suffix is drawn from (base 36).
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of suffixes produced by [`RandomSuffix`].
pub const SUFFIX_LEN: usize = 5;

/// Source of suffixes for generated class and animation names.
pub trait NameGenerator {
    /// Produce the next suffix.
    fn suffix(&mut self) -> String;
}

impl<G: NameGenerator + ?Sized> NameGenerator for Box<G> {
    fn suffix(&mut self) -> String {
        (**self).suffix()
    }
}

/// Random five character base-36 suffixes.
#[derive(Debug, Clone)]
pub struct RandomSuffix {
    rng: StdRng,
}

impl RandomSuffix {
    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator that yields the same sequence for the same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSuffix {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator for RandomSuffix {
    fn suffix(&mut self) -> String {
        (0..SUFFIX_LEN)
            .map(|_| char::from(ALPHABET[self.rng.gen_range(0..ALPHABET.len())]))
            .collect()
    }
}

/// Always returns the same suffix.
///
/// Useful for snapshot-style tests where generated names must be predictable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSuffix(String);

impl FixedSuffix {
    /// Create a generator that always yields `suffix`.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }
}

impl NameGenerator for FixedSuffix {
    fn suffix(&mut self) -> String {
        self.0.clone()
    }
}

/// Counter-based suffixes: `0`, `1`, ... `z`, `10`, ...
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequentialSuffix {
    next: u64,
}

impl SequentialSuffix {
    /// Create a counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }
}

impl NameGenerator for SequentialSuffix {
    fn suffix(&mut self) -> String {
        let mut value = self.next;
        self.next += 1;

        let mut digits = Vec::new();
        loop {
            digits.push(ALPHABET[usize::try_from(value % 36).unwrap_or_default()]);
            value /= 36;
            if value == 0 {
                break;
            }
        }
        digits.iter().rev().map(|&b| char::from(b)).collect()
    }
}
