//! Line-level accept/reject predicate.

use super::Pattern;
use crate::error::{RegexError, RegexResult};

/// A line-level filter registered against a user path.
///
/// All filters registered for a given path must accept a line (i.e. none
/// of them says "skip") for it to proceed to search evaluation.
#[derive(Debug, Clone)]
pub struct FilterTerm {
    pattern: Pattern,
    invert: bool,
}

impl FilterTerm {
    /// Builds a filter from a pattern source string.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError`] if `pattern` fails to compile or is rejected
    /// as a ReDoS risk.
    pub fn new(pattern: &str, invert: bool) -> RegexResult<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            invert,
        })
    }

    /// Builds a filter from an already-compiled [`Pattern`].
    #[must_use]
    pub fn from_pattern(pattern: Pattern, invert: bool) -> Self {
        Self { pattern, invert }
    }

    /// Returns `true` when `line` should be skipped: the pattern matching
    /// and `invert = true`, or the pattern not matching and `invert =
    /// false`.
    #[must_use]
    pub fn skip_line(&self, line: &str) -> bool {
        self.pattern.search(line) == self.invert
    }
}
