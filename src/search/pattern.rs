//! Compiled regex wrapper shared by filters and search terms.

use crate::error::{RegexError, RegexResult};
use crate::security;
use regex::{Captures, Regex};

/// An immutable compiled regex plus its original source string.
///
/// No lifecycle beyond the owning [`super::FilterTerm`] or
/// [`super::SearchTerm`] — construction is the only place a `Pattern` can
/// fail, which is why [`Pattern::new`] validates and compiles eagerly.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` into a `Pattern`, rejecting invalid or
    /// pathologically expensive regexes.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::Dangerous`] if the pattern shape risks
    /// catastrophic backtracking, or [`RegexError::Invalid`] if the
    /// underlying regex engine rejects it.
    pub fn new(source: impl Into<String>) -> RegexResult<Self> {
        let source = source.into();

        security::validate_regex_pattern(&source).map_err(|reason| RegexError::Dangerous {
            pattern: source.clone(),
            reason,
        })?;

        let regex = Regex::new(&source).map_err(|e| RegexError::Invalid {
            pattern: source.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { source, regex })
    }

    /// The original, uncompiled pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substring search — succeeds if the pattern matches anywhere in
    /// `line`. Used by filters and hints.
    #[must_use]
    pub fn search(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Anchored-at-start match — succeeds only if the pattern matches
    /// beginning at byte offset 0 of `line` (Python `re.match` semantics,
    /// not a substring search). Returns the capture groups on success.
    #[must_use]
    pub fn match_at_start<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        let caps = self.regex.captures(line)?;
        let whole = caps.get(0)?;
        if whole.start() == 0 {
            Some(caps)
        } else {
            None
        }
    }

    /// Number of capture groups the compiled pattern declares (excluding
    /// the implicit group 0).
    #[must_use]
    pub fn capture_len(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }
}
