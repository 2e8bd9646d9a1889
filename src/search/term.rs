//! Single-line search term: optional hint + ordered patterns.

use super::Pattern;
use crate::error::{RegexError, RegexResult};
use regex::Captures;

/// A single-line search: optionally hint-guarded, tried against an
/// ordered, non-empty list of patterns.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    patterns: Vec<Pattern>,
    tag: Option<String>,
    hint: Option<Pattern>,
}

impl SearchTerm {
    /// Builds a search term from one pattern source string.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError`] if `pattern` or `hint` fail to compile.
    pub fn new(pattern: &str, tag: Option<String>, hint: Option<&str>) -> RegexResult<Self> {
        Self::with_patterns(&[pattern], tag, hint)
    }

    /// Builds a search term from an ordered list of pattern source
    /// strings; the first to match wins.
    ///
    /// # Panics
    ///
    /// Panics if `patterns` is empty — a `SearchTerm` must have at least
    /// one pattern by construction.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError`] if any pattern or the hint fail to compile.
    pub fn with_patterns(
        patterns: &[&str],
        tag: Option<String>,
        hint: Option<&str>,
    ) -> RegexResult<Self> {
        assert!(!patterns.is_empty(), "SearchTerm requires at least one pattern");

        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(*p))
            .collect::<Result<Vec<_>, _>>()?;
        let hint = hint.map(Pattern::new).transpose()?;

        Ok(Self { patterns, tag, hint })
    }

    /// Builds a search term from already-compiled patterns.
    #[must_use]
    pub fn from_patterns(patterns: Vec<Pattern>, tag: Option<String>, hint: Option<Pattern>) -> Self {
        assert!(!patterns.is_empty(), "SearchTerm requires at least one pattern");
        Self { patterns, tag, hint }
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Evaluates this term against `line`.
    ///
    /// If a hint is set, its substring search must succeed first (fast
    /// reject). The main patterns are then tried in order with
    /// anchored-at-start semantics; the first hit's captures and owning
    /// pattern are returned.
    #[must_use]
    pub fn run<'t>(&self, line: &'t str) -> Option<Match<'t>> {
        if let Some(hint) = &self.hint {
            if !hint.search(line) {
                return None;
            }
        }

        for pattern in &self.patterns {
            if let Some(captures) = pattern.match_at_start(line) {
                return Some(Match {
                    captures,
                    capture_len: pattern.capture_len(),
                });
            }
        }

        None
    }
}

/// A successful match: the regex captures plus the owning pattern's
/// declared group count, needed to apply the capture-storage rule.
pub struct Match<'t> {
    pub captures: Captures<'t>,
    pub capture_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_rejects_before_trying_patterns() {
        let term = SearchTerm::new(r"^ERROR (\S+)$", None, Some("ERROR")).unwrap();
        assert!(term.run("info x").is_none());
        let m = term.run("ERROR oops").unwrap();
        assert_eq!(m.captures.get(1).unwrap().as_str(), "oops");
    }

    #[test]
    fn first_matching_pattern_wins() {
        let term = SearchTerm::with_patterns(&["^(a)$", "^(ab)$"], None, None).unwrap();
        let first = term.run("a").unwrap();
        assert_eq!(first.captures.get(1).unwrap().as_str(), "a");
        let second = term.run("ab").unwrap();
        assert_eq!(second.captures.get(1).unwrap().as_str(), "ab");
        assert!(term.run("b").is_none());
    }

    #[test]
    fn match_is_anchored_not_substring() {
        let term = SearchTerm::new("foo", None, None).unwrap();
        assert!(term.run("foo bar").is_some());
        assert!(term.run("bar foo").is_none());
    }
}
