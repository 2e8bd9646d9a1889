//! A single match result and its captured groups.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Captured groups for a single match, keyed by group index.
///
/// Storage rule (memory-conserving, ported from the original
/// implementation): if the regex produced one or more numbered capture
/// groups, only groups `1..=N` are stored — group `0` (the whole match) is
/// dropped. If the regex has no groups, group `0` is stored instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures(HashMap<u32, String>);

impl Captures {
    /// Builds a `Captures` from a `regex::Captures`, applying the storage
    /// rule above. `capture_len` is the pattern's declared group count
    /// (excluding group 0), from [`super::Pattern::capture_len`].
    #[must_use]
    pub fn from_regex_captures(caps: &regex::Captures<'_>, capture_len: usize) -> Self {
        let mut parts = HashMap::new();
        if capture_len > 0 {
            for i in 1..=capture_len {
                if let Some(m) = caps.get(i) {
                    parts.insert(i as u32, m.as_str().to_string());
                }
            }
        } else if let Some(m) = caps.get(0) {
            parts.insert(0, m.as_str().to_string());
        }
        Self(parts)
    }

    /// Retrieves a captured value by group index, or `None` if that index
    /// was not stored (including group 0 when numbered groups exist).
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    /// Number of stored capture entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One search result: source file, line number, captured groups, tag, and
/// — if produced by a sequence term — the sequence id and section index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub source: PathBuf,
    /// 1-based line number within the source file.
    pub line_no: u64,
    pub tag: Option<String>,
    pub captures: Captures,
    pub seq_id: Option<String>,
    pub section_idx: Option<u32>,
}

impl MatchRecord {
    #[must_use]
    pub fn single(source: PathBuf, line_no: u64, tag: Option<String>, captures: Captures) -> Self {
        Self {
            source,
            line_no,
            tag,
            captures,
            seq_id: None,
            section_idx: None,
        }
    }

    #[must_use]
    pub fn sequence(
        source: PathBuf,
        line_no: u64,
        tag: String,
        captures: Captures,
        seq_id: String,
        section_idx: u32,
    ) -> Self {
        Self {
            source,
            line_no,
            tag: Some(tag),
            captures,
            seq_id: Some(seq_id),
            section_idx: Some(section_idx),
        }
    }
}
