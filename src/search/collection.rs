//! Aggregated search results, queryable by path, tag, or sequence section.

use super::record::MatchRecord;
use super::sequence::SequenceTerm;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mapping from source path to the ordered list of [`MatchRecord`]s found
/// in it.
///
/// Insertion order within a file is preserved (single-line records in
/// line order, sequence records appended at EOF); order across files is
/// unspecified. Created empty by [`super::Searcher::search`] — each call
/// starts from a fresh collection.
#[derive(Debug, Clone, Default)]
pub struct ResultCollection {
    results: HashMap<PathBuf, Vec<MatchRecord>>,
}

impl ResultCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `records` for `path`, extending any prior entry rather
    /// than overwriting it (a path can be scanned more than once, e.g.
    /// if it is matched by two distinct user paths).
    pub fn add(&mut self, path: PathBuf, records: Vec<MatchRecord>) {
        self.results.entry(path).or_default().extend(records);
    }

    /// Every path with at least one recorded scan (even if it produced
    /// zero matches — a path is only present once `add` has been called
    /// for it).
    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        self.results.keys().map(PathBuf::as_path).collect()
    }

    /// All records for `path`, or an empty slice if unknown.
    #[must_use]
    pub fn by_path(&self, path: &Path) -> &[MatchRecord] {
        self.results.get(path).map_or(&[], Vec::as_slice)
    }

    /// All records tagged `tag`, optionally scoped to one path and/or one
    /// sequence id.
    #[must_use]
    pub fn by_tag(&self, tag: &str, path: Option<&Path>, seq_id: Option<&str>) -> Vec<&MatchRecord> {
        let candidate_paths: Vec<&Path> = match path {
            Some(p) => vec![p],
            None => self.results.keys().map(PathBuf::as_path).collect(),
        };

        candidate_paths
            .into_iter()
            .flat_map(|p| self.by_path(p))
            .filter(|r| r.tag.as_deref() == Some(tag))
            .filter(|r| seq_id.is_none_or(|id| r.seq_id.as_deref() == Some(id)))
            .collect()
    }

    /// Groups the start/body/end records of `seq_term` by section index,
    /// optionally scoped to one path.
    #[must_use]
    pub fn sections(&self, seq_term: &SequenceTerm, path: Option<&Path>) -> HashMap<u32, Vec<&MatchRecord>> {
        let mut sections: HashMap<u32, Vec<&MatchRecord>> = HashMap::new();

        for tag in [seq_term.start_tag(), seq_term.body_tag(), seq_term.end_tag()] {
            for record in self.by_tag(&tag, path, Some(seq_term.id())) {
                if let Some(idx) = record.section_idx {
                    sections.entry(idx).or_default().push(record);
                }
            }
        }

        sections
    }

    /// Iterates `(path, records)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[MatchRecord])> {
        self.results.iter().map(|(p, r)| (p.as_path(), r.as_slice()))
    }

    /// Clears all results — used at the start of every `search()` call.
    pub fn reset(&mut self) {
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::record::Captures;

    fn rec(path: &str, line_no: u64, tag: &str, seq_id: Option<&str>, section_idx: Option<u32>) -> MatchRecord {
        MatchRecord {
            source: PathBuf::from(path),
            line_no,
            tag: Some(tag.to_string()),
            captures: Captures::default(),
            seq_id: seq_id.map(str::to_string),
            section_idx,
        }
    }

    #[test]
    fn add_extends_existing_path() {
        let mut c = ResultCollection::new();
        c.add(PathBuf::from("a.log"), vec![rec("a.log", 1, "kv", None, None)]);
        c.add(PathBuf::from("a.log"), vec![rec("a.log", 2, "kv", None, None)]);
        assert_eq!(c.by_path(Path::new("a.log")).len(), 2);
    }

    #[test]
    fn by_tag_scopes_to_path_and_sequence_id() {
        let mut c = ResultCollection::new();
        c.add(
            PathBuf::from("a.log"),
            vec![rec("a.log", 1, "blk-start", Some("seq-a"), Some(0))],
        );
        c.add(
            PathBuf::from("b.log"),
            vec![rec("b.log", 1, "blk-start", Some("seq-b"), Some(0))],
        );

        assert_eq!(c.by_tag("blk-start", None, None).len(), 2);
        assert_eq!(c.by_tag("blk-start", Some(Path::new("a.log")), None).len(), 1);
        assert_eq!(c.by_tag("blk-start", None, Some("seq-b")).len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut c = ResultCollection::new();
        c.add(PathBuf::from("a.log"), vec![rec("a.log", 1, "kv", None, None)]);
        c.reset();
        assert!(c.by_path(Path::new("a.log")).is_empty());
        assert!(c.paths().is_empty());
    }
}
