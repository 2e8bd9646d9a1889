//! Parallel, filter-gated, multi-pattern log file search.
//!
//! See the crate-level documentation for the overall model. This module
//! wires the leaf types ([`Pattern`], [`FilterTerm`], [`SearchTerm`],
//! [`SequenceTerm`]) into the top-level [`Searcher`] façade: registration,
//! file resolution, worker-pool dispatch, and result aggregation.

mod collection;
mod filter;
mod pattern;
mod planner;
mod record;
mod scanner;
mod sequence;
mod term;

pub use collection::ResultCollection;
pub use filter::FilterTerm;
pub use pattern::Pattern;
pub use record::{Captures, MatchRecord};
pub use scanner::Term;
pub use sequence::{SequenceState, SequenceTerm};
pub use term::{Match, SearchTerm};

use crate::config::SearcherConfig;
use crate::error::{FileSearchError, ScanResult};
use scanner::ScanJob;
use std::collections::HashMap;
use std::path::PathBuf;

impl From<SearchTerm> for Term {
    fn from(term: SearchTerm) -> Self {
        Term::Search(term)
    }
}

impl From<SequenceTerm> for Term {
    fn from(term: SequenceTerm) -> Self {
        Term::Sequence(term)
    }
}

/// Top-level façade: registry for filters and terms, worker-pool
/// dispatch, result aggregation, and per-file failure isolation.
///
/// Registration (`add_filter`/`add_search`) happens before `search()`;
/// the registry is read-only while a search runs. Each `search()` call
/// starts from an empty [`ResultCollection`] — running it twice on
/// unchanged registrations and unchanged files yields equal collections
/// (modulo cross-file ordering).
pub struct Searcher {
    config: SearcherConfig,
    filters: HashMap<String, Vec<FilterTerm>>,
    terms: HashMap<String, Vec<Term>>,
    registration_order: Vec<String>,
    results: ResultCollection,
    diagnostics: Vec<FileSearchError>,
}

impl Searcher {
    #[must_use]
    pub fn new(config: SearcherConfig) -> Self {
        Self {
            config,
            filters: HashMap::new(),
            terms: HashMap::new(),
            registration_order: Vec::new(),
            results: ResultCollection::new(),
            diagnostics: Vec::new(),
        }
    }

    fn remember_path(&mut self, user_path: &str) {
        if !self.registration_order.iter().any(|p| p == user_path) {
            self.registration_order.push(user_path.to_string());
        }
    }

    /// Registers a filter against a user path (file, directory, or glob).
    /// All filters registered for a path must accept a line for it to
    /// reach term evaluation.
    pub fn add_filter(&mut self, filter: FilterTerm, user_path: impl Into<String>) {
        let user_path = user_path.into();
        self.remember_path(&user_path);
        self.filters.entry(user_path).or_default().push(filter);
    }

    /// Registers a search term (single-line or sequence) against a user
    /// path. Terms evaluate in registration order on every candidate
    /// line.
    pub fn add_search(&mut self, term: impl Into<Term>, user_path: impl Into<String>) {
        let user_path = user_path.into();
        self.remember_path(&user_path);
        self.terms.entry(user_path).or_default().push(term.into());
    }

    /// Diagnostics recorded by the most recent `search()` call, one per
    /// file that failed to scan. Mirrors what was logged to the
    /// `tracing` error sink, kept here too so callers and tests can
    /// assert on per-file failure isolation without capturing logs.
    #[must_use]
    pub fn diagnostics(&self) -> &[FileSearchError] {
        &self.diagnostics
    }

    /// Executes every registered search against every registered path
    /// and returns the aggregated results.
    ///
    /// Worker count is `1` (serial) if `max_parallel_tasks == 0`,
    /// otherwise `min(max_parallel_tasks, available_cpus)`. A file whose
    /// scan fails is recorded as a diagnostic and excluded from the
    /// collection; it never aborts the run.
    pub fn search(&mut self) -> &ResultCollection {
        self.results.reset();
        self.diagnostics.clear();

        let worker_count = self.config.worker_count();
        tracing::debug!(worker_count, paths = self.registration_order.len(), "starting search");

        let mut jobs: Vec<(String, PathBuf)> = Vec::new();
        for user_path in &self.registration_order {
            let resolved = planner::resolve(user_path, self.config.max_logrotate_depth);
            tracing::debug!(user_path = %user_path, resolved = resolved.len(), "resolved user path");
            for path in resolved {
                jobs.push((user_path.clone(), path));
            }
        }

        let outcomes: Vec<(String, PathBuf, ScanResult<Vec<MatchRecord>>)> =
            if worker_count <= 1 {
                jobs.into_iter()
                    .map(|(user_path, path)| {
                        let outcome = self.run_job(&user_path, &path);
                        (user_path, path, outcome)
                    })
                    .collect()
            } else {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(worker_count)
                    .build()
                    .expect("thread pool with explicit size always builds");
                let searcher = &*self;
                pool.install(|| {
                    use rayon::prelude::*;
                    jobs.into_par_iter()
                        .map(|(user_path, path)| {
                            let outcome = searcher.run_job(&user_path, &path);
                            (user_path, path, outcome)
                        })
                        .collect()
                })
            };

        for (user_path, path, outcome) in outcomes {
            match outcome {
                Ok(records) => self.results.add(path, records),
                Err(err) => {
                    tracing::error!(user_path = %user_path, path = %err.path.display(), error = %err, "file search failed");
                    self.diagnostics.push(err);
                }
            }
        }

        &self.results
    }

    fn run_job(&self, user_path: &str, path: &PathBuf) -> ScanResult<Vec<MatchRecord>> {
        let empty_filters: &[FilterTerm] = &[];
        let empty_terms: &[Term] = &[];
        let job = ScanJob {
            resolved_path: path.clone(),
            filters: self.filters.get(user_path).map_or(empty_filters, Vec::as_slice),
            terms: self.terms.get(user_path).map_or(empty_terms, Vec::as_slice),
        };
        scanner::scan_file(&job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn single_pattern_match_with_groups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "a=1\nb=2\nc=3\n").unwrap();

        let mut searcher = Searcher::new(SearcherConfig::default());
        searcher.add_search(
            SearchTerm::new(r"^(\w)=(\d)$", Some("kv".into()), None).unwrap(),
            path.to_str().unwrap(),
        );

        let results = searcher.search();
        let records = results.by_path(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].captures.get(1), Some("a"));
        assert_eq!(records[0].captures.get(2), Some("1"));
        assert!(records.iter().all(|r| r.tag.as_deref() == Some("kv")));
    }

    #[test]
    fn parallel_failure_isolation() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.log");
        let bad = dir.path().join("bad.log.gz");
        fs::write(&good, "foo\n").unwrap();
        fs::write(&bad, b"not actually gzip but named .gz").unwrap();

        // force the bad path to be probed as gzip by naming it .gz with a
        // genuine gzip magic header but truncated/corrupt body.
        fs::write(&bad, [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();

        let mut searcher = Searcher::new(SearcherConfig::default());
        searcher.add_search(SearchTerm::new("foo", None, None).unwrap(), good.to_str().unwrap());
        searcher.add_search(SearchTerm::new("foo", None, None).unwrap(), bad.to_str().unwrap());

        let results = searcher.search();
        assert_eq!(results.by_path(&good).len(), 1);
        assert!(results.by_path(&bad).is_empty());
        assert_eq!(searcher.diagnostics().len(), 1);
    }

    #[test]
    fn serial_mode_when_max_parallel_tasks_is_zero() {
        let cfg = SearcherConfig {
            max_parallel_tasks: 0,
            ..SearcherConfig::default()
        };
        assert_eq!(cfg.worker_count(), 1);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "foo\n").unwrap();

        let mut searcher = Searcher::new(cfg);
        searcher.add_search(SearchTerm::new("foo", None, None).unwrap(), path.to_str().unwrap());
        assert_eq!(searcher.search().by_path(&path).len(), 1);
    }

    #[test]
    fn idempotent_across_repeated_searches() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "foo\nbar\nfoo\n").unwrap();

        let mut searcher = Searcher::new(SearcherConfig::default());
        searcher.add_search(SearchTerm::new("foo", None, None).unwrap(), path.to_str().unwrap());

        let first: Vec<_> = searcher.search().by_path(&path).to_vec();
        let second: Vec<_> = searcher.search().by_path(&path).to_vec();
        assert_eq!(first, second);
    }
}
