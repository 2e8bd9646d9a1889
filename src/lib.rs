//! logtrawl: a parallel, filter-gated, multi-pattern log file searcher.
//!
//! Consumers register any number of regex-based search terms — each
//! either a single-line match ([`search::SearchTerm`]) or a multi-line
//! "sequence" ([`search::SequenceTerm`]) — against a path, directory, or
//! glob, then call [`search::Searcher::search`] to scan every resolved
//! file and aggregate structured [`search::MatchRecord`]s into a
//! [`search::ResultCollection`].
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                   Searcher                     │
//! │   registry (filters, terms) + worker dispatch   │
//! └──────────────────┬──────────────────────────────┘
//!                    │
//! ┌──────────────────▼──────────────────────────────┐
//! │                 FilePlanner                      │
//! │   file / dir / glob → resolved files, logrotate  │
//! │              pruning applied per series           │
//! └──────────────────┬──────────────────────────────┘
//!                    │  one job per resolved file
//! ┌──────────────────▼──────────────────────────────┐
//! │            FileScanner (rayon pool)              │
//! │  gzip-detecting open, filter gate, term eval,    │
//! │        per-file sequence scratch state           │
//! └──────────────────┬──────────────────────────────┘
//!                    │
//! ┌──────────────────▼──────────────────────────────┐
//! │              ResultCollection                    │
//! │   by_path / by_tag / sections queries            │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! This crate is a library only: no `bin` target, no argument parsing, no
//! process entry point. Callers such as plugin frameworks, issue
//! reporters, or CLIs are expected to live outside it.

pub mod config;
pub mod error;
pub mod search;
pub mod security;

pub use config::SearcherConfig;
pub use error::{FileSearchError, RegexError, ScanError};
pub use search::{
    Captures, FilterTerm, MatchRecord, Pattern, ResultCollection, SearchTerm, Searcher, SequenceTerm, Term,
};
