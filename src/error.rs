//! Error types for logtrawl.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while compiling or validating a [`crate::search::Pattern`].
///
/// Surfaced synchronously at registration time (`Pattern::new`,
/// `SearchTerm::new`, `FilterTerm::new`) — never at scan time.
#[derive(Error, Debug, Clone)]
pub enum RegexError {
    #[error("invalid regex pattern {pattern:?}: {reason}")]
    Invalid { pattern: String, reason: String },

    #[error("regex pattern rejected: {reason}")]
    Dangerous { pattern: String, reason: &'static str },
}

impl RegexError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "REGEX_INVALID",
            Self::Dangerous { .. } => "REGEX_DANGEROUS",
        }
    }
}

/// Per-file scan errors.
///
/// Raised by [`crate::search::FileScanner`] and caught by
/// [`crate::search::Searcher`]; never propagated across the worker pool.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path} as UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed gzip stream in {path}: {source}")]
    Decompression {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// The path this error occurred on.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileOpen { path, .. } | Self::Decode { path, .. } | Self::Decompression { path, .. } => path,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileOpen { .. } => "FILE_OPEN_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Decompression { .. } => "DECOMPRESSION_ERROR",
        }
    }
}

/// Wrapper carrying the path and underlying cause of a failed file scan.
///
/// This is the error the Searcher catches per-job: it never halts
/// aggregation of other files.
#[derive(Error, Debug)]
#[error("search failed for {path}: {source}")]
pub struct FileSearchError {
    pub path: PathBuf,
    #[source]
    pub source: ScanError,
}

impl FileSearchError {
    #[must_use]
    pub fn new(source: ScanError) -> Self {
        Self {
            path: source.path().to_path_buf(),
            source,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.source.code()
    }
}

/// Result type alias for registration-time operations.
pub type RegexResult<T> = std::result::Result<T, RegexError>;

/// Result type alias for per-file scan operations.
pub type ScanResult<T> = std::result::Result<T, FileSearchError>;
