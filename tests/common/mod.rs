//! Common test utilities for logtrawl integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

static TRACING_INIT: Once = Once::new();

/// Initializes a test-scoped `tracing` subscriber once per process, so
/// `cargo test -- --nocapture` shows the Searcher's debug/warn/error
/// spans alongside assertion output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// An isolated directory for writing fixture log files.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp directory"),
        }
    }

    /// Writes a plain-text file and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories");
        }
        fs::write(&path, content).expect("failed to write test file");
        path
    }

    /// Writes a gzip-compressed file and returns its path.
    pub fn write_gzip_file(&self, name: &str, content: &str) -> PathBuf {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories");
        }
        let file = fs::File::create(&path).expect("failed to create gzip fixture");
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content.as_bytes()).expect("failed to write gzip fixture");
        encoder.finish().expect("failed to finish gzip fixture");
        path
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}
