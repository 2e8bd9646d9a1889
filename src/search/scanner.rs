//! Per-file scan worker: transparent gzip/plain I/O, filter gating, term
//! evaluation, sequence state management.

use super::filter::FilterTerm;
use super::record::{Captures, MatchRecord};
use super::sequence::{SequenceState, SequenceTerm};
use super::term::SearchTerm;
use crate::error::{FileSearchError, ScanError, ScanResult};
use flate2::read::MultiGzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Either a single-line search or a multi-line sequence, registered
/// against one user path. Modeled as a sum type rather than a
/// subclass/type-check dispatch, as the source's duck-typed
/// `SequenceSearchDef`/`SearchDef` split suggests but doesn't enforce.
#[derive(Debug, Clone)]
pub enum Term {
    Search(SearchTerm),
    Sequence(SequenceTerm),
}

/// Everything a [`FileScanner`] job needs to know about one resolved
/// file: the filters and terms registered against its originating user
/// path.
pub struct ScanJob<'a> {
    pub resolved_path: PathBuf,
    pub filters: &'a [FilterTerm],
    pub terms: &'a [Term],
}

/// Scans one resolved file and returns its ordered [`MatchRecord`] list.
///
/// # Errors
///
/// Returns [`FileSearchError`] wrapping a [`ScanError`] if the file
/// cannot be opened, decompressed, or decoded. Gzip and plain files
/// share the same `BufRead::lines` read path; a read failure is reported
/// as [`ScanError::Decompression`] for a gzip stream (the decoder
/// surfaces malformed-gzip as an I/O error from `read`) and as
/// [`ScanError::Decode`] otherwise, so both paths still apply the same
/// UTF-8 decoding behavior, just with a cause-appropriate error kind.
pub fn scan_file(job: &ScanJob<'_>) -> ScanResult<Vec<MatchRecord>> {
    let path = &job.resolved_path;
    let (reader, is_gzip) = open_reader(path).map_err(FileSearchError::new)?;

    let mut results = Vec::new();
    let mut seq_states: HashMap<&str, SequenceState> = HashMap::new();
    for term in job.terms {
        if let Term::Sequence(seq) = term {
            seq_states.insert(seq.id(), seq.new_state());
        }
    }

    let mut last_line_no: u64 = 0;
    for (idx, line_result) in reader.lines().enumerate() {
        let line_no = (idx + 1) as u64;
        last_line_no = line_no;

        let line = line_result.map_err(|source| {
            let err = if is_gzip {
                ScanError::Decompression {
                    path: path.clone(),
                    source,
                }
            } else {
                ScanError::Decode {
                    path: path.clone(),
                    source,
                }
            };
            FileSearchError::new(err)
        })?;

        if job.filters.iter().any(|f| f.skip_line(&line)) {
            continue;
        }

        for term in job.terms {
            match term {
                Term::Search(search) => {
                    if let Some(m) = search.run(&line) {
                        results.push(MatchRecord::single(
                            path.clone(),
                            line_no,
                            search.tag().map(str::to_string),
                            Captures::from_regex_captures(&m.captures, m.capture_len),
                        ));
                    }
                }
                Term::Sequence(seq) => {
                    let state = seq_states.get_mut(seq.id()).expect("state created above");
                    seq.feed(state, path, line_no, &line);
                }
            }
        }
    }

    for term in job.terms {
        if let Term::Sequence(seq) = term {
            let state = seq_states.remove(seq.id()).expect("state created above");
            results.extend(seq.finish(state, path, last_line_no));
        }
    }

    Ok(results)
}

/// Opens `path`, transparently detecting gzip via a read-one-byte-and-
/// rewind probe — mirroring the source's `gzip.open` + `fd.read(1)` +
/// `fd.seek(0)` dance, but without needing to re-decompress: the probe
/// reads the gzip *magic bytes* directly off the raw file, not through
/// the decompressor, so rewinding is a plain seek.
fn open_reader(path: &Path) -> Result<(Box<dyn BufRead>, bool), ScanError> {
    let mut file = File::open(path).map_err(|source| ScanError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut magic = [0u8; 2];
    let read = file.read(&mut magic).map_err(|source| ScanError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    file.seek(SeekFrom::Start(0)).map_err(|source| ScanError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let is_gzip = read == 2 && magic == [0x1f, 0x8b];

    if is_gzip {
        Ok((Box::new(BufReader::new(MultiGzDecoder::new(file))), true))
    } else {
        Ok((Box::new(BufReader::new(file)), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_plain(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn write_gzip(contents: &str) -> NamedTempFile {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let f = NamedTempFile::new().unwrap();
        let mut encoder = GzEncoder::new(File::create(f.path()).unwrap(), Compression::default());
        encoder.write_all(contents.as_bytes()).unwrap();
        encoder.finish().unwrap();
        f
    }

    #[test]
    fn plain_and_gzip_yield_identical_matches() {
        let content = "a=1\nb=2\nc=3\n";
        let term = Term::Search(SearchTerm::new(r"^(\w)=(\d)$", Some("kv".into()), None).unwrap());

        for file in [write_plain(content), write_gzip(content)] {
            let job = ScanJob {
                resolved_path: file.path().to_path_buf(),
                filters: &[],
                terms: std::slice::from_ref(&term),
            };
            let records = scan_file(&job).unwrap();
            assert_eq!(records.len(), 3);
            assert_eq!(records[0].line_no, 1);
            assert_eq!(records[0].captures.get(1), Some("a"));
        }
    }

    #[test]
    fn filter_skips_lines_before_search_evaluation() {
        let file = write_plain("#hdr\nfoo\n#tail\nfoo\n");
        let filter = FilterTerm::new("^#", true).unwrap();
        let term = Term::Search(SearchTerm::new("^foo$", None, None).unwrap());
        let job = ScanJob {
            resolved_path: file.path().to_path_buf(),
            filters: std::slice::from_ref(&filter),
            terms: std::slice::from_ref(&term),
        };
        let records = scan_file(&job).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_no, 2);
        assert_eq!(records[1].line_no, 4);
    }

    #[test]
    fn missing_file_raises_file_search_error() {
        let job = ScanJob {
            resolved_path: PathBuf::from("/nonexistent/path/does/not/exist.log"),
            filters: &[],
            terms: &[],
        };
        assert!(scan_file(&job).is_err());
    }

    #[test]
    fn malformed_gzip_body_raises_decompression_error() {
        let mut f = NamedTempFile::new().unwrap();
        // valid gzip magic, truncated/corrupt body
        f.write_all(&[0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();

        let job = ScanJob {
            resolved_path: f.path().to_path_buf(),
            filters: &[],
            terms: &[],
        };
        let err = scan_file(&job).unwrap_err();
        assert_eq!(err.code(), "DECOMPRESSION_ERROR");
        assert!(matches!(err.source, ScanError::Decompression { .. }));
    }
}
