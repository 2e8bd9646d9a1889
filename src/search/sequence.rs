//! Multi-line sequence term: start / optional body / optional end.

use super::record::{Captures, MatchRecord};
use super::term::SearchTerm;
use std::path::Path;

/// A registered multi-line sequence: start / optional body / optional end.
///
/// The term object itself is immutable once built — running state
/// (whether a section is open, the current section index) lives in a
/// [`SequenceState`] created fresh per file scan. This is what makes
/// concurrent scanning of the same registered term correct: every job
/// gets its own scratch state, and the registered term is never mutated.
#[derive(Debug, Clone)]
pub struct SequenceTerm {
    start: SearchTerm,
    body: Option<SearchTerm>,
    end: Option<SearchTerm>,
    tag: String,
    id: String,
}

impl SequenceTerm {
    /// Builds a sequence term from already-constructed start/body/end
    /// search terms.
    ///
    /// `id` must be unique across all sequence terms registered with a
    /// given [`super::Searcher`] — callers typically mint a UUID.
    #[must_use]
    pub fn new(
        start: SearchTerm,
        body: Option<SearchTerm>,
        end: Option<SearchTerm>,
        tag: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            start,
            body,
            end,
            tag: tag.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn start_tag(&self) -> String {
        format!("{}-start", self.tag)
    }

    #[must_use]
    pub fn body_tag(&self) -> String {
        format!("{}-body", self.tag)
    }

    #[must_use]
    pub fn end_tag(&self) -> String {
        format!("{}-end", self.tag)
    }

    #[must_use]
    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    /// Creates fresh per-file scratch state for this term.
    #[must_use]
    pub fn new_state(&self) -> SequenceState {
        SequenceState::default()
    }

    /// Feeds one line to the state machine, mutating `state` and pushing
    /// any emitted records into `state`'s scratch buffer.
    ///
    /// `source` and `line_no` are only used to stamp emitted records.
    pub fn feed(&self, state: &mut SequenceState, source: &Path, line_no: u64, line: &str) {
        if !state.in_section {
            if let Some(m) = self.start.run(line) {
                self.emit_start(state, source, line_no, &m.captures, m.capture_len);
                state.in_section = true;
            }
            return;
        }

        // in_section — requires restart/end/body handling.
        if let Some(end) = &self.end {
            if self.start.run(line).is_some() {
                // Restart: discard this section's scratch buffer, reset to
                // idle without incrementing section_idx, then re-process
                // this line from idle so it matches start again.
                state.buffer.retain(|r| r.section_idx != Some(state.section_idx));
                state.in_section = false;
                self.feed(state, source, line_no, line);
                return;
            }

            if let Some(m) = end.run(line) {
                self.emit_end(state, source, line_no, &m.captures, m.capture_len);
                state.section_idx += 1;
                state.in_section = false;
                return;
            }

            if let Some(body) = &self.body {
                if let Some(m) = body.run(line) {
                    self.emit_body(state, source, line_no, &m.captures, m.capture_len);
                }
            }
            return;
        }

        // No end configured: every fresh start match closes the previous
        // section and opens the next.
        if let Some(m) = self.start.run(line) {
            state.section_idx += 1;
            self.emit_start(state, source, line_no, &m.captures, m.capture_len);
            return;
        }

        if let Some(body) = &self.body {
            if let Some(m) = body.run(line) {
                self.emit_body(state, source, line_no, &m.captures, m.capture_len);
            }
        }
    }

    /// Runs EOF handling: closes or drops the trailing open section (if
    /// any) and returns the final, ordered record list for this sequence.
    ///
    /// `last_line_no` is the 1-based number of the last line iterated, or
    /// `0` if the file was empty.
    #[must_use]
    pub fn finish(&self, mut state: SequenceState, source: &Path, last_line_no: u64) -> Vec<MatchRecord> {
        if state.in_section {
            match &self.end {
                None => {
                    state.section_idx += 1;
                }
                Some(end) => {
                    if let Some(m) = end.run("") {
                        let record = MatchRecord::sequence(
                            source.to_path_buf(),
                            last_line_no + 1,
                            self.end_tag(),
                            Captures::from_regex_captures(&m.captures, m.capture_len),
                            self.id.clone(),
                            state.section_idx,
                        );
                        state.buffer.push(record);
                        state.section_idx += 1;
                    } else {
                        state.buffer.retain(|r| r.section_idx != Some(state.section_idx));
                    }
                }
            }
        }

        state.buffer
    }

    fn emit_start(
        &self,
        state: &mut SequenceState,
        source: &Path,
        line_no: u64,
        captures: &regex::Captures<'_>,
        capture_len: usize,
    ) {
        state.buffer.push(MatchRecord::sequence(
            source.to_path_buf(),
            line_no,
            self.start_tag(),
            Captures::from_regex_captures(captures, capture_len),
            self.id.clone(),
            state.section_idx,
        ));
    }

    fn emit_body(
        &self,
        state: &mut SequenceState,
        source: &Path,
        line_no: u64,
        captures: &regex::Captures<'_>,
        capture_len: usize,
    ) {
        state.buffer.push(MatchRecord::sequence(
            source.to_path_buf(),
            line_no,
            self.body_tag(),
            Captures::from_regex_captures(captures, capture_len),
            self.id.clone(),
            state.section_idx,
        ));
    }

    fn emit_end(
        &self,
        state: &mut SequenceState,
        source: &Path,
        line_no: u64,
        captures: &regex::Captures<'_>,
        capture_len: usize,
    ) {
        state.buffer.push(MatchRecord::sequence(
            source.to_path_buf(),
            line_no,
            self.end_tag(),
            Captures::from_regex_captures(captures, capture_len),
            self.id.clone(),
            state.section_idx,
        ));
    }
}

/// Per-file scratch state for one [`SequenceTerm`].
///
/// Created at scan start, fed one line at a time, flushed at EOF. Never
/// shared across files or jobs — each [`super::FileScanner`] job owns its
/// own instance per registered sequence.
#[derive(Debug, Default)]
pub struct SequenceState {
    in_section: bool,
    section_idx: u32,
    buffer: Vec<MatchRecord>,
}
