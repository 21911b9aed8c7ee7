//! Log stream scanner.
//!
//! The scanner is a two-state machine folded over the input lines:
//!
//! - `Idle`: no entry is open. A bare hour count seen here is kept as a
//!   pending duration for the next entry.
//! - `Open`: an entry has a start time and project and is collecting notes.
//!
//! A start line or an hour-count line closes the open entry. A start line
//! closing an entry also opens the next one. Scanning stops for good at the
//! first separator line (`--------`).

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::mem;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classify::{self, LineKind};
use crate::clock::span_hours;
use crate::entry::WorkEntry;

/// Errors reading a log source. Malformed log text is never an error.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The log file could not be opened.
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading from the source failed.
    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Result of scanning a log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    /// Closed entries in input order.
    pub entries: Vec<WorkEntry>,
    /// An entry that was still open when the input ended.
    ///
    /// It never appears in `entries`; its `time` is always `None`.
    pub unfinished: Option<WorkEntry>,
}

/// An entry being accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub start: String,
    pub project: String,
    pub notes: Vec<String>,
    /// Hour count seen before the entry opened, used if a start line closes it.
    pub pending: Option<String>,
}

impl Draft {
    fn close(self, time: Option<String>) -> WorkEntry {
        WorkEntry {
            start: self.start,
            project: self.project,
            notes: self.notes,
            time,
        }
    }
}

/// Scanner state between lines.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Idle { pending: Option<String> },
    Open(Draft),
}

impl Default for ScanState {
    fn default() -> Self {
        Self::Idle { pending: None }
    }
}

/// Opens an entry from a start line, or stays idle when it names no project.
fn open(line: &str, pending: Option<String>) -> ScanState {
    let project = classify::project(line);
    if project.is_empty() {
        return ScanState::Idle { pending };
    }

    ScanState::Open(Draft {
        start: classify::start_time(line).to_string(),
        project,
        notes: classify::inline_note(line).into_iter().collect(),
        pending,
    })
}

/// Advances the state machine by one line (newline already stripped).
///
/// Returns the next state and the entry closed by this line, if any.
pub fn step(state: ScanState, line: &str) -> (ScanState, Option<WorkEntry>) {
    match (state, classify::classify(line)) {
        (ScanState::Open(draft), LineKind::End) => {
            let entry = draft.close(Some(line.to_string()));
            (ScanState::default(), Some(entry))
        }
        (ScanState::Open(draft), LineKind::Start) => {
            let time = draft
                .pending
                .clone()
                .or_else(|| span_hours(&draft.start, line));
            (open(line, None), Some(draft.close(time)))
        }
        (ScanState::Open(mut draft), LineKind::Notes) => {
            let note = line.trim();
            if !note.is_empty() {
                draft.notes.push(note.to_string());
            }
            (ScanState::Open(draft), None)
        }
        (ScanState::Idle { pending }, LineKind::Start) => (open(line, pending), None),
        (ScanState::Idle { .. }, LineKind::End) => (
            ScanState::Idle {
                pending: Some(line.to_string()),
            },
            None,
        ),
        (idle @ ScanState::Idle { .. }, LineKind::Notes) => {
            if !line.trim().is_empty() {
                tracing::trace!(line, "note outside of an entry ignored");
            }
            (idle, None)
        }
    }
}

/// Whether the caller should keep feeding lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Incremental scanner over log lines.
#[derive(Debug, Default)]
pub struct Scanner {
    state: ScanState,
    entries: Vec<WorkEntry>,
    stopped: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line. Returns [`Flow::Stop`] once a separator was seen;
    /// lines fed after that are ignored.
    pub fn feed(&mut self, line: &str) -> Flow {
        if self.stopped {
            return Flow::Stop;
        }

        let line = line.trim_end_matches(['\n', '\r']);
        if classify::is_separator(line) {
            self.stopped = true;
            return Flow::Stop;
        }

        let (next, closed) = step(mem::take(&mut self.state), line);
        self.state = next;
        if let Some(entry) = closed {
            tracing::debug!(
                start = %entry.start,
                project = %entry.project,
                time = ?entry.time,
                "entry closed"
            );
            self.entries.push(entry);
        }

        Flow::Continue
    }

    /// Ends the scan. An entry left open is reported and dropped.
    pub fn finish(self) -> ParsedLog {
        let unfinished = match self.state {
            ScanState::Open(draft) => {
                tracing::error!(
                    start = %draft.start,
                    project = %draft.project,
                    "finish time not set"
                );
                Some(draft.close(None))
            }
            ScanState::Idle { .. } => None,
        };

        ParsedLog {
            entries: self.entries,
            unfinished,
        }
    }
}

/// Parses an in-memory sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> ParsedLog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new();
    for line in lines {
        if scanner.feed(line.as_ref()) == Flow::Stop {
            break;
        }
    }
    scanner.finish()
}

/// Parses lines from a reader, stopping at the separator without reading
/// any further.
///
/// Lines are decoded lossily, so bytes that are not UTF-8 end up as
/// replacement characters in a note instead of failing the whole log.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<ParsedLog, ParseError> {
    let mut scanner = Scanner::new();
    let mut buf = Vec::new();
    let mut line = 0;

    loop {
        buf.clear();
        line += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ParseError::Read { line, source })?;
        if read == 0 {
            break;
        }
        if scanner.feed(&String::from_utf8_lossy(&buf)) == Flow::Stop {
            break;
        }
    }
    Ok(scanner.finish())
}

/// Parses a log file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedLog, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(BufReader::new(file))
}
