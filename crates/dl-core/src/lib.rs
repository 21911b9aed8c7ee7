//! Core domain logic for daily work logs.
//!
//! This crate turns free-form daily log text into structured work entries:
//! - Classification: deciding whether a line starts, ends or annotates an entry
//! - Scanning: the state machine that segments a line stream into entries
//! - Summaries: totals per project and project switch counts

pub mod classify;
pub mod clock;
mod entry;
pub mod notes;
pub mod parser;
mod summary;

pub use classify::LineKind;
pub use entry::WorkEntry;
pub use parser::{ParseError, ParsedLog, Scanner, parse_file, parse_lines, parse_reader};
pub use summary::{ProjectHours, Summary};
