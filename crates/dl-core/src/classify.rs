//! Line classification and field extraction.
//!
//! Every function here is total: malformed input never errors, it simply
//! fails a predicate and falls through to [`LineKind::Notes`].

use std::num::IntErrorKind;

/// Lines starting with this marker end the parseable part of a log.
pub const SEPARATOR: &str = "--------";

/// What a single log line means to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Opens a new entry (`9:00 / project` or a bare clock time).
    Start,
    /// A bare positive number of elapsed hours closing the open entry.
    End,
    /// Free text attached to the open entry.
    Notes,
}

/// Classifies a line. Start wins over End, everything else is Notes.
pub fn classify(line: &str) -> LineKind {
    if is_start_line(line) {
        LineKind::Start
    } else if is_end_line(line) {
        LineKind::End
    } else {
        LineKind::Notes
    }
}

/// Returns true for lines beginning with the section separator.
pub fn is_separator(line: &str) -> bool {
    line.starts_with(SEPARATOR)
}

/// Parses a clock time of the shape `H:MM` / `HH:MM` into `(hour, minute)`.
///
/// Any non-negative magnitude is accepted; `25:99` is a valid clock time
/// here. Strings of two characters or fewer are rejected so a lone digit
/// never reads as a time.
pub fn parse_clock_time(text: &str) -> Option<(i64, i64)> {
    if text.chars().count() <= 2 {
        return None;
    }

    let (hour, minute) = text.split_once(':')?;
    if minute.contains(':') {
        return None;
    }

    Some((parse_clock_part(hour)?, parse_clock_part(minute)?))
}

/// Predicate form of [`parse_clock_time`].
pub fn is_clock_time(text: &str) -> bool {
    parse_clock_time(text).is_some()
}

/// Parses one side of a clock time. Digit runs too long for `i64` saturate,
/// so an absurd hour still reads as a time rather than as a note.
fn parse_clock_part(part: &str) -> Option<i64> {
    let value = match part.trim().parse::<i64>() {
        Ok(value) => value,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(_) => return None,
    };
    (value >= 0).then_some(value)
}

/// Parses a bare positive number of hours (`1`, `1.5`, ` 2 `).
pub fn parse_elapsed_hours(line: &str) -> Option<f64> {
    line.trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| *hours > 0.0)
}

/// True when the line opens a new entry.
pub fn is_start_line(line: &str) -> bool {
    let head_is_time = line
        .split_once('/')
        .is_some_and(|(head, _)| is_clock_time(head));

    head_is_time || is_clock_time(line)
}

/// True when the line is a bare positive hour count.
pub fn is_end_line(line: &str) -> bool {
    parse_elapsed_hours(line).is_some()
}

/// The time part of a start line.
///
/// Lines without a `/` are returned whole (a bare `9:30` is its own time).
pub fn start_time(line: &str) -> &str {
    match line.split_once('/') {
        Some((head, _)) => head.trim(),
        None => line,
    }
}

/// The project label of a start line.
///
/// Segments after the first `/` are concatenated; anything after a comma
/// belongs to the inline note instead.
pub fn project(line: &str) -> String {
    let title: String = line.split('/').skip(1).collect();
    let title = title.trim();

    match title.split_once(',') {
        Some((head, _)) => head.trim().to_string(),
        None => title.to_string(),
    }
}

/// The note written after the first comma of a start line, if any.
pub fn inline_note(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(',')?;
    let note: String = rest.split(',').collect();
    let note = note.trim().replace('\n', "");

    if note.is_empty() { None } else { Some(note) }
}
