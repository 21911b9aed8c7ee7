//! Parse command: prints the entries of a daily log.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use dl_core::notes::bullet;
use dl_core::{ParsedLog, Summary, WorkEntry};

use crate::commands::summary::format_summary;

pub fn run<W: Write>(writer: &mut W, parsed: &ParsedLog, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&parsed.entries)?)?;
        return Ok(());
    }

    write!(writer, "{}", format_entries(&parsed.entries))?;
    if let Some(entry) = &parsed.unfinished {
        writeln!(
            writer,
            "Unfinished: {} {} (finish time not set)",
            entry.start, entry.project
        )?;
        writeln!(writer)?;
    }
    write!(
        writer,
        "{}",
        format_summary(&Summary::from_entries(&parsed.entries))
    )?;
    Ok(())
}

/// Formats entries as blocks of `start  project  hours` plus bulleted notes.
pub fn format_entries(entries: &[WorkEntry]) -> String {
    let mut output = String::new();

    for entry in entries {
        let time = entry.time.as_deref().unwrap_or("-");
        writeln!(output, "{}  {}  {time}", entry.start, entry.project_key()).unwrap();
        for note in &entry.notes {
            writeln!(output, "  {}", bullet(note)).unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}
