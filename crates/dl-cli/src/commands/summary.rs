//! Summary command: totals per project and overall.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use dl_core::{ParsedLog, Summary};

pub fn run<W: Write>(writer: &mut W, parsed: &ParsedLog, json: bool) -> Result<()> {
    let summary = Summary::from_entries(&parsed.entries);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(())
}

/// Formats the human-readable totals block.
pub fn format_summary(summary: &Summary) -> String {
    let mut output = String::new();

    writeln!(output, "Logs count: {}", summary.entry_count).unwrap();
    writeln!(output, "Project switches: {}", summary.project_switches).unwrap();
    for project in &summary.by_project {
        writeln!(output, "- {}: {}", project.project, project.hours).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output, "Total hours: {}", summary.total_hours).unwrap();

    output
}
