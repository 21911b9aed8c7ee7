//! Reading the daily log from a file or stdin.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use dl_core::ParsedLog;

use crate::cli::InputArgs;

/// Parses the log named by `input`, falling back to piped stdin.
pub fn read_log(input: &InputArgs) -> Result<ParsedLog> {
    if let Some(path) = &input.file {
        tracing::info!(path = %path.display(), "parsing log file");
        return dl_core::parse_file(path)
            .with_context(|| format!("failed to parse {}", path.display()));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("no input file given (pass a path or pipe the log on stdin)");
    }

    tracing::info!("reading log stream from stdin");
    dl_core::parse_reader(stdin.lock()).context("failed to read log from stdin")
}
