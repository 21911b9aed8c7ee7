//! Sync command for reporting a day's entries to the configured backends.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::Args;
use dl_core::ParsedLog;
use dl_sync::Submitter;

use crate::Config;
use crate::cli::InputArgs;
use crate::commands::input;

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Day the log belongs to (YYYY-MM-DD). Defaults to yesterday.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Log the worklogs that would be sent without contacting any backend.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &SyncArgs, config: &Config) -> Result<()> {
    let parsed = input::read_log(&args.input)?;
    let date = args.date.unwrap_or_else(yesterday);
    tracing::info!(%date, dry_run = args.dry_run, "syncing log");

    sync_log(writer, &parsed, date, args.dry_run, config)
}

/// Plans and submits worklogs for an already parsed log.
pub fn sync_log<W: Write>(
    writer: &mut W,
    parsed: &ParsedLog,
    date: NaiveDate,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let plan = dl_sync::plan(&parsed.entries, date, &config.projects);

    let submitter =
        Submitter::new(config.internal.clone(), dry_run).context("failed to create HTTP client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let report = runtime.block_on(submitter.submit_all(&plan.worklogs));

    let mode = if submitter.is_dry_run() { " (dry run)" } else { "" };
    writeln!(writer, "Sync date: {date}{mode}")?;
    writeln!(writer, "Planned worklogs: {}", plan.worklogs.len())?;
    writeln!(writer, "Skipped entries: {}", plan.skipped.len())?;
    writeln!(writer, "Submitted: {}", report.submitted)?;
    writeln!(writer, "Failed: {}", report.failed.len())?;

    if !report.failed.is_empty() {
        bail!("{} worklog(s) failed to sync", report.failed.len());
    }
    Ok(())
}

fn yesterday() -> NaiveDate {
    Local::now().date_naive() - chrono::Duration::days(1)
}
