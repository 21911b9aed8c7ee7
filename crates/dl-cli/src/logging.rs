//! Tracing setup: human logs on stderr plus an optional per-run debug file.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const RUN_LOG_STAMP: &str = "%m.%d.%Y-%H.%M.%S";

/// Filter for the stderr layer: `debug` when verbose, else `RUST_LOG` or `info`.
pub fn stderr_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// File name of the debug log for a run started at `started`.
pub fn run_log_name(started: DateTime<Local>) -> String {
    format!("{}.log", started.format(RUN_LOG_STAMP))
}

/// Installs the global subscriber.
///
/// With `run_log_dir`, every event at debug level and above is also written
/// to a fresh timestamped file in that directory. Keep the returned guard
/// alive until the command finishes; dropping it flushes the file.
pub fn init(verbose: bool, run_log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(stderr_filter(verbose));

    let (file_layer, guard) = match run_log_dir {
        Some(dir) => {
            let (writer, guard) = run_log_writer(dir)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}

fn run_log_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(run_log_name(Local::now()))
        .build(dir)
        .with_context(|| format!("failed to open run log in {}", dir.display()))?;

    Ok(tracing_appender::non_blocking(appender))
}
