//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::sync::SyncArgs;

/// Daily work-log parser.
///
/// Turns free-form daily log files into time entries and reports them to
/// the configured time tracking backends.
#[derive(Debug, Parser)]
#[command(name = "dl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the entries of a daily log followed by its totals.
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print only the totals of a daily log.
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Print totals as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Report a daily log's entries to the configured backends.
    Sync(SyncArgs),
}

/// Where to read the log from.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Log file to parse. Reads stdin when omitted.
    pub file: Option<PathBuf>,
}
