//! `dl` command implementations.
//!
//! `parse` and `summary` read a daily log from a file or stdin and print its
//! entries or totals. `sync` plans worklogs for a date and submits them,
//! writing a per-run debug log under the configured log directory.

mod cli;
pub mod commands;
mod config;
pub mod logging;

pub use cli::{Cli, Commands, InputArgs};
pub use config::Config;
