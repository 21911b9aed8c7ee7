//! Worklog sync for daily logs.
//!
//! Pushes parsed entries to the time tracking backends a project is
//! configured for:
//! - the internal reporting API (optionally mirrored to Redmine)
//! - Jira issue worklogs

mod internal;
mod jira;
pub mod plan;
mod redmine;
pub mod settings;
mod submit;

use thiserror::Error;

pub use plan::{Plan, PlanError, Worklog, plan};
pub use settings::{InternalApiSettings, ProjectSettings};
pub use submit::{SubmitReport, Submitter};

/// Sync errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Backend answered with a non-success status.
    #[error("{backend} API error (status {status}): {message}")]
    Api {
        backend: &'static str,
        status: u16,
        message: String,
    },
    /// An internal report was planned but no internal API is configured.
    #[error("internal API settings are not configured")]
    MissingInternalSettings,
}
