//! Parsed work entries.

use serde::{Deserialize, Serialize};

/// One block of work from a daily log.
///
/// Field names are the contract consumed by reporting and sync: `time` is
/// a decimal string of hours (`"0.5"`, `"2"`) or `null` when the duration
/// could not be derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Time of day the work started, usually `HH:MM`.
    pub start: String,
    /// Project label as written in the log.
    pub project: String,
    /// Annotation lines in the order they appeared.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Duration in hours.
    pub time: Option<String>,
}

impl WorkEntry {
    /// Lower-cased project label used for settings lookup and grouping.
    pub fn project_key(&self) -> String {
        self.project.to_lowercase()
    }

    /// The duration as a number, if present and numeric.
    pub fn hours(&self) -> Option<f64> {
        self.time.as_deref()?.trim().parse().ok()
    }
}
