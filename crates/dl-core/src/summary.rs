//! Aggregate statistics over parsed entries.

use serde::Serialize;

use crate::entry::WorkEntry;

/// Hours logged against one project key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHours {
    pub project: String,
    pub hours: f64,
}

/// Totals for a day's log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub entry_count: usize,
    /// Sum of every entry with a numeric duration.
    pub total_hours: f64,
    /// Per lower-cased project, in order of first appearance.
    pub by_project: Vec<ProjectHours>,
    /// How many times consecutive entries changed project.
    pub project_switches: usize,
}

impl Summary {
    pub fn from_entries(entries: &[WorkEntry]) -> Self {
        let mut summary = Self {
            entry_count: entries.len(),
            ..Self::default()
        };
        let mut last_project: Option<String> = None;

        for entry in entries {
            let key = entry.project_key();
            let hours = entry.hours().unwrap_or(0.0);
            summary.total_hours += hours;

            match summary.by_project.iter_mut().find(|p| p.project == key) {
                Some(project) => project.hours += hours,
                None => summary.by_project.push(ProjectHours {
                    project: key.clone(),
                    hours,
                }),
            }

            if last_project.as_ref().is_some_and(|last| *last != key) {
                summary.project_switches += 1;
            }
            last_project = Some(key);
        }

        summary
    }
}
