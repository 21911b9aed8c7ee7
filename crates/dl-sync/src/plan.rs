//! Turning parsed entries into backend worklogs.
//!
//! Planning is pure: it decides what would be sent where, and the
//! [`Submitter`](crate::Submitter) performs the HTTP calls.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use dl_core::WorkEntry;
use dl_core::clock::shift_clock;
use dl_core::notes::{is_meeting, join_notes};
use thiserror::Error;

use crate::settings::{
    InternalProject, JiraAccount, JiraProject, ProjectSettings, RedmineSettings,
};

/// Why an entry could not be planned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("project key \"{0}\" not found in configuration")]
    UnknownProject(String),
    #[error("entry {project} at {start} has no usable duration")]
    MissingTime { project: String, start: String },
    #[error("entry {project} at {start} has a non-positive duration")]
    NonPositiveTime { project: String, start: String },
    #[error("start time \"{0}\" is not a valid time of day")]
    InvalidStart(String),
    #[error("UTC offset {0}h is out of range")]
    InvalidUtcOffset(i32),
}

/// Redmine time entry activity: meetings are non-dev, everything else dev.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Dev,
    NonDev,
}

impl Activity {
    /// Redmine activity id.
    pub const fn id(self) -> u32 {
        match self {
            Self::Dev => 9,
            Self::NonDev => 14,
        }
    }
}

/// A report for the internal API.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalReport {
    pub date: NaiveDate,
    /// Start time in the log's local time.
    pub time: NaiveTime,
    pub project_id: u64,
    pub duration: f64,
    pub comment: String,
}

/// A Redmine time entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RedmineTimeEntry {
    pub redmine: RedmineSettings,
    pub issue_id: String,
    pub activity: Activity,
    pub spent_on: NaiveDate,
    pub hours: f64,
    pub comments: String,
}

/// A Jira issue worklog.
#[derive(Debug, Clone, PartialEq)]
pub struct JiraWorklog {
    pub account: JiraAccount,
    pub issue: String,
    pub started: DateTime<FixedOffset>,
    pub time_spent_seconds: i64,
    pub comment: String,
}

/// One unit of work to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Worklog {
    Internal(InternalReport),
    Redmine(RedmineTimeEntry),
    Jira(JiraWorklog),
}

impl Worklog {
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Internal(_) => "internal",
            Self::Redmine(_) => "redmine",
            Self::Jira(_) => "jira",
        }
    }
}

/// Result of planning a whole log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub worklogs: Vec<Worklog>,
    /// Entries left out, by index into the input.
    pub skipped: Vec<(usize, PlanError)>,
}

/// Plans every entry, logging and collecting the ones that cannot be synced.
pub fn plan(
    entries: &[WorkEntry],
    date: NaiveDate,
    projects: &BTreeMap<String, ProjectSettings>,
) -> Plan {
    let mut plan = Plan::default();
    for (idx, entry) in entries.iter().enumerate() {
        match plan_entry(entry, date, projects) {
            Ok(worklogs) => plan.worklogs.extend(worklogs),
            Err(err) => {
                tracing::error!(%err, start = %entry.start, "entry skipped");
                plan.skipped.push((idx, err));
            }
        }
    }
    plan
}

/// Plans the worklogs for a single entry.
pub fn plan_entry(
    entry: &WorkEntry,
    date: NaiveDate,
    projects: &BTreeMap<String, ProjectSettings>,
) -> Result<Vec<Worklog>, PlanError> {
    let key = entry.project_key();
    let settings = projects
        .get(&key)
        .ok_or_else(|| PlanError::UnknownProject(key.clone()))?;

    let hours = entry.hours().ok_or_else(|| PlanError::MissingTime {
        project: key.clone(),
        start: entry.start.clone(),
    })?;
    if hours <= 0.0 {
        return Err(PlanError::NonPositiveTime {
            project: key,
            start: entry.start.clone(),
        });
    }

    let time = local_start(&entry.start, settings.hour_offset())?;
    let note = join_notes(&entry.notes);

    match settings {
        ProjectSettings::Internal(project) => Ok(plan_internal(project, date, time, hours, note)),
        ProjectSettings::Jira(project) => {
            plan_jira(project, date, time, hours, note).map(|log| vec![log])
        }
    }
}

/// Applies the project's hour offset and validates the time of day.
fn local_start(start: &str, hour_offset: i64) -> Result<NaiveTime, PlanError> {
    shift_clock(start, hour_offset)
        .and_then(|shifted| NaiveTime::parse_from_str(&shifted, "%H:%M").ok())
        .ok_or_else(|| PlanError::InvalidStart(start.to_string()))
}

fn plan_internal(
    project: &InternalProject,
    date: NaiveDate,
    time: NaiveTime,
    hours: f64,
    note: String,
) -> Vec<Worklog> {
    let mut task = project.main_task.clone();
    let mut activity = Activity::Dev;
    let meet_task = project
        .meet_task
        .as_ref()
        .filter(|_| task.is_some() && is_meeting(&note));
    if let Some(meet_task) = meet_task {
        task = Some(meet_task.clone());
        activity = Activity::NonDev;
    }

    let comment = match (&task, project.format_note) {
        (Some(task), true) => format!("#{task} {note}"),
        _ => note.clone(),
    };

    let mut worklogs = vec![Worklog::Internal(InternalReport {
        date,
        time,
        project_id: project.id,
        duration: hours,
        comment,
    })];

    if let Some(redmine) = &project.redmine {
        match task {
            Some(issue_id) => worklogs.push(Worklog::Redmine(RedmineTimeEntry {
                redmine: redmine.clone(),
                issue_id,
                activity,
                spent_on: date,
                hours,
                comments: note,
            })),
            None => tracing::warn!(
                project = project.id,
                "redmine mirror configured without a task, not mirrored"
            ),
        }
    }

    worklogs
}

fn plan_jira(
    project: &JiraProject,
    date: NaiveDate,
    time: NaiveTime,
    hours: f64,
    note: String,
) -> Result<Worklog, PlanError> {
    let issue = match &project.meet_task {
        Some(meet_task) if is_meeting(&note) => meet_task.clone(),
        _ => project.main_task.clone(),
    };

    let offset = project
        .utc_offset
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or(PlanError::InvalidUtcOffset(project.utc_offset))?;
    let started = offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(PlanError::InvalidUtcOffset(project.utc_offset))?;

    Ok(Worklog::Jira(JiraWorklog {
        account: project.account(),
        issue,
        started,
        time_spent_seconds: hours_to_seconds(hours),
        comment: note,
    }))
}

#[allow(clippy::cast_possible_truncation)]
fn hours_to_seconds(hours: f64) -> i64 {
    (hours * 3600.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: &str, project: &str, notes: &[&str], time: Option<&str>) -> WorkEntry {
        WorkEntry {
            start: start.to_string(),
            project: project.to_string(),
            notes: notes.iter().map(|n| (*n).to_string()).collect(),
            time: time.map(str::to_string),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 2, 17).unwrap()
    }

    fn internal_project() -> InternalProject {
        InternalProject {
            id: 17,
            main_task: Some("1234".to_string()),
            meet_task: Some("1240".to_string()),
            format_note: true,
            redmine: Some(RedmineSettings {
                url: "https://redmine.local".to_string(),
                api_key: "rm-key".to_string(),
            }),
            hour_offset: 0,
        }
    }

    fn jira_project() -> JiraProject {
        JiraProject {
            url: "https://acme.atlassian.net".to_string(),
            user: "me@acme.io".to_string(),
            api_key: "jira-key".to_string(),
            main_task: "OPS-1".to_string(),
            meet_task: Some("OPS-2".to_string()),
            utc_offset: 2,
            hour_offset: -1,
        }
    }

    fn projects() -> BTreeMap<String, ProjectSettings> {
        BTreeMap::from([
            (
                "intra".to_string(),
                ProjectSettings::Internal(internal_project()),
            ),
            ("acme".to_string(), ProjectSettings::Jira(jira_project())),
        ])
    }

    #[test]
    fn internal_entry_with_redmine_mirror() {
        let worklogs = plan_entry(
            &entry("9:00", "Intra", &["- fixed login", "deploy"], Some("1.5")),
            date(),
            &projects(),
        )
        .unwrap();

        assert_eq!(
            worklogs,
            vec![
                Worklog::Internal(InternalReport {
                    date: date(),
                    time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    project_id: 17,
                    duration: 1.5,
                    comment: "#1234 fixed login; deploy".to_string(),
                }),
                Worklog::Redmine(RedmineTimeEntry {
                    redmine: RedmineSettings {
                        url: "https://redmine.local".to_string(),
                        api_key: "rm-key".to_string(),
                    },
                    issue_id: "1234".to_string(),
                    activity: Activity::Dev,
                    spent_on: date(),
                    hours: 1.5,
                    comments: "fixed login; deploy".to_string(),
                }),
            ]
        );
    }

    #[test]
    fn internal_meeting_routes_to_meet_task() {
        let worklogs = plan_entry(
            &entry("14:00", "intra", &["sprint meeting"], Some("1")),
            date(),
            &projects(),
        )
        .unwrap();

        let Worklog::Redmine(redmine) = &worklogs[1] else {
            panic!("expected redmine entry");
        };
        assert_eq!(redmine.issue_id, "1240");
        assert_eq!(redmine.activity, Activity::NonDev);
        assert_eq!(redmine.activity.id(), 14);
    }

    #[test]
    fn dev_activity_uses_redmine_dev_id() {
        assert_eq!(Activity::Dev.id(), 9);
    }

    #[test]
    fn internal_without_task_skips_mirror() {
        let mut project = internal_project();
        project.main_task = None;
        let projects = BTreeMap::from([("intra".to_string(), ProjectSettings::Internal(project))]);

        let worklogs =
            plan_entry(&entry("9:00", "intra", &["x"], Some("1")), date(), &projects).unwrap();
        assert_eq!(worklogs.len(), 1);
        let Worklog::Internal(report) = &worklogs[0] else {
            panic!("expected internal report");
        };
        assert_eq!(report.comment, "x");
    }

    #[test]
    fn jira_entry_uses_offsets() {
        let worklogs = plan_entry(
            &entry("10:30", "ACME", &["code review"], Some("0.5")),
            date(),
            &projects(),
        )
        .unwrap();

        let Worklog::Jira(worklog) = &worklogs[0] else {
            panic!("expected jira worklog");
        };
        assert_eq!(worklog.issue, "OPS-1");
        assert_eq!(worklog.time_spent_seconds, 1800);
        assert_eq!(worklog.started.to_rfc3339(), "2023-02-17T09:30:00+02:00");
        assert_eq!(worklog.comment, "code review");
    }

    #[test]
    fn jira_meeting_uses_meet_task() {
        let worklogs = plan_entry(
            &entry("11:00", "acme", &["discussion with PM"], Some("1")),
            date(),
            &projects(),
        )
        .unwrap();
        let Worklog::Jira(worklog) = &worklogs[0] else {
            panic!("expected jira worklog");
        };
        assert_eq!(worklog.issue, "OPS-2");
    }

    #[test]
    fn unknown_project_is_an_error() {
        let err = plan_entry(&entry("9:00", "Other", &[], Some("1")), date(), &projects())
            .unwrap_err();
        assert_eq!(err, PlanError::UnknownProject("other".to_string()));
        assert_eq!(
            err.to_string(),
            "project key \"other\" not found in configuration"
        );
    }

    #[test]
    fn missing_or_negative_time_is_an_error() {
        let err = plan_entry(&entry("9:00", "intra", &[], None), date(), &projects()).unwrap_err();
        assert!(matches!(err, PlanError::MissingTime { .. }));

        let err = plan_entry(&entry("23:00", "intra", &[], Some("-22")), date(), &projects())
            .unwrap_err();
        assert!(matches!(err, PlanError::NonPositiveTime { .. }));
    }

    #[test]
    fn out_of_range_start_is_an_error() {
        let err =
            plan_entry(&entry("9:75", "intra", &[], Some("1")), date(), &projects()).unwrap_err();
        assert_eq!(err, PlanError::InvalidStart("9:75".to_string()));
    }

    #[test]
    fn plan_collects_skipped_entries() {
        let entries = [
            entry("9:00", "intra", &[], Some("1")),
            entry("10:00", "nobody", &[], Some("1")),
            entry("11:00", "acme", &[], Some("1")),
        ];
        let plan = plan(&entries, date(), &projects());

        let backends: Vec<_> = plan.worklogs.iter().map(Worklog::backend).collect();
        assert_eq!(backends, vec!["internal", "redmine", "jira"]);
        assert_eq!(
            plan.skipped,
            vec![(1, PlanError::UnknownProject("nobody".to_string()))]
        );
    }
}
