//! Backend settings, usually loaded from the `dl` config file.

use std::fmt;

use serde::{Deserialize, Serialize};

const fn default_internal_hour_offset() -> i64 {
    2
}

const fn default_jira_utc_offset() -> i32 {
    2
}

/// Credentials and endpoint of the internal reporting API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalApiSettings {
    /// Report endpoint; query parameters are appended.
    pub url: String,
    /// Pre-encoded HTTP basic auth token.
    pub auth: String,
    pub user: String,
    pub password: String,
    /// Numeric user id the reports are filed under.
    pub user_id: String,
    /// Hours added to report times; the API runs in another timezone.
    #[serde(default = "default_internal_hour_offset")]
    pub hour_offset: i64,
    /// Skip TLS certificate verification (the API uses a self-signed cert).
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl fmt::Debug for InternalApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalApiSettings")
            .field("url", &self.url)
            .field("auth", &"[REDACTED]")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("hour_offset", &self.hour_offset)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

/// A Redmine instance that mirrors internal reports.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedmineSettings {
    pub url: String,
    pub api_key: String,
}

impl fmt::Debug for RedmineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedmineSettings")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Jira site and credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraAccount {
    pub url: String,
    pub user: String,
    pub api_key: String,
}

impl fmt::Debug for JiraAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraAccount")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Where a project's hours are reported, keyed by lower-cased project name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum ProjectSettings {
    Internal(InternalProject),
    Jira(JiraProject),
}

impl ProjectSettings {
    /// Hours to shift this project's start times by before reporting.
    pub const fn hour_offset(&self) -> i64 {
        match self {
            Self::Internal(project) => project.hour_offset,
            Self::Jira(project) => project.hour_offset,
        }
    }
}

/// A project reported through the internal API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalProject {
    /// Internal report project id.
    pub id: u64,
    /// Task booked for regular work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_task: Option<String>,
    /// Task booked when the notes describe a meeting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_task: Option<String>,
    /// Prefix report comments with `#<task>`.
    #[serde(default)]
    pub format_note: bool,
    /// Also file a Redmine time entry for the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redmine: Option<RedmineSettings>,
    #[serde(default)]
    pub hour_offset: i64,
}

/// A project reported as Jira worklogs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraProject {
    pub url: String,
    pub user: String,
    pub api_key: String,
    /// Issue key for regular work, e.g. `OPS-12`.
    pub main_task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_task: Option<String>,
    /// UTC offset (hours) of the log's local time.
    #[serde(default = "default_jira_utc_offset")]
    pub utc_offset: i32,
    #[serde(default)]
    pub hour_offset: i64,
}

impl JiraProject {
    pub fn account(&self) -> JiraAccount {
        JiraAccount {
            url: self.url.clone(),
            user: self.user.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

impl fmt::Debug for JiraProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraProject")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("api_key", &"[REDACTED]")
            .field("main_task", &self.main_task)
            .field("meet_task", &self.meet_task)
            .field("utc_offset", &self.utc_offset)
            .field("hour_offset", &self.hour_offset)
            .finish()
    }
}
