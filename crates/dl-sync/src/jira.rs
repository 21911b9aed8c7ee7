//! Jira issue worklogs (REST API v2).

use serde::Serialize;

use crate::SyncError;
use crate::plan::JiraWorklog;
use crate::submit::ensure_success;

/// Jira insists on milliseconds and a colon-less offset.
const STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WorklogBody<'a> {
    comment: &'a str,
    started: String,
    time_spent_seconds: i64,
}

pub(crate) async fn add_worklog(
    http: &reqwest::Client,
    worklog: &JiraWorklog,
) -> Result<(), SyncError> {
    let response = http
        .post(worklog_url(&worklog.account.url, &worklog.issue))
        .basic_auth(&worklog.account.user, Some(&worklog.account.api_key))
        .json(&worklog_body(worklog))
        .send()
        .await?;

    ensure_success("jira", response).await
}

fn worklog_url(base: &str, issue: &str) -> String {
    format!(
        "{}/rest/api/2/issue/{issue}/worklog",
        base.trim_end_matches('/')
    )
}

fn worklog_body(worklog: &JiraWorklog) -> WorklogBody<'_> {
    WorklogBody {
        comment: &worklog.comment,
        started: worklog.started.format(STARTED_FORMAT).to_string(),
        time_spent_seconds: worklog.time_spent_seconds,
    }
}
