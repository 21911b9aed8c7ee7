//! Redmine time entries.

use serde::Serialize;

use crate::SyncError;
use crate::plan::RedmineTimeEntry;
use crate::submit::ensure_success;

const API_KEY_HEADER: &str = "X-Redmine-API-Key";

#[derive(Debug, Serialize)]
struct TimeEntryRequest<'a> {
    time_entry: TimeEntryBody<'a>,
}

#[derive(Debug, Serialize)]
struct TimeEntryBody<'a> {
    issue_id: &'a str,
    spent_on: String,
    hours: f64,
    activity_id: u32,
    comments: &'a str,
}

pub(crate) async fn create_time_entry(
    http: &reqwest::Client,
    entry: &RedmineTimeEntry,
) -> Result<(), SyncError> {
    let url = format!(
        "{}/time_entries.json",
        entry.redmine.url.trim_end_matches('/')
    );
    let response = http
        .post(url)
        .header(API_KEY_HEADER, &entry.redmine.api_key)
        .json(&request_body(entry))
        .send()
        .await?;

    ensure_success("redmine", response).await
}

fn request_body(entry: &RedmineTimeEntry) -> TimeEntryRequest<'_> {
    TimeEntryRequest {
        time_entry: TimeEntryBody {
            issue_id: &entry.issue_id,
            spent_on: entry.spent_on.format("%Y-%m-%d").to_string(),
            hours: entry.hours,
            activity_id: entry.activity.id(),
            comments: &entry.comments,
        },
    }
}
