//! Internal reporting API.
//!
//! Reports are filed with a single POST whose parameters all travel in the
//! query string, authenticated by both basic auth and login/password params.

use chrono::Duration;
use reqwest::header::AUTHORIZATION;

use crate::SyncError;
use crate::plan::InternalReport;
use crate::settings::InternalApiSettings;
use crate::submit::ensure_success;

pub(crate) async fn create_report(
    http: &reqwest::Client,
    settings: &InternalApiSettings,
    report: &InternalReport,
) -> Result<(), SyncError> {
    let response = http
        .post(&settings.url)
        .header(AUTHORIZATION, format!("Basic {}", settings.auth))
        .query(&report_query(settings, report))
        .send()
        .await?;

    ensure_success("internal", response).await
}

/// Query parameters for `cmd=saveReport`.
pub(crate) fn report_query(
    settings: &InternalApiSettings,
    report: &InternalReport,
) -> Vec<(&'static str, String)> {
    let (time, _) = report
        .time
        .overflowing_add_signed(Duration::hours(settings.hour_offset.rem_euclid(24)));

    vec![
        ("mode", "json".to_string()),
        ("cmd", "saveReport".to_string()),
        ("login", settings.user.clone()),
        ("pswd", settings.password.clone()),
        ("reportDate", report.date.format("%Y-%m-%d").to_string()),
        ("reportTime", time.format("%H:%M:%S").to_string()),
        ("reportUser", settings.user_id.clone()),
        ("reportProject", report.project_id.to_string()),
        ("duration", report.duration.to_string()),
        ("description", escape_html(&report.comment)),
    ]
}

/// The API renders descriptions as HTML.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
