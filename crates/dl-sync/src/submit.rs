//! Submitting planned worklogs over HTTP.

use std::fmt;
use std::time::Duration;

use crate::SyncError;
use crate::plan::Worklog;
use crate::settings::InternalApiSettings;
use crate::{internal, jira, redmine};

/// Default request timeout for backend calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of submitting a batch of worklogs.
#[derive(Debug, Default)]
pub struct SubmitReport {
    pub submitted: usize,
    /// Failures by index into the submitted batch.
    pub failed: Vec<(usize, SyncError)>,
}

/// Sends worklogs to their backends, or only logs them in dry-run mode.
///
/// Submissions run one at a time; a failure is recorded and the batch
/// continues.
pub struct Submitter {
    http: reqwest::Client,
    internal: Option<InternalApiSettings>,
    dry_run: bool,
}

impl fmt::Debug for Submitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submitter")
            .field("internal", &self.internal)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl Submitter {
    /// Creates a submitter. Internal reports need `internal` settings.
    pub fn new(internal: Option<InternalApiSettings>, dry_run: bool) -> Result<Self, SyncError> {
        let accept_invalid_certs = internal
            .as_ref()
            .is_some_and(|settings| settings.accept_invalid_certs);

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(SyncError::ClientBuild)?;

        Ok(Self {
            http,
            internal,
            dry_run,
        })
    }

    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Submits one worklog.
    pub async fn submit(&self, worklog: &Worklog) -> Result<(), SyncError> {
        if self.dry_run {
            tracing::info!(backend = worklog.backend(), ?worklog, "dry run, not submitted");
            return Ok(());
        }

        match worklog {
            Worklog::Internal(report) => {
                let settings = self
                    .internal
                    .as_ref()
                    .ok_or(SyncError::MissingInternalSettings)?;
                internal::create_report(&self.http, settings, report).await
            }
            Worklog::Redmine(entry) => redmine::create_time_entry(&self.http, entry).await,
            Worklog::Jira(worklog) => jira::add_worklog(&self.http, worklog).await,
        }
    }

    /// Submits every worklog in order.
    pub async fn submit_all(&self, worklogs: &[Worklog]) -> SubmitReport {
        let mut report = SubmitReport::default();
        for (idx, worklog) in worklogs.iter().enumerate() {
            match self.submit(worklog).await {
                Ok(()) => {
                    tracing::debug!(backend = worklog.backend(), "worklog submitted");
                    report.submitted += 1;
                }
                Err(err) => {
                    tracing::error!(backend = worklog.backend(), %err, "worklog failed");
                    report.failed.push((idx, err));
                }
            }
        }
        report
    }
}

/// Maps non-success responses to [`SyncError::Api`].
pub(crate) async fn ensure_success(
    backend: &'static str,
    response: reqwest::Response,
) -> Result<(), SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let message = response.text().await.unwrap_or_default();
    Err(SyncError::Api {
        backend,
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveTime};

    use crate::plan::InternalReport;

    fn internal_report() -> Worklog {
        Worklog::Internal(InternalReport {
            date: NaiveDate::from_ymd_opt(2023, 2, 17).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            project_id: 17,
            duration: 1.0,
            comment: "review".to_string(),
        })
    }

    #[test]
    fn debug_hides_http_client() {
        let submitter = Submitter::new(None, true).unwrap();
        let debug = format!("{submitter:?}");
        assert!(debug.contains("dry_run: true"));
    }

    #[tokio::test]
    async fn dry_run_submits_nothing() {
        let submitter = Submitter::new(None, true).unwrap();
        let report = submitter
            .submit_all(&[internal_report(), internal_report()])
            .await;
        assert_eq!(report.submitted, 2);
        assert!(report.failed.is_empty());
    }

    #[tokio::test]
    async fn internal_report_needs_settings() {
        let submitter = Submitter::new(None, false).unwrap();
        let report = submitter.submit_all(&[internal_report()]).await;
        assert_eq!(report.submitted, 0);
        assert!(matches!(
            report.failed.as_slice(),
            [(0, SyncError::MissingInternalSettings)]
        ));
    }
}
