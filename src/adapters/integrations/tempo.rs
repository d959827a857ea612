//! Tempo adapter. Implements WorklogSource via the Tempo Core REST API (v3).

use super::response::{build_client, fetch_json, id_as_string, opt_id_as_string};
use crate::domain::{DomainError, RequestData, WorklogEntry};
use crate::ports::WorklogSource;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const DEFAULT_TEMPO_BASE_URL: &str = "https://api.tempo.io";
const WORKLOGS_PATH: &str = "core/3/worklogs";
const SERVICE: &str = "tempo";

/// Tempo API adapter for listing a day's worklogs.
///
/// Authenticates with the personal Tempo token as a bearer token.
pub struct TempoAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl TempoAdapter {
    /// Create a new Tempo adapter.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://api.tempo.io` (a mock server in tests)
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    fn worklogs_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), WORKLOGS_PATH)
    }
}

/// Tempo worklog list response.
#[derive(Deserialize)]
struct TempoWorklogs {
    results: Vec<TempoWorklog>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TempoWorklog {
    #[serde(default, deserialize_with = "opt_id_as_string")]
    tempo_worklog_id: Option<String>,
    issue: TempoIssueRef,
    time_spent_seconds: u64,
    #[serde(default)]
    start_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct TempoIssueRef {
    key: String,
    #[serde(deserialize_with = "id_as_string")]
    id: String,
}

impl TempoWorklog {
    fn into_entry(self) -> WorklogEntry {
        WorklogEntry {
            worklog_id: self.tempo_worklog_id,
            issue_key: self.issue.key,
            issue_id: self.issue.id,
            seconds: self.time_spent_seconds,
            start_date: self.start_date,
        }
    }
}

#[async_trait::async_trait]
impl WorklogSource for TempoAdapter {
    async fn fetch_worklogs(
        &self,
        date: NaiveDate,
        request: &RequestData,
        cancel: &CancellationToken,
    ) -> Result<Vec<WorklogEntry>, DomainError> {
        let day = date.format("%Y-%m-%d").to_string();
        let url = self.worklogs_url();
        debug!(url = %url, date = %day, "fetching tempo worklogs");

        let builder = self
            .client
            .get(&url)
            .bearer_auth(request.tempo_token())
            .query(&[("from", day.as_str()), ("to", day.as_str())]);

        let worklogs: TempoWorklogs = fetch_json(SERVICE, builder, cancel).await?;

        info!(date = %day, count = worklogs.results.len(), "tempo worklogs received");
        Ok(worklogs.results.into_iter().map(TempoWorklog::into_entry).collect())
    }
}
