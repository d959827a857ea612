//! Jira adapter. Implements IssueSource via the Jira Cloud REST API (v3).

use super::response::{build_client, fetch_json, id_as_string};
use crate::domain::{DomainError, IssueMetadata, RequestData};
use crate::ports::IssueSource;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const DEFAULT_JIRA_BASE_URL: &str = "https://saritasa.atlassian.net";
const ISSUE_PATH: &str = "rest/api/3/issue";
const ISSUE_FIELDS: &str = "summary,timespent,project";
const SERVICE: &str = "jira";

/// Jira API adapter for looking up issue metadata.
///
/// Authenticates with basic auth built from the account email and API token.
pub struct JiraAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl JiraAdapter {
    /// Create a new Jira adapter.
    ///
    /// # Arguments
    /// * `base_url` - Site root, e.g. `https://your-site.atlassian.net`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    fn issue_url(&self, issue_key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            ISSUE_PATH,
            issue_key
        )
    }
}

/// `Basic <base64(email:token)>`.
pub fn basic_auth_header(email: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", email, token)))
}

#[derive(Deserialize)]
struct JiraIssue {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(default)]
    key: Option<String>,
    fields: JiraFields,
}

#[derive(Deserialize)]
struct JiraFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    timespent: Option<u64>,
    project: JiraProject,
}

#[derive(Deserialize)]
struct JiraProject {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    name: String,
}

impl JiraIssue {
    fn into_metadata(self, requested_key: &str) -> IssueMetadata {
        IssueMetadata {
            id: self.id,
            key: self.key.unwrap_or_else(|| requested_key.to_string()),
            summary: self.fields.summary,
            tracked_seconds: self.fields.timespent,
            project_name: self.fields.project.name,
            project_id: self.fields.project.id,
        }
    }
}

#[async_trait::async_trait]
impl IssueSource for JiraAdapter {
    async fn fetch_issue(
        &self,
        issue_key: &str,
        request: &RequestData,
        cancel: &CancellationToken,
    ) -> Result<IssueMetadata, DomainError> {
        let url = self.issue_url(issue_key);
        debug!(url = %url, "fetching jira issue");

        let builder = self
            .client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                basic_auth_header(request.email(), request.jira_token()),
            )
            .query(&[("fields", ISSUE_FIELDS)]);

        let issue: JiraIssue = fetch_json(SERVICE, builder, cancel).await?;
        let metadata = issue.into_metadata(issue_key);

        debug!(
            issue = %metadata.key,
            project_id = %metadata.project_id,
            "jira issue received"
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request() -> RequestData {
        RequestData {
            tempo_token: Some("tempo-secret".into()),
            email: Some("me@x.com".into()),
            jira_token: Some("jira-secret".into()),
        }
    }

    async fn serve(server: &mut mockito::Server, status: usize, body: &str) -> mockito::Mock {
        server
            .mock("GET", "/rest/api/3/issue/KEY-1")
            .match_header(
                "authorization",
                basic_auth_header("me@x.com", "jira-secret").as_str(),
            )
            .match_query(Matcher::UrlEncoded("fields".into(), ISSUE_FIELDS.into()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    #[test]
    fn test_basic_auth_header() {
        // base64("me@x.com:jira-secret")
        assert_eq!(
            basic_auth_header("me@x.com", "jira-secret"),
            "Basic bWVAeC5jb206amlyYS1zZWNyZXQ="
        );
    }

    #[tokio::test]
    async fn test_fetch_issue_decodes_metadata() {
        let mut server = mockito::Server::new_async().await;
        let mock = serve(
            &mut server,
            200,
            r#"{"id":"10001","key":"KEY-1","fields":{
                "summary":"Fix login","timespent":7200,
                "project":{"id":"1","key":"CORE","name":"Core"}}}"#,
        )
        .await;

        let adapter = JiraAdapter::new(server.url(), Duration::from_secs(5)).unwrap();
        let meta = adapter
            .fetch_issue("KEY-1", &request(), &CancellationToken::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            meta,
            IssueMetadata {
                id: "10001".into(),
                key: "KEY-1".into(),
                summary: "Fix login".into(),
                tracked_seconds: Some(7200),
                project_name: "Core".into(),
                project_id: "1".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_null_timespent_and_numeric_ids() {
        let mut server = mockito::Server::new_async().await;
        let _mock = serve(
            &mut server,
            200,
            r#"{"id":10001,"fields":{"summary":"New","timespent":null,"project":{"id":1,"name":"Core"}}}"#,
        )
        .await;

        let adapter = JiraAdapter::new(server.url(), Duration::from_secs(5)).unwrap();
        let meta = adapter
            .fetch_issue("KEY-1", &request(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(meta.id, "10001");
        assert_eq!(meta.key, "KEY-1");
        assert_eq!(meta.tracked_seconds, None);
        assert_eq!(meta.project_id, "1");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let mut server = mockito::Server::new_async().await;
        let _mock = serve(&mut server, 401, "Client must be authenticated").await;

        let adapter = JiraAdapter::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = adapter
            .fetch_issue("KEY-1", &request(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Authentication { service: "jira", .. }));
    }

    #[tokio::test]
    async fn test_not_found_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        let _mock = serve(&mut server, 404, r#"{"errorMessages":["Issue does not exist"]}"#).await;

        let adapter = JiraAdapter::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = adapter
            .fetch_issue("KEY-1", &request(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upstream { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_missing_project_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = serve(&mut server, 200, r#"{"id":"10001","fields":{"summary":"x"}}"#).await;

        let adapter = JiraAdapter::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = adapter
            .fetch_issue("KEY-1", &request(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse { service: "jira", .. }));
    }
}
