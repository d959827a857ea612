//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, IssueMetadata, RequestData, WorklogEntry};
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

/// Time-tracking service (Tempo). Lists worklogs of the authenticated user.
#[async_trait::async_trait]
pub trait WorklogSource: Send + Sync {
    /// Fetch all worklogs for the single day `date` (both bounds equal `date`).
    ///
    /// # Errors
    /// `Authentication` on 401, `Upstream` on any other non-200,
    /// `MalformedResponse` when a 200 body cannot be decoded,
    /// `Cancelled` when `cancel` fires while the request is in flight.
    async fn fetch_worklogs(
        &self,
        date: NaiveDate,
        request: &RequestData,
        cancel: &CancellationToken,
    ) -> Result<Vec<WorklogEntry>, DomainError>;
}

/// Issue tracker (Jira). Looks up one issue by key.
#[async_trait::async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch metadata for `issue_key`. Same error classification as [`WorklogSource`].
    async fn fetch_issue(
        &self,
        issue_key: &str,
        request: &RequestData,
        cancel: &CancellationToken,
    ) -> Result<IssueMetadata, DomainError>;
}
