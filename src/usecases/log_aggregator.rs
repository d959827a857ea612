//! Log aggregation use case: one day's worklogs + issue metadata -> project/task hierarchy.
//!
//! Coordinates the worklog source (time tracking) and the issue source (issue tracker).
//! Any failure aborts the run; no partial hierarchy is ever returned.

use crate::domain::{
    DomainError, IssueMetadata, ProjectRecord, RequestData, TaskRecord, WorklogEntry,
};
use crate::ports::{IssueSource, WorklogSource};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Service reconciling worklogs with issue metadata.
///
/// Orchestrates the flow:
/// 1. Fetch the day's worklogs
/// 2. Fetch metadata for each issue key, strictly one request at a time
/// 3. Merge entries sharing an issue id into one task
/// 4. Group tasks by project id
pub struct LogAggregator {
    worklogs: Arc<dyn WorklogSource>,
    issues: Arc<dyn IssueSource>,
}

impl LogAggregator {
    pub fn new(worklogs: Arc<dyn WorklogSource>, issues: Arc<dyn IssueSource>) -> Self {
        Self { worklogs, issues }
    }

    /// Build the project/task hierarchy for `date`.
    ///
    /// Projects appear in the order their ids are first seen among tasks; tasks
    /// appear in the order their issue ids are first seen among worklogs.
    pub async fn aggregate(
        &self,
        date: NaiveDate,
        request: &RequestData,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProjectRecord>, DomainError> {
        let entries = self.fetch_worklogs_only(date, request, cancel).await?;

        let mut ledger = TaskLedger::default();
        // Same issue key -> same metadata, so each key is fetched once per run.
        let mut metadata_by_key: HashMap<String, IssueMetadata> = HashMap::new();

        for entry in &entries {
            if cancel.is_cancelled() {
                return Err(DomainError::Cancelled);
            }

            if !metadata_by_key.contains_key(&entry.issue_key) {
                let metadata = self
                    .issues
                    .fetch_issue(&entry.issue_key, request, cancel)
                    .await?;
                metadata_by_key.insert(entry.issue_key.clone(), metadata);
            }
            if let Some(metadata) = metadata_by_key.get(&entry.issue_key) {
                ledger.record(entry, metadata);
            }
        }

        let projects = group_into_projects(ledger.into_tasks());
        info!(
            date = %date,
            worklogs = entries.len(),
            issues_fetched = metadata_by_key.len(),
            projects = projects.len(),
            "aggregation complete"
        );
        Ok(projects)
    }

    /// Raw worklogs for `date`, without issue metadata or merging.
    pub async fn fetch_worklogs_only(
        &self,
        date: NaiveDate,
        request: &RequestData,
        cancel: &CancellationToken,
    ) -> Result<Vec<WorklogEntry>, DomainError> {
        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }
        self.worklogs.fetch_worklogs(date, request, cancel).await
    }
}

/// Tasks keyed by issue id, with creation order kept alongside.
#[derive(Debug, Default)]
pub(crate) struct TaskLedger {
    order: Vec<String>,
    by_issue: HashMap<String, TaskRecord>,
}

impl TaskLedger {
    /// Merge one worklog into the ledger. A known issue id only gains seconds.
    pub(crate) fn record(&mut self, entry: &WorklogEntry, metadata: &IssueMetadata) {
        if let Some(task) = self.by_issue.get_mut(&entry.issue_id) {
            task.add_seconds(entry.seconds);
            debug!(issue_id = %entry.issue_id, seconds = entry.seconds, "merged worklog into task");
            return;
        }
        self.order.push(entry.issue_id.clone());
        self.by_issue.insert(
            entry.issue_id.clone(),
            TaskRecord::new(entry.issue_id.clone(), metadata, entry.seconds),
        );
    }

    /// Tasks in creation order.
    pub(crate) fn into_tasks(mut self) -> Vec<TaskRecord> {
        self.order
            .iter()
            .filter_map(|id| self.by_issue.remove(id))
            .collect()
    }
}

/// Group tasks by project id, preserving first-seen order for projects and tasks.
pub(crate) fn group_into_projects(tasks: Vec<TaskRecord>) -> Vec<ProjectRecord> {
    let mut projects: Vec<ProjectRecord> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for task in tasks {
        match index_by_id.get(&task.project_id) {
            Some(&idx) => projects[idx].tasks.push(task),
            None => {
                index_by_id.insert(task.project_id.clone(), projects.len());
                projects.push(ProjectRecord::new(task));
            }
        }
    }
    projects
}
