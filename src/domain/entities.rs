//! Domain entities. Pure data structures for the core business.
//!
//! No Tempo/Jira wire types here — these are mapped from adapters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw time-tracking record for a single issue on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklogEntry {
    pub worklog_id: Option<String>,
    /// Issue key (e.g. `KEY-1`), used to fetch metadata.
    pub issue_key: String,
    /// Issue id, used to merge entries of the same issue.
    pub issue_id: String,
    pub seconds: u64,
    pub start_date: Option<NaiveDate>,
}

/// Issue-tracker view of one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMetadata {
    pub id: String,
    pub key: String,
    pub summary: String,
    /// Cumulative time logged on the issue, as reported by the tracker.
    pub tracked_seconds: Option<u64>,
    pub project_name: String,
    pub project_id: String,
}

/// Reconciled per-issue unit of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub issue_id: String,
    pub issue_key: String,
    pub summary: String,
    pub tracked_seconds: Option<u64>,
    pub day_seconds: u64,
    pub all_seconds: u64,
    pub project_name: String,
    pub project_id: String,
}

impl TaskRecord {
    /// First encounter of an issue: both counters start at the entry's seconds.
    pub fn new(issue_id: impl Into<String>, metadata: &IssueMetadata, seconds: u64) -> Self {
        Self {
            issue_id: issue_id.into(),
            issue_key: metadata.key.clone(),
            summary: metadata.summary.clone(),
            tracked_seconds: metadata.tracked_seconds,
            day_seconds: seconds,
            all_seconds: seconds,
            project_name: metadata.project_name.clone(),
            project_id: metadata.project_id.clone(),
        }
    }

    pub fn add_seconds(&mut self, seconds: u64) {
        self.day_seconds += seconds;
        self.all_seconds += seconds;
    }
}

/// Top-level grouping of tasks sharing a project id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub id: String,
    pub tasks: Vec<TaskRecord>,
}

impl ProjectRecord {
    pub fn new(first: TaskRecord) -> Self {
        Self {
            name: first.project_name.clone(),
            id: first.project_id.clone(),
            tasks: vec![first],
        }
    }

    pub fn day_seconds(&self) -> u64 {
        self.tasks.iter().map(|t| t.day_seconds).sum()
    }
}
