//! Remote service integrations. Implement the outbound ports over HTTP.

pub(crate) mod response;

pub mod jira;
pub mod tempo;

pub use jira::JiraAdapter;
pub use tempo::TempoAdapter;
