//! jira-day-issues: reconcile one day's Tempo worklogs with Jira issues, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
