//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod request;

pub use entities::{IssueMetadata, ProjectRecord, TaskRecord, WorklogEntry};
pub use errors::DomainError;
pub use request::{RequestData, RequestField};
