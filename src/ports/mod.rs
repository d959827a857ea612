//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by application into infrastructure (the two remote services)

pub mod outbound;

pub use outbound::{IssueSource, WorklogSource};
