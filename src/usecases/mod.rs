//! Application use cases. Orchestrate domain logic via ports.

pub mod log_aggregator;

pub use log_aggregator::LogAggregator;
