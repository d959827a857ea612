//! Infrastructure adapters. Implement outbound ports and drive the CLI.
//!
//! Tempo, Jira, command-line parsing, terminal output. Map errors to DomainError.

pub mod cli;
pub mod integrations;
pub mod ui;
