//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Raw command token is malformed or names a field the schema does not know.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Remote service answered 401. Credentials in the request data are wrong or expired.
    #[error("{service}: not valid authentication data ({body})")]
    Authentication { service: &'static str, body: String },

    /// Remote service answered with any other non-success status.
    #[error("{service}: server responded {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Success status, but the body could not be decoded.
    #[error("{service}: can not read server response: {detail}")]
    MalformedResponse {
        service: &'static str,
        detail: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    /// Only transport failures are worth retrying; the core itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_is_retryable() {
        assert!(DomainError::Network("reset".into()).is_retryable());
        assert!(!DomainError::Cancelled.is_retryable());
        assert!(!DomainError::InvalidCommand("--x".into()).is_retryable());
        assert!(
            !DomainError::Upstream {
                service: "tempo",
                status: 503,
                body: String::new(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_display_carries_status_and_token() {
        let err = DomainError::Upstream {
            service: "jira",
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "jira: server responded 500: boom");
        assert_eq!(
            DomainError::InvalidCommand("--Emal=a".into()).to_string(),
            "Invalid command: --Emal=a"
        );
    }
}
