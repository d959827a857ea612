//! Shared HTTP plumbing for the integrations: cancellable send and response classification.
//!
//! 401 -> `Authentication`, any other non-200 -> `Upstream`, undecodable 200 -> `MalformedResponse`.

use crate::domain::DomainError;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::trace;

pub(crate) const USER_AGENT: &str = concat!("jira-day-issues/", env!("CARGO_PKG_VERSION"));

/// Build the shared reqwest client for one integration.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Config(format!("HTTP client build failed: {}", e)))
}

/// Send `request` and decode a JSON body of type `T`, racing the whole exchange against `cancel`.
pub(crate) async fn fetch_json<T>(
    service: &'static str,
    request: RequestBuilder,
    cancel: &CancellationToken,
) -> Result<T, DomainError>
where
    T: DeserializeOwned,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(DomainError::Cancelled),
        result = async {
            let response = request
                .send()
                .await
                .map_err(|e| network_error(service, e))?;
            read_json(service, response).await
        } => result,
    }
}

/// Classify a response and decode its body.
pub(crate) async fn read_json<T>(service: &'static str, response: Response) -> Result<T, DomainError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    trace!(service, status = status.as_u16(), "response received");

    let body = response
        .text()
        .await
        .map_err(|e| network_error(service, e))?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(DomainError::Authentication { service, body });
    }
    if status != StatusCode::OK {
        return Err(DomainError::Upstream {
            service,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| DomainError::MalformedResponse {
        service,
        detail: e.to_string(),
    })
}

fn network_error(service: &'static str, err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::Network(format!("{}: request timed out: {}", service, err))
    } else {
        DomainError::Network(format!("{}: {}", service, err))
    }
}

/// Ids come back as JSON numbers from one service and strings from the other; keep them as text.
pub(crate) fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text.trim().to_string()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Optional variant of [`id_as_string`]; `null` and absent both map to `None`.
pub(crate) fn opt_id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text.trim().to_string()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id_as_string")]
        id: String,
        #[serde(default, deserialize_with = "opt_id_as_string")]
        other: Option<String>,
    }

    #[test]
    fn test_id_number_and_string() {
        let a: Probe = serde_json::from_str(r#"{"id": 10001}"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{"id": " 10001 ", "other": 5}"#).unwrap();
        assert_eq!(a.id, "10001");
        assert_eq!(a.other, None);
        assert_eq!(b.id, "10001");
        assert_eq!(b.other.as_deref(), Some("5"));
    }

    #[test]
    fn test_id_rejects_objects() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": {"x": 1}}"#).is_err());
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let client = build_client(Duration::from_secs(5)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result: Result<Value, _> =
            fetch_json("tempo", client.get("http://127.0.0.1:9/never"), &cancel).await;
        assert!(matches!(result, Err(DomainError::Cancelled)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = build_client(Duration::from_secs(5)).unwrap();
        let cancel = CancellationToken::new();

        let result: Result<Value, _> =
            fetch_json("jira", client.get("http://127.0.0.1:1/"), &cancel).await;
        match result {
            Err(e @ DomainError::Network(_)) => assert!(e.is_retryable()),
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
