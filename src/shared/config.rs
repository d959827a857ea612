//! Application configuration. Default credentials, service endpoints, output.

use crate::adapters::integrations::jira::DEFAULT_JIRA_BASE_URL;
use crate::adapters::integrations::tempo::DEFAULT_TEMPO_BASE_URL;
use crate::domain::RequestData;
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout for both services.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the result is printed to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Credentials (command-line tokens take precedence)
    // ─────────────────────────────────────────────────────────────────────────
    /// Tempo API token. Read from JIRA_DAY_ISSUES_TEMPO_TOKEN or TEMPO_TOKEN.
    #[serde(default)]
    pub tempo_token: Option<String>,

    /// Atlassian account email. Read from JIRA_DAY_ISSUES_EMAIL or JIRA_EMAIL.
    #[serde(default)]
    pub email: Option<String>,

    /// Jira API token. Read from JIRA_DAY_ISSUES_JIRA_TOKEN or JIRA_TOKEN.
    #[serde(default)]
    pub jira_token: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Endpoints
    // ─────────────────────────────────────────────────────────────────────────
    /// Tempo API root. Defaults to https://api.tempo.io.
    #[serde(default)]
    pub tempo_base_url: Option<String>,

    /// Jira site root.
    #[serde(default)]
    pub jira_base_url: Option<String>,

    /// Per-request timeout in seconds (default 30).
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Output
    // ─────────────────────────────────────────────────────────────────────────
    /// text | json | csv.
    #[serde(default)]
    pub output: Option<OutputFormat>,

    /// Print the ASCII banner on startup (default true). Never printed for json/csv.
    #[serde(default)]
    pub banner: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("JIRA_DAY_ISSUES"));
        if let Ok(path) = std::env::var("JIRA_DAY_ISSUES_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Credentials from config, falling back to the unprefixed env names.
    pub fn request_defaults(&self) -> RequestData {
        RequestData {
            tempo_token: self
                .tempo_token
                .clone()
                .or_else(|| std::env::var("TEMPO_TOKEN").ok()),
            email: self
                .email
                .clone()
                .or_else(|| std::env::var("JIRA_EMAIL").ok()),
            jira_token: self
                .jira_token
                .clone()
                .or_else(|| std::env::var("JIRA_TOKEN").ok()),
        }
    }

    pub fn tempo_base_url_or_default(&self) -> String {
        self.tempo_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_TEMPO_BASE_URL.to_string())
    }

    pub fn jira_base_url_or_default(&self) -> String {
        self.jira_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_JIRA_BASE_URL.to_string())
    }

    /// Returns the request timeout. Defaults to DEFAULT_TIMEOUT_SECS if unset or zero.
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn output_or_default(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    /// Banner only makes sense for the human-readable report.
    pub fn show_banner(&self) -> bool {
        self.banner.unwrap_or(true) && self.output_or_default() == OutputFormat::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.tempo_base_url_or_default(), "https://api.tempo.io");
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(30));
        assert_eq!(cfg.output_or_default(), OutputFormat::Text);
        assert!(cfg.show_banner());
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let cfg = AppConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(30));
    }

    #[test]
    fn test_banner_suppressed_for_machine_output() {
        let cfg = AppConfig {
            output: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert!(!cfg.show_banner());
    }

    #[test]
    fn test_deserialize_from_config_source() {
        let cfg: AppConfig = config::Config::builder()
            .set_override("output", "csv")
            .unwrap()
            .set_override("timeout_secs", 5)
            .unwrap()
            .set_override("email", "me@x.com")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.output_or_default(), OutputFormat::Csv);
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(5));
        assert_eq!(cfg.request_defaults().email.as_deref(), Some("me@x.com"));
    }
}
