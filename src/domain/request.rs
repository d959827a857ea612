//! Request fields accepted from the command line and the typed bag they fill.
//!
//! The schema is a static registration table: every recognized field is listed
//! once in [`RequestField::ALL`] with its stable, case-sensitive name.

use serde::{Deserialize, Serialize};

/// Descriptor for one recognized request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    TempoToken,
    Email,
    JiraToken,
}

impl RequestField {
    pub const ALL: [RequestField; 3] = [
        RequestField::TempoToken,
        RequestField::Email,
        RequestField::JiraToken,
    ];

    /// Name used after the `--` marker.
    pub fn name(self) -> &'static str {
        match self {
            RequestField::TempoToken => "TempoToken",
            RequestField::Email => "Email",
            RequestField::JiraToken => "JiraToken",
        }
    }

    /// Whether the value must be masked when shown or prompted.
    pub fn is_secret(self) -> bool {
        !matches!(self, RequestField::Email)
    }

    /// Setter: store `value` into the matching slot of `data`.
    pub fn apply(self, data: &mut RequestData, value: String) {
        let slot = match self {
            RequestField::TempoToken => &mut data.tempo_token,
            RequestField::Email => &mut data.email,
            RequestField::JiraToken => &mut data.jira_token,
        };
        *slot = Some(value);
    }

    pub fn get(self, data: &RequestData) -> Option<&str> {
        match self {
            RequestField::TempoToken => data.tempo_token.as_deref(),
            RequestField::Email => data.email.as_deref(),
            RequestField::JiraToken => data.jira_token.as_deref(),
        }
    }
}

impl std::fmt::Display for RequestField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Credentials needed by both remote services. Built by the parser, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    pub tempo_token: Option<String>,
    pub email: Option<String>,
    pub jira_token: Option<String>,
}

impl RequestData {
    /// Fields that are unset or empty.
    pub fn missing_fields(&self) -> Vec<RequestField> {
        RequestField::ALL
            .into_iter()
            .filter(|f| f.get(self).is_none_or(str::is_empty))
            .collect()
    }

    /// Fill every empty field from `defaults`. Values already set win.
    pub fn merge_defaults(mut self, defaults: &RequestData) -> Self {
        for field in RequestField::ALL {
            if field.get(&self).is_none_or(str::is_empty) {
                if let Some(value) = field.get(defaults) {
                    field.apply(&mut self, value.to_string());
                }
            }
        }
        self
    }

    pub fn tempo_token(&self) -> &str {
        self.tempo_token.as_deref().unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn jira_token(&self) -> &str {
        self.jira_token.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_unique_and_non_empty() {
        let mut names: Vec<&str> = RequestField::ALL.iter().map(|f| f.name()).collect();
        assert!(names.iter().all(|n| !n.is_empty()));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RequestField::ALL.len());
    }

    #[test]
    fn test_apply_and_missing_fields() {
        let mut data = RequestData::default();
        assert_eq!(data.missing_fields().len(), 3);

        RequestField::Email.apply(&mut data, "me@x.com".to_string());
        assert_eq!(data.email(), "me@x.com");
        assert_eq!(
            data.missing_fields(),
            vec![RequestField::TempoToken, RequestField::JiraToken]
        );
    }

    #[test]
    fn test_merge_defaults_keeps_explicit_values() {
        let explicit = RequestData {
            email: Some("cli@x.com".into()),
            ..Default::default()
        };
        let defaults = RequestData {
            tempo_token: Some("t".into()),
            email: Some("env@x.com".into()),
            jira_token: None,
        };

        let merged = explicit.merge_defaults(&defaults);
        assert_eq!(merged.email(), "cli@x.com");
        assert_eq!(merged.tempo_token(), "t");
        assert_eq!(merged.missing_fields(), vec![RequestField::JiraToken]);
    }
}
