//! Command-line request parser. Maps `--<Field>=<value>` tokens onto [`RequestData`].
//!
//! The schema is built once from the static [`RequestField::ALL`] table.
//! Field names match case-sensitively.

use crate::domain::{DomainError, RequestData, RequestField};
use std::collections::HashMap;
use tracing::debug;

/// Marks a token as a command.
const COMMAND_MARKER: &str = "--";
/// Separates the field name from its argument.
const COMMAND_ASSIGNOR: char = '=';
/// Shortest accepted argument value.
const SMALLEST_ARGUMENT_LEN: usize = 1;

/// Parses raw command tokens against the request schema.
#[derive(Debug, Clone)]
pub struct CommandParser {
    schema: HashMap<&'static str, RequestField>,
    min_field_name_len: usize,
}

impl CommandParser {
    pub fn new() -> Self {
        let schema: HashMap<&'static str, RequestField> = RequestField::ALL
            .into_iter()
            .map(|field| (field.name(), field))
            .collect();
        // The field is unknown until the token is split, so the shortest name bounds every token.
        let min_field_name_len = schema
            .keys()
            .map(|name| name.chars().count())
            .min()
            .unwrap_or(0);

        debug!(fields = schema.len(), min_field_name_len, "initialized command parser");

        Self {
            schema,
            min_field_name_len,
        }
    }

    /// Field names accepted after the `--` marker.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schema.keys().copied()
    }

    /// Minimum length of any valid token: marker + assignor + shortest name + one argument char.
    pub fn min_command_len(&self) -> usize {
        COMMAND_MARKER.len() + 1 + self.min_field_name_len + SMALLEST_ARGUMENT_LEN
    }

    /// Split a token into its field descriptor and raw argument.
    ///
    /// The argument is everything after the first `=`, returned verbatim.
    ///
    /// # Errors
    /// `InvalidCommand` carrying the token when it is too short, lacks the `--`
    /// marker or the `=` separator, has an empty argument, or names an unknown field.
    pub fn parse_command<'a>(&self, token: &'a str) -> Result<(RequestField, &'a str), DomainError> {
        let invalid = || DomainError::InvalidCommand(token.to_string());

        if !self.is_well_formed(token) {
            return Err(invalid());
        }

        let body = token.strip_prefix(COMMAND_MARKER).ok_or_else(invalid)?;
        let (name, argument) = body.split_once(COMMAND_ASSIGNOR).ok_or_else(invalid)?;
        if argument.chars().count() < SMALLEST_ARGUMENT_LEN {
            return Err(invalid());
        }

        let field = self.schema.get(name).copied().ok_or_else(invalid)?;
        debug!(field = %field, "parsed command");
        Ok((field, argument))
    }

    /// Parse every token and collect the values into a [`RequestData`].
    ///
    /// Later tokens for the same field overwrite earlier ones. The first invalid
    /// token aborts the whole parse.
    pub fn parse_request<I, S>(&self, tokens: I) -> Result<RequestData, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut data = RequestData::default();
        for token in tokens {
            let (field, argument) = self.parse_command(token.as_ref())?;
            field.apply(&mut data, argument.to_string());
        }
        Ok(data)
    }

    fn is_well_formed(&self, token: &str) -> bool {
        !token.is_empty()
            && token.chars().count() >= self.min_command_len()
            && token.contains(COMMAND_ASSIGNOR)
            && token.starts_with(COMMAND_MARKER)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}
