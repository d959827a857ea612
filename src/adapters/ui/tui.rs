//! Interactive prompts for credentials the command line and config did not provide.

use crate::domain::{DomainError, RequestData, RequestField};
use inquire::{Password, PasswordDisplayMode, Text};
use std::io::IsTerminal;

/// Ask for every field in `missing`. Fails with `Config` when stdin is not a terminal.
pub fn prompt_missing(
    mut request: RequestData,
    missing: &[RequestField],
) -> Result<RequestData, DomainError> {
    if missing.is_empty() {
        return Ok(request);
    }
    if !std::io::stdin().is_terminal() {
        let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
        return Err(DomainError::Config(format!(
            "missing {} (pass --<Field>=<value> or set it in the environment)",
            names.join(", ")
        )));
    }

    for &field in missing {
        let label = format!("{}:", field.name());
        let answer = if field.is_secret() {
            Password::new(&label)
                .with_display_mode(PasswordDisplayMode::Masked)
                .without_confirmation()
                .prompt()
        } else {
            Text::new(&label).prompt()
        };
        let value = answer.map_err(|e| DomainError::Config(e.to_string()))?;
        field.apply(&mut request, value.trim().to_string());
    }
    Ok(request)
}
