//! Splits argv into request commands (`--Field=value`), the target date and the run mode.

use crate::domain::DomainError;
use chrono::NaiveDate;

pub const USAGE: &str = "\
Usage: jira-day-issues [--TempoToken=<token>] [--Email=<email>] [--JiraToken=<token>] [YYYY-MM-DD] [worklogs]

  YYYY-MM-DD   day to report (default: today)
  worklogs     print raw Tempo worklogs instead of the project summary

Credentials missing from the command line are read from JIRA_DAY_ISSUES_* / TEMPO_TOKEN,
JIRA_EMAIL, JIRA_TOKEN, or prompted for on a terminal.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Aggregate,
    WorklogsOnly,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Tokens for the command parser, in order.
    pub commands: Vec<String>,
    pub date: Option<NaiveDate>,
    pub mode: Mode,
}

impl Invocation {
    /// Classify raw arguments (program name already skipped).
    ///
    /// Anything starting with `-` other than a help flag goes to the command
    /// parser untouched; a bare word must be a date or `worklogs`.
    pub fn from_args<I, S>(args: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut invocation = Invocation {
            commands: Vec::new(),
            date: None,
            mode: Mode::Aggregate,
        };

        for arg in args {
            let arg: String = arg.into();
            if arg == "-h" || arg == "--help" {
                invocation.mode = Mode::Help;
            } else if arg == "worklogs" {
                if invocation.mode != Mode::Help {
                    invocation.mode = Mode::WorklogsOnly;
                }
            } else if arg.starts_with('-') {
                invocation.commands.push(arg);
            } else {
                let date = NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
                    .map_err(|_| DomainError::InvalidCommand(arg.clone()))?;
                invocation.date = Some(date);
            }
        }
        Ok(invocation)
    }
}
