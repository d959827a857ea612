//! Command-line input adapter. Turns raw argv tokens into domain requests.

pub mod command_parser;
pub mod invocation;

pub use command_parser::CommandParser;
pub use invocation::{Invocation, Mode, USAGE};
