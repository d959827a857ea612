//! Terminal adapters: banner, prompts, spinner, report rendering.

pub mod banner;
pub mod progress;
pub mod report;
pub mod tui;

/// Prints the welcome banner. Call once at startup, only for text output.
pub fn init_ui() {
    banner::print_welcome();
}
