//! Spinner shown on stderr while remote fetches are in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a steady spinner with `message`. Caller finishes it with `finish_and_clear`.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
