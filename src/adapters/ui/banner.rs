//! Gradient ASCII banner (JIRA DAY) printed before the text report.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Jira Blue (#0052cc).
const JIRA_BLUE: (u8, u8, u8) = (0x00, 0x52, 0xcc);
/// Tempo Teal (#36b37e).
const TEMPO_TEAL: (u8, u8, u8) = (0x36, 0xb3, 0x7e);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Render `text` with the built-in standard figlet font. `None` if the font fails to load.
fn render_art(text: &str) -> Option<String> {
    let font = FIGfont::standard().ok()?;
    font.convert(text).map(|figure| figure.to_string())
}

/// Prints "JIRA DAY" with a blue-to-teal gradient, then the version line.
/// Output errors are ignored; the banner is cosmetic.
pub fn print_welcome() {
    let Some(art) = render_art("JIRA DAY") else {
        return;
    };
    let mut out = stdout();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(JIRA_BLUE, TEMPO_TEAL, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(Print(format!("v{}\n\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.flush();
}
