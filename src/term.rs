//! Severity-styled terminal messages.
//!
//! Every status line the tool prints goes to stderr. A message has a colored
//! head and an optional plain tail, so long explanations stay readable.

use owo_colors::OwoColorize;

/// How loud a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal problem; the run stops.
    Error,
    /// Recovered problem worth knowing about.
    Warning,
    /// Neutral progress note.
    Info,
    /// A change was made successfully.
    Success,
}

/// Render a message, coloring the head when `color` is set.
#[must_use]
pub fn render(severity: Severity, colored: &str, plain: &str, color: bool) -> String {
    if !color {
        return format!("{colored}{plain}");
    }
    let head = match severity {
        Severity::Error => colored.red().to_string(),
        Severity::Warning => colored.yellow().to_string(),
        Severity::Info => colored.blue().to_string(),
        Severity::Success => colored.green().to_string(),
    };
    format!("{head}{plain}")
}
