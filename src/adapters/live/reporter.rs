//! Live reporter writing styled lines to stderr.

use crate::ports::reporter::Reporter;
use crate::term::{self, Severity};

/// Writes every message to stderr, never stdout.
pub struct StderrReporter {
    color: bool,
}

impl StderrReporter {
    /// Creates a reporter; `color` toggles escape sequences.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Reporter for StderrReporter {
    fn report(&self, severity: Severity, colored: &str, plain: &str) {
        eprintln!("{}", term::render(severity, colored, plain, self.color));
    }
}
