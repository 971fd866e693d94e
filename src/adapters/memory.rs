//! In-memory adapters, used by tests to observe what a step reported.

use std::sync::Mutex;

use crate::ports::reporter::Reporter;
use crate::term::Severity;

/// Keeps every reported message instead of printing it.
#[derive(Debug, Default)]
pub struct CapturingReporter {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl CapturingReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything reported so far, head and tail joined.
    ///
    /// # Panics
    ///
    /// Panics if the message lock was poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().expect("reporter lock poisoned").clone()
    }

    /// Returns the messages of one severity.
    #[must_use]
    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.messages().into_iter().filter(|(s, _)| *s == severity).map(|(_, m)| m).collect()
    }
}

impl Reporter for CapturingReporter {
    fn report(&self, severity: Severity, colored: &str, plain: &str) {
        self.messages
            .lock()
            .expect("reporter lock poisoned")
            .push((severity, format!("{colored}{plain}")));
    }
}
