//! Status-message port.

use crate::term::Severity;

/// Receives the user-facing messages a step emits.
///
/// Messages are side effects for the person at the terminal, never data the
/// caller depends on.
pub trait Reporter: Send + Sync {
    /// Emit one message: a highlighted head plus an optional plain tail.
    fn report(&self, severity: Severity, colored: &str, plain: &str);

    /// Emit a fatal-problem message.
    fn error(&self, message: &str) {
        self.report(Severity::Error, message, "");
    }

    /// Emit a recovered-problem message.
    fn warning(&self, message: &str) {
        self.report(Severity::Warning, message, "");
    }

    /// Emit a progress message.
    fn info(&self, message: &str) {
        self.report(Severity::Info, message, "");
    }

    /// Emit a change-made message.
    fn success(&self, message: &str) {
        self.report(Severity::Success, message, "");
    }
}
