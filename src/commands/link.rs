//! `compdb-refresh link` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::RefreshError;
use crate::reconcile::{ensure_external_link, LinkOutcome};

/// Execute the `link` command.
///
/// # Errors
///
/// Returns an error if `//bazel-out` is missing, `//external` is occupied by
/// something other than a link, or the link cannot be replaced.
pub fn run(ctx: &ServiceContext, root: &Path) -> Result<LinkOutcome, RefreshError> {
    ensure_external_link(root, ctx.linker.as_ref(), ctx.reporter.as_ref())
}
