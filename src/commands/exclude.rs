//! `compdb-refresh exclude` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::RefreshError;
use crate::reconcile::{ensure_exclude_entries, ExcludeOutcome};

/// Execute the `exclude` command.
///
/// Outside a git repository this succeeds without doing anything.
///
/// # Errors
///
/// Returns an error if the repository prefix cannot be determined or the
/// exclude file cannot be updated.
pub fn run(ctx: &ServiceContext, root: &Path) -> Result<ExcludeOutcome, RefreshError> {
    ensure_exclude_entries(root, ctx.git.as_ref(), ctx.reporter.as_ref())
}
