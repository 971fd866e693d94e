//! Git metadata port.

use std::path::{Path, PathBuf};

/// Read-only queries against the repository enclosing a directory.
///
/// Both queries run with `cwd` as the working directory; nothing here relies
/// on the process-wide current directory.
pub trait GitRepo: Send + Sync {
    /// Returns the repository's common git directory (`git rev-parse
    /// --git-common-dir`), with a relative answer resolved against `cwd`.
    ///
    /// `None` means `cwd` is not inside a repository. A missing `git` binary is
    /// folded into the same answer.
    fn common_dir(&self, cwd: &Path) -> Option<PathBuf>;

    /// Returns the path of `cwd` relative to the repository root, with a
    /// trailing `/` unless empty (`git rev-parse --show-prefix`).
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be run or exits nonzero.
    fn show_prefix(&self, cwd: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
