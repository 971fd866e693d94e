//! `compdb-refresh install` command.

use std::path::{Path, PathBuf};

use crate::error::RefreshError;

/// Where Bazel leaves the generated compilation database.
pub const ARTIFACT: &str = "bazel-bin/compile_commands.json";

/// Where editors and clangd look for it.
pub const DESTINATION: &str = "compile_commands.json";

/// Execute the `install` command: copy the artifact to the workspace root.
///
/// Returns the destination path.
///
/// # Errors
///
/// Returns an error if the artifact is missing or the copy fails.
pub fn run(root: &Path) -> Result<PathBuf, RefreshError> {
    let from = root.join(ARTIFACT);
    let to = root.join(DESTINATION);
    std::fs::copy(&from, &to).map_err(|e| {
        RefreshError::io(
            format!("copying //{ARTIFACT} to //{DESTINATION} (build the refresh target first)"),
            e,
        )
    })?;
    Ok(to)
}
