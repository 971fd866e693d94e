//! Live git adapter using `git` CLI commands.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::ports::git::GitRepo;

/// Live git adapter that shells out to the `git` CLI.
pub struct LiveGitRepo;

impl GitRepo for LiveGitRepo {
    fn common_dir(&self, cwd: &Path) -> Option<PathBuf> {
        // Worktrees share the one info/exclude in the common dir.
        let output = Command::new("git")
            .args(["rev-parse", "--git-common-dir"])
            .current_dir(cwd)
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let dir = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        if dir.is_empty() {
            return None;
        }
        Some(cwd.join(dir))
    }

    fn show_prefix(&self, cwd: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-prefix"])
            .current_dir(cwd)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git rev-parse --show-prefix failed: {}", stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");
        assert!(LiveGitRepo.common_dir(&gone).is_none());
    }

    #[test]
    fn show_prefix_fails_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");
        assert!(LiveGitRepo.show_prefix(&gone).is_err());
    }
}
