//! Recording adapter for the `GitRepo` port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_result, record_value};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::GitRepo;

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CwdInput {
    cwd: String,
}

impl CwdInput {
    fn of(cwd: &Path) -> Self {
        Self { cwd: cwd.display().to_string() }
    }
}

impl GitRepo for RecordingGitRepo {
    fn common_dir(&self, cwd: &Path) -> Option<PathBuf> {
        let dir = self.inner.common_dir(cwd);
        let output = dir.as_ref().map(|d| d.display().to_string());
        record_value(&self.recorder, "git", "common_dir", &CwdInput::of(cwd), &output);
        dir
    }

    fn show_prefix(&self, cwd: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.show_prefix(cwd);
        record_result(&self.recorder, "git", "show_prefix", &CwdInput::of(cwd), &result);
        result
    }
}
