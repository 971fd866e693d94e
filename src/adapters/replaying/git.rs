//! Replaying adapter for the `GitRepo` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::cassette::format::Cassette;
use crate::cassette::replayer::{decode_result, CassetteReplayer};
use crate::ports::git::GitRepo;

/// Answers git queries from a cassette instead of running `git`.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a replaying repo over the `git` interactions in `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { replayer: Mutex::new(CassetteReplayer::for_port(cassette, "git")) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        self.replayer.lock().expect("replayer lock poisoned").next_output(method)
    }
}

impl GitRepo for ReplayingGitRepo {
    fn common_dir(&self, _cwd: &Path) -> Option<PathBuf> {
        self.next_output("common_dir").as_str().map(PathBuf::from)
    }

    fn show_prefix(&self, _cwd: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        decode_result(self.next_output("show_prefix"), "git::show_prefix")
    }
}
