//! Service context bundling the port trait objects a run needs.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::git::LiveGitRepo;
use crate::adapters::live::linker;
use crate::adapters::live::reporter::StderrReporter;
use crate::adapters::recording::RecordingGitRepo;
use crate::adapters::replaying::ReplayingGitRepo;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Settings;
use crate::error::RefreshError;
use crate::ports::{DirLinker, GitRepo, Reporter};

/// File name of the git cassette inside a recording directory.
pub const GIT_CASSETTE: &str = "git.cassette.yaml";

/// Bundles every external boundary into a single context.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying); the reconcilers only ever see the traits.
pub struct ServiceContext {
    /// Git metadata queries.
    pub git: Box<dyn GitRepo>,
    /// Platform directory-link mechanism.
    pub linker: Box<dyn DirLinker>,
    /// Destination for status messages.
    pub reporter: Box<dyn Reporter>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        git: Box<dyn GitRepo>,
        linker: Box<dyn DirLinker>,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self { git, linker, reporter, recorder: None }
    }

    /// Creates a live context: real `git`, the platform's linker, stderr output.
    #[must_use]
    pub fn live(color: bool) -> Self {
        Self::new(
            Box::new(LiveGitRepo),
            linker::for_platform(),
            Box::new(StderrReporter::new(color)),
        )
    }

    /// Creates a live context whose git calls are also recorded to
    /// `<dir>/git.cassette.yaml` when [`ServiceContext::finish`] runs.
    #[must_use]
    pub fn recording(color: bool, dir: &Path) -> Self {
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(dir.join(GIT_CASSETTE), "compdb-refresh")));
        let git = RecordingGitRepo::new(Box::new(LiveGitRepo), Arc::clone(&recorder));
        Self {
            git: Box::new(git),
            linker: linker::for_platform(),
            reporter: Box::new(StderrReporter::new(color)),
            recorder: Some(recorder),
        }
    }

    /// Creates a context that answers git queries from `cassette`.
    #[must_use]
    pub fn replaying(cassette: &Cassette, reporter: Box<dyn Reporter>) -> Self {
        Self::new(Box::new(ReplayingGitRepo::new(cassette)), linker::for_platform(), reporter)
    }

    /// Picks the live or recording context according to `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.record_dir {
            Some(dir) => Self::recording(settings.color, dir),
            None => Self::live(settings.color),
        }
    }

    /// Writes the cassette if this context was recording.
    ///
    /// Returns the cassette path, or `None` when nothing was recorded. A
    /// recording context that saw no git calls writes no file.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::Cassette`] if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, RefreshError> {
        let Self { git, recorder, .. } = self;
        let Some(recorder) = recorder else {
            return Ok(None);
        };
        // The recording adapter holds the other reference.
        drop(git);
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| RefreshError::Cassette("git recorder still has references".into()))?
            .into_inner()
            .map_err(|e| RefreshError::Cassette(format!("git recorder lock poisoned: {e}")))?;
        if recorder.is_empty() {
            return Ok(None);
        }
        let path = recorder
            .finish()
            .map_err(|e| RefreshError::Cassette(format!("failed to write git cassette: {e}")))?;
        Ok(Some(path))
    }
}
