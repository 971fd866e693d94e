//! Error type shared by every refresh step.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a refresh run.
///
/// Each variant renders as a message the user can act on. [`crate::run`]
/// reports it with the error style and the binary exits with status 1.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Command-line arguments were rejected; clap renders and exits.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// Neither `--workspace` nor `BUILD_WORKSPACE_DIRECTORY` was provided.
    #[error(
        ">>> BUILD_WORKSPACE_DIRECTORY was not found in the environment. \
         Make sure to invoke this tool with `bazel run`, or pass --workspace."
    )]
    MissingWorkspace,

    /// The workspace root does not exist or is not a directory.
    #[error(
        ">>> Workspace root {shown} is not usable: {reason}. \
         Check --workspace or BUILD_WORKSPACE_DIRECTORY.",
        shown = .path.display()
    )]
    InvalidWorkspace {
        /// Root as it was given.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// The build-output marker link is absent from the workspace root.
    #[error(
        ">>> //{marker} is missing. Please remove --symlink_prefix and \
         --experimental_convenience_symlinks, so the workspace mirrors the compilation environment."
    )]
    MissingBuildOutput {
        /// Name of the marker entry that was expected.
        marker: String,
    },

    /// Something other than a link occupies the reserved link path.
    #[error(
        ">>> //{shown} already exists, but it isn't a {kind}. //{shown} is reserved by Bazel and \
         needed for this tool. Please rename or delete your existing //{shown} and rerun.",
        shown = .path.display()
    )]
    ReservedLinkPath {
        /// Workspace-relative path that is occupied.
        path: PathBuf,
        /// Link kind the platform would have used ("symlink" or "junction").
        kind: &'static str,
    },

    /// A git metadata query failed after the repository was found.
    #[error(">>> git {context} failed: {message}")]
    Git {
        /// Which query was running.
        context: &'static str,
        /// Message reported by the git adapter.
        message: String,
    },

    /// Unexpected filesystem failure.
    #[error(">>> {context}: {source}")]
    Io {
        /// Description of what was being attempted.
        context: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Cassette recording or replay failed.
    #[error(">>> cassette error: {0}")]
    Cassette(String),
}

impl RefreshError {
    /// Wrap an I/O error with a description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_build_output_names_marker() {
        let err = RefreshError::MissingBuildOutput { marker: "bazel-out".into() };
        let msg = err.to_string();
        assert!(msg.contains("//bazel-out is missing"));
        assert!(msg.contains("--symlink_prefix"));
    }

    #[test]
    fn reserved_path_mentions_kind_and_path() {
        let err = RefreshError::ReservedLinkPath { path: PathBuf::from("external"), kind: "symlink" };
        let msg = err.to_string();
        assert!(msg.contains("//external already exists"));
        assert!(msg.contains("isn't a symlink"));
    }

    #[test]
    fn invalid_workspace_names_path() {
        let err = RefreshError::InvalidWorkspace {
            path: PathBuf::from("/src/nope"),
            reason: "not a directory".into(),
        };
        assert_eq!(
            err.to_string(),
            ">>> Workspace root /src/nope is not usable: not a directory. \
             Check --workspace or BUILD_WORKSPACE_DIRECTORY."
        );
    }

    #[test]
    fn io_error_keeps_context() {
        let err = RefreshError::io(
            "reading exclude file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), ">>> reading exclude file: denied");
    }
}
