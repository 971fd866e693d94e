//! Directory-link port.
//!
//! The one platform-divergent behavior of the tool: how a directory link is
//! addressed, created, read back, and removed.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Platform mechanism used for directory links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A true symbolic link.
    Symlink,
    /// An NTFS directory junction.
    Junction,
}

impl LinkKind {
    /// Lowercase noun used in user-facing messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Symlink => "symlink",
            Self::Junction => "junction",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Creates and inspects directory links in one platform-specific way.
pub trait DirLinker: Send + Sync {
    /// The kind of link this implementation produces.
    fn kind(&self) -> LinkKind;

    /// Computes the destination a link directly under `root` should record:
    /// the build-output `marker`, then the `from_marker` traversal.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be resolved.
    fn target(&self, root: &Path, marker: &Path, from_marker: &Path) -> io::Result<PathBuf>;

    /// Reads the destination recorded in the link at `path`, normalized for
    /// comparison with [`DirLinker::target`].
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a link of any kind.
    fn read(&self, path: &Path) -> io::Result<PathBuf>;

    /// Creates a directory link at `path` recording `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses to create the link.
    fn create(&self, path: &Path, target: &Path) -> io::Result<()>;

    /// Removes the link at `path` without touching what it points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be removed.
    fn remove(&self, path: &Path) -> io::Result<()>;
}
