//! Live directory-link adapters: symlinks on unix, junctions on Windows.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::ports::linker::{DirLinker, LinkKind};

/// Prefix Windows puts on extended-length paths returned by `read_link` and
/// `canonicalize`.
const VERBATIM_PREFIX: &str = r"\\?\";

/// Selects the linker for the platform this binary was built for.
#[must_use]
pub fn for_platform() -> Box<dyn DirLinker> {
    if cfg!(windows) {
        Box::new(JunctionLinker)
    } else {
        Box::new(SymlinkLinker)
    }
}

/// Strips a leading `\\?\` so link destinations compare equal to plain paths.
#[must_use]
pub fn strip_verbatim(path: &Path) -> PathBuf {
    match path.to_str().and_then(|s| s.strip_prefix(VERBATIM_PREFIX)) {
        Some(rest) => PathBuf::from(rest),
        None => path.to_path_buf(),
    }
}

/// Folds `.` and `..` components without touching the filesystem.
///
/// Leading `..` of a relative path are kept; `..` at a root is dropped.
#[must_use]
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Symbolic links with a relative destination.
///
/// The destination walks through the marker link, so moving the workspace
/// keeps the link valid.
pub struct SymlinkLinker;

impl DirLinker for SymlinkLinker {
    fn kind(&self) -> LinkKind {
        LinkKind::Symlink
    }

    fn target(&self, _root: &Path, marker: &Path, from_marker: &Path) -> io::Result<PathBuf> {
        Ok(marker.join(from_marker))
    }

    fn read(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn create(&self, path: &Path, target: &Path) -> io::Result<()> {
        symlink_dir(target, path)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if cfg!(windows) {
            std::fs::remove_dir(path)
        } else {
            std::fs::remove_file(path)
        }
    }
}

/// NTFS directory junctions with an absolute destination.
///
/// Creating symlinks on Windows needs elevation or developer mode, junctions
/// do not. `..` of the `bazel-out` junction leads back the way it came, so the
/// marker is resolved to its real location before walking up. A dangling
/// `bazel-out` cannot be resolved, so [`DirLinker::target`] fails with the
/// canonicalize error instead of producing a link.
pub struct JunctionLinker;

impl DirLinker for JunctionLinker {
    fn kind(&self) -> LinkKind {
        LinkKind::Junction
    }

    fn target(&self, root: &Path, marker: &Path, from_marker: &Path) -> io::Result<PathBuf> {
        let resolved = strip_verbatim(&std::fs::canonicalize(root.join(marker))?);
        Ok(lexical_normalize(&resolved.join(from_marker)))
    }

    fn read(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::read_link(path).map(|dest| strip_verbatim(&dest))
    }

    fn create(&self, path: &Path, target: &Path) -> io::Result<()> {
        mklink_junction(path, target)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir(path)
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Path, path: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, path)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, path: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, path)
}

#[cfg(not(any(unix, windows)))]
fn symlink_dir(_target: &Path, path: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot create symlink {}: unsupported platform", path.display()),
    ))
}

/// `mklink` is a `cmd` builtin, so it has to go through the shell.
#[cfg(windows)]
fn mklink_junction(path: &Path, target: &Path) -> io::Result<()> {
    use std::os::windows::process::CommandExt;
    use std::process::{Command, Stdio};

    let status = Command::new("cmd")
        .raw_arg(format!("/C mklink /J \"{}\" \"{}\"", path.display(), target.display()))
        .stdout(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "mklink /J {} {} exited with {status}",
            path.display(),
            target.display()
        )))
    }
}

#[cfg(not(windows))]
fn mklink_junction(path: &Path, _target: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot create junction {}: junctions exist only on Windows", path.display()),
    ))
}
