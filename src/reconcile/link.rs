//! Keeps `//external` linked into Bazel's output base.
//!
//! `compile_commands.json` refers to external headers as `external/<repo>/...`,
//! exactly as they appear inside the build sandbox. The link makes those
//! paths resolve from the workspace root too.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::RefreshError;
use crate::ports::{DirLinker, Reporter};
use crate::term::Severity;

/// Workspace-relative path of the link this module owns.
pub const LINK_PATH: &str = "external";

/// Convenience link Bazel creates into `<output_base>/execroot/<ws>/bazel-out`.
pub const MARKER: &str = "bazel-out";

/// Walk from the marker to the external repositories in the output base.
pub const FROM_MARKER: &str = "../../../external";

const CREATED_HEAD: &str = ">>> Automatically added //external workspace link:";
const CREATED_TAIL: &str = "
    This link makes it easy for you--and for build tooling--to see the external dependencies you bring in. It also makes your source tree have the same directory structure as the build sandbox.
    It's a win/win: It's easier for you to browse the code you use, and it eliminates whole categories of edge cases for build tooling.";

/// What was found at the link path before reconciling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing there, not even a dangling link.
    Absent,
    /// A link already recording the expected destination.
    Correct,
    /// A link recording some other destination.
    Stale(PathBuf),
    /// A regular file or directory.
    Occupied,
}

/// What reconciling changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link was missing and has been created.
    Created,
    /// A stale link was replaced.
    Relinked,
    /// The link was already correct; nothing was touched.
    Unchanged,
}

/// Classifies the entry at `source` against the expected `target`.
///
/// # Errors
///
/// Returns an error if the entry exists but its metadata cannot be read.
pub fn inspect(linker: &dyn DirLinker, source: &Path, target: &Path) -> io::Result<LinkState> {
    match std::fs::symlink_metadata(source) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkState::Absent),
        Err(e) => return Err(e),
        Ok(_) => {}
    }
    // read_link is the one check that sees both symlinks and junctions.
    let Ok(current) = linker.read(source) else {
        return Ok(LinkState::Occupied);
    };
    if current == target {
        Ok(LinkState::Correct)
    } else {
        Ok(LinkState::Stale(current))
    }
}

/// Ensures `root/external` is a link of the platform's kind pointing at the
/// output base's `external` directory.
///
/// On success the link exists and records the computed destination. Stale
/// links are replaced with a warning; anything that is not a link is left
/// alone and reported.
///
/// # Errors
///
/// Returns [`RefreshError::MissingBuildOutput`] when `bazel-out` is absent,
/// [`RefreshError::ReservedLinkPath`] when a non-link occupies `external`, and
/// [`RefreshError::Io`] when the link cannot be inspected, removed, or created.
pub fn ensure_external_link(
    root: &Path,
    linker: &dyn DirLinker,
    reporter: &dyn Reporter,
) -> Result<LinkOutcome, RefreshError> {
    if std::fs::symlink_metadata(root.join(MARKER)).is_err() {
        return Err(RefreshError::MissingBuildOutput { marker: MARKER.to_string() });
    }

    let target = linker
        .target(root, Path::new(MARKER), Path::new(FROM_MARKER))
        .map_err(|e| RefreshError::io(format!("resolving //{MARKER}"), e))?;
    let source = root.join(LINK_PATH);

    let state = inspect(linker, &source, &target)
        .map_err(|e| RefreshError::io(format!("inspecting //{LINK_PATH}"), e))?;

    let outcome = match state {
        LinkState::Correct => return Ok(LinkOutcome::Unchanged),
        LinkState::Occupied => {
            return Err(RefreshError::ReservedLinkPath {
                path: PathBuf::from(LINK_PATH),
                kind: linker.kind().noun(),
            })
        }
        LinkState::Stale(_) => {
            reporter.warning(
                ">>> //external links to the wrong place. Automatically deleting and relinking...",
            );
            linker
                .remove(&source)
                .map_err(|e| RefreshError::io(format!("removing stale //{LINK_PATH}"), e))?;
            LinkOutcome::Relinked
        }
        LinkState::Absent => LinkOutcome::Created,
    };

    linker.create(&source, &target).map_err(|e| {
        RefreshError::io(
            format!("creating {} //{LINK_PATH} -> {}", linker.kind(), target.display()),
            e,
        )
    })?;
    reporter.report(Severity::Success, CREATED_HEAD, CREATED_TAIL);
    Ok(outcome)
}

#[cfg(all(test, unix))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::adapters::live::linker::SymlinkLinker;
    use crate::adapters::memory::CapturingReporter;
    use crate::ports::LinkKind;

    /// Counts mutations made through the real symlink linker.
    #[derive(Default)]
    struct CountingLinker {
        creates: AtomicUsize,
        removes: AtomicUsize,
    }

    impl CountingLinker {
        fn mutations(&self) -> (usize, usize) {
            (self.creates.load(Ordering::SeqCst), self.removes.load(Ordering::SeqCst))
        }
    }

    impl DirLinker for CountingLinker {
        fn kind(&self) -> LinkKind {
            SymlinkLinker.kind()
        }

        fn target(&self, root: &Path, marker: &Path, from_marker: &Path) -> io::Result<PathBuf> {
            SymlinkLinker.target(root, marker, from_marker)
        }

        fn read(&self, path: &Path) -> io::Result<PathBuf> {
            SymlinkLinker.read(path)
        }

        fn create(&self, path: &Path, target: &Path) -> io::Result<()> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            SymlinkLinker.create(path, target)
        }

        fn remove(&self, path: &Path) -> io::Result<()> {
            self.removes.fetch_add(1, Ordering::SeqCst);
            SymlinkLinker.remove(path)
        }
    }

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(MARKER)).unwrap();
        dir
    }

    fn expected_target() -> PathBuf {
        Path::new(MARKER).join(FROM_MARKER)
    }

    #[test]
    fn creates_missing_link_with_relative_target() {
        let ws = workspace();
        let linker = CountingLinker::default();
        let reporter = CapturingReporter::new();

        let outcome = ensure_external_link(ws.path(), &linker, &reporter).unwrap();

        assert_eq!(outcome, LinkOutcome::Created);
        assert_eq!(std::fs::read_link(ws.path().join(LINK_PATH)).unwrap(), expected_target());
        assert_eq!(linker.mutations(), (1, 0));
        let successes = reporter.with_severity(Severity::Success);
        assert_eq!(successes.len(), 1);
        assert!(successes[0].contains("//external workspace link"));
    }

    #[test]
    fn second_run_is_a_no_op() {
        let ws = workspace();
        let reporter = CapturingReporter::new();
        ensure_external_link(ws.path(), &SymlinkLinker, &reporter).unwrap();

        let linker = CountingLinker::default();
        let quiet = CapturingReporter::new();
        let outcome = ensure_external_link(ws.path(), &linker, &quiet).unwrap();

        assert_eq!(outcome, LinkOutcome::Unchanged);
        assert_eq!(linker.mutations(), (0, 0));
        assert!(quiet.messages().is_empty());
    }

    #[test]
    fn equivalent_spelling_counts_as_correct() {
        let ws = workspace();
        std::os::unix::fs::symlink("bazel-out/./../../../external", ws.path().join(LINK_PATH))
            .unwrap();
        let linker = CountingLinker::default();

        let outcome = ensure_external_link(ws.path(), &linker, &CapturingReporter::new()).unwrap();

        assert_eq!(outcome, LinkOutcome::Unchanged);
        assert_eq!(linker.mutations(), (0, 0));
    }

    #[test]
    fn stale_link_is_replaced_exactly_once() {
        let ws = workspace();
        std::os::unix::fs::symlink("/somewhere/else", ws.path().join(LINK_PATH)).unwrap();
        let linker = CountingLinker::default();
        let reporter = CapturingReporter::new();

        let outcome = ensure_external_link(ws.path(), &linker, &reporter).unwrap();

        assert_eq!(outcome, LinkOutcome::Relinked);
        assert_eq!(linker.mutations(), (1, 1));
        assert_eq!(std::fs::read_link(ws.path().join(LINK_PATH)).unwrap(), expected_target());
        let warnings = reporter.with_severity(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("wrong place"));
    }

    #[test]
    fn dangling_stale_link_is_still_detected() {
        let ws = workspace();
        std::os::unix::fs::symlink("missing-dir", ws.path().join(LINK_PATH)).unwrap();

        let state = inspect(&SymlinkLinker, &ws.path().join(LINK_PATH), &expected_target()).unwrap();
        assert_eq!(state, LinkState::Stale(PathBuf::from("missing-dir")));
    }

    #[test]
    fn missing_marker_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let linker = CountingLinker::default();

        let err = ensure_external_link(dir.path(), &linker, &CapturingReporter::new()).unwrap_err();

        assert!(matches!(err, RefreshError::MissingBuildOutput { .. }));
        assert!(err.to_string().contains("bazel-out"));
        assert_eq!(linker.mutations(), (0, 0));
        assert!(std::fs::symlink_metadata(dir.path().join(LINK_PATH)).is_err());
    }

    #[test]
    fn dangling_marker_link_still_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink("/no/such/output", dir.path().join(MARKER)).unwrap();

        let outcome =
            ensure_external_link(dir.path(), &SymlinkLinker, &CapturingReporter::new()).unwrap();
        assert_eq!(outcome, LinkOutcome::Created);
    }

    #[test]
    fn ordinary_directory_is_left_untouched() {
        let ws = workspace();
        let occupied = ws.path().join(LINK_PATH);
        std::fs::create_dir(&occupied).unwrap();
        std::fs::write(occupied.join("keep.txt"), "user data").unwrap();
        let linker = CountingLinker::default();

        let err = ensure_external_link(ws.path(), &linker, &CapturingReporter::new()).unwrap_err();

        assert!(matches!(err, RefreshError::ReservedLinkPath { kind: "symlink", .. }));
        assert_eq!(linker.mutations(), (0, 0));
        assert_eq!(std::fs::read_to_string(occupied.join("keep.txt")).unwrap(), "user data");
    }

    #[test]
    fn ordinary_file_is_reported_as_occupied() {
        let ws = workspace();
        let occupied = ws.path().join(LINK_PATH);
        std::fs::write(&occupied, "not a link").unwrap();

        let state = inspect(&SymlinkLinker, &occupied, &expected_target()).unwrap();
        assert_eq!(state, LinkState::Occupied);
    }
}
