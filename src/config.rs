//! Run settings resolved from CLI flags and the process environment.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, ColorChoice};
use crate::error::RefreshError;

/// Set by `bazel run` to the root of the workspace the build ran in.
pub const WORKSPACE_ENV: &str = "BUILD_WORKSPACE_DIRECTORY";

/// When set to a directory, git interactions are recorded there as a cassette.
pub const RECORD_ENV: &str = "COMPDB_REFRESH_RECORD";

/// Settings shared by every step of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute or caller-relative workspace root; every step resolves paths against it.
    pub workspace_root: PathBuf,
    /// Whether stderr messages carry color escapes.
    pub color: bool,
    /// Cassette output directory, when recording.
    pub record_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from parsed CLI flags and the real environment.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::MissingWorkspace`] when no workspace root is available
    /// and [`RefreshError::InvalidWorkspace`] when it is not an existing directory.
    pub fn resolve(cli: &Cli) -> Result<Self, RefreshError> {
        let settings =
            Self::resolve_with(cli, |key| std::env::var(key).ok(), std::io::stderr().is_terminal())?;
        check_workspace_root(&settings.workspace_root)?;
        Ok(settings)
    }

    /// Resolve settings with an explicit environment lookup and terminal flag.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::MissingWorkspace`] when no workspace root is available.
    pub fn resolve_with<F>(cli: &Cli, env: F, stderr_is_tty: bool) -> Result<Self, RefreshError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

        let workspace_root = cli
            .workspace
            .clone()
            .or_else(|| non_empty(WORKSPACE_ENV).map(PathBuf::from))
            .ok_or(RefreshError::MissingWorkspace)?;

        let color = color_from(cli.color, non_empty("NO_COLOR").is_some(), stderr_is_tty);

        Ok(Self { workspace_root, color, record_dir: non_empty(RECORD_ENV).map(PathBuf::from) })
    }
}

/// Checks that `root` names an existing directory.
///
/// # Errors
///
/// Returns [`RefreshError::InvalidWorkspace`] naming the path otherwise.
pub fn check_workspace_root(root: &Path) -> Result<(), RefreshError> {
    let invalid =
        |reason: String| RefreshError::InvalidWorkspace { path: root.to_path_buf(), reason };
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(invalid("not a directory".to_string())),
        Err(e) => Err(invalid(e.to_string())),
    }
}

/// Whether stderr output should be colored under `choice` in this process.
#[must_use]
pub fn color_enabled(choice: ColorChoice) -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    color_from(choice, no_color, std::io::stderr().is_terminal())
}

fn color_from(choice: ColorChoice, no_color: bool, stderr_is_tty: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stderr_is_tty && !no_color,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn workspace_comes_from_bazel_env() {
        let cli = Cli::parse_from(["compdb-refresh"]);
        let settings =
            Settings::resolve_with(&cli, env_of(&[(WORKSPACE_ENV, "/src/ws")]), false).unwrap();
        assert_eq!(settings.workspace_root, Path::new("/src/ws"));
        assert!(settings.record_dir.is_none());
    }

    #[test]
    fn flag_overrides_env() {
        let cli = Cli::parse_from(["compdb-refresh", "--workspace", "/flag"]);
        let settings =
            Settings::resolve_with(&cli, env_of(&[(WORKSPACE_ENV, "/env")]), false).unwrap();
        assert_eq!(settings.workspace_root, Path::new("/flag"));
    }

    #[test]
    fn missing_or_empty_workspace_is_an_error() {
        let cli = Cli::parse_from(["compdb-refresh"]);
        let err = Settings::resolve_with(&cli, env_of(&[]), true).unwrap_err();
        assert!(matches!(err, RefreshError::MissingWorkspace));

        let err = Settings::resolve_with(&cli, env_of(&[(WORKSPACE_ENV, "")]), true).unwrap_err();
        assert!(matches!(err, RefreshError::MissingWorkspace));
    }

    #[test]
    fn auto_color_follows_tty_and_no_color() {
        let cli = Cli::parse_from(["compdb-refresh", "--workspace", "/ws"]);
        assert!(Settings::resolve_with(&cli, env_of(&[]), true).unwrap().color);
        assert!(!Settings::resolve_with(&cli, env_of(&[]), false).unwrap().color);
        assert!(!Settings::resolve_with(&cli, env_of(&[("NO_COLOR", "1")]), true).unwrap().color);
    }

    #[test]
    fn explicit_choice_ignores_environment() {
        assert!(color_from(ColorChoice::Always, true, false));
        assert!(!color_from(ColorChoice::Never, false, true));
    }

    #[test]
    fn workspace_root_must_be_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_workspace_root(dir.path()).is_ok());

        let gone = dir.path().join("nope");
        let err = check_workspace_root(&gone).unwrap_err();
        assert!(matches!(&err, RefreshError::InvalidWorkspace { path, .. } if *path == gone));

        let file = dir.path().join("afile");
        std::fs::write(&file, "").unwrap();
        let err = check_workspace_root(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn record_dir_from_env() {
        let cli = Cli::parse_from(["compdb-refresh", "--workspace", "/ws"]);
        let settings =
            Settings::resolve_with(&cli, env_of(&[(RECORD_ENV, "/tmp/rec")]), false).unwrap();
        assert_eq!(settings.record_dir.as_deref(), Some(Path::new("/tmp/rec")));
    }
}
