//! Adds generated-output patterns to the repository's hidden ignore file.
//!
//! Entries go into `<git-common-dir>/info/exclude` rather than a tracked
//! `.gitignore`, so nothing needs to be committed. The file is only ever
//! appended to: existing lines keep their exact bytes and order.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::RefreshError;
use crate::ports::{GitRepo, Reporter};

/// Comment line written above every block of added entries.
pub const HEADER: &str = "### Automatically added by Hedron's Bazel Compile Commands Extractor: \
https://github.com/hedronvision/bazel-compile-commands-extractor";

/// One required ignore pattern and the comment explaining it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    /// Pattern line, compared verbatim against existing lines.
    pub pattern: String,
    /// Full comment line (including the leading `#`) written above the pattern.
    pub explanation: &'static str,
}

/// Builds the required rules for a workspace at `prefix` inside the repository.
///
/// `prefix` is what `git rev-parse --show-prefix` prints: empty at the
/// repository root, otherwise a relative path ending in `/`.
#[must_use]
pub fn catalog(prefix: &str) -> Vec<IgnoreRule> {
    vec![
        IgnoreRule {
            pattern: format!("/{prefix}external"),
            explanation: "# Ignore the `external` link (that is added by `bazel-compile-commands-extractor`). \
The link differs between macOS/Linux and Windows, so it shouldn't be checked in. \
The pattern must not end with a trailing `/` because it's a symlink on macOS/Linux.",
        },
        IgnoreRule {
            pattern: format!("/{prefix}bazel-*"),
            explanation: "# Ignore links to Bazel's output. \
The pattern needs the `*` because people can change the name of the directory into which your repository is cloned \
(changing the `bazel-<workspace_name>` symlink), and must not end with a trailing `/` because it's a symlink on macOS/Linux. \
This ignore pattern should almost certainly be checked into a .gitignore in your workspace root, too, for folks who don't use this tool.",
        },
        IgnoreRule {
            pattern: format!("/{prefix}compile_commands.json"),
            explanation: "# Ignore generated output. \
Although valuable (after all, the primary purpose of `bazel-compile-commands-extractor` is to produce `compile_commands.json`!), \
it should not be checked in.",
        },
        IgnoreRule {
            pattern: ".cache/".to_string(),
            explanation: "# Ignore the directory in which `clangd` stores its local index.",
        },
    ]
}

/// Splits file content into lines with trailing whitespace removed.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Only for comparison: an
/// escaped trailing space (`foo\ `) is significant to git, so trimmed lines
/// must never be written back.
#[must_use]
pub fn comparable_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        lines.push(rest[..end].trim_end());
        rest = &rest[end..];
        rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix(['\r', '\n']))
            .unwrap_or(rest);
    }
    lines
}

/// Rules whose pattern is not already a line of the file, in catalog order.
///
/// Matching is exact string equality; `/foo` and `/foo/` are different entries.
#[must_use]
pub fn missing<'c>(existing: &[&str], catalog: &'c [IgnoreRule]) -> Vec<&'c IgnoreRule> {
    catalog.iter().filter(|rule| !existing.contains(&rule.pattern.as_str())).collect()
}

/// Lines to append so every catalog rule is present; empty when nothing is missing.
///
/// A blank spacer precedes the header when the file's last line has content.
#[must_use]
pub fn lines_to_append(existing: &[&str], catalog: &[IgnoreRule]) -> Vec<String> {
    let missing = missing(existing, catalog);
    if missing.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(2 + missing.len() * 2);
    if existing.last().is_some_and(|last| !last.is_empty()) {
        lines.push(String::new());
    }
    lines.push(HEADER.to_string());
    for rule in missing {
        lines.push(rule.explanation.to_string());
        lines.push(rule.pattern.clone());
    }
    lines
}

/// What reconciling the exclude file did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeOutcome {
    /// The workspace is not inside a git repository; nothing was touched.
    NotARepository,
    /// Every rule was already present in the file at this path.
    UpToDate(PathBuf),
    /// Rules were appended to the file at `path`.
    Appended {
        /// The exclude file.
        path: PathBuf,
        /// How many rules were added.
        added: usize,
    },
}

/// Ensures the repository's `info/exclude` lists every catalog rule.
///
/// Silently does nothing outside a git repository.
///
/// # Errors
///
/// Returns [`RefreshError::Git`] if the prefix lookup fails and
/// [`RefreshError::Io`] if the exclude file cannot be read or appended to.
pub fn ensure_exclude_entries(
    root: &Path,
    git: &dyn GitRepo,
    reporter: &dyn Reporter,
) -> Result<ExcludeOutcome, RefreshError> {
    let Some(git_dir) = git.common_dir(root) else {
        return Ok(ExcludeOutcome::NotARepository);
    };

    // Some older git versions don't create info/ on init.
    let info_dir = git_dir.join("info");
    match fs::create_dir(&info_dir) {
        Err(e) if e.kind() != io::ErrorKind::AlreadyExists => {
            return Err(RefreshError::io(format!("creating {}", info_dir.display()), e));
        }
        _ => {}
    }
    let path = info_dir.join("exclude");

    let prefix = git.show_prefix(root).map_err(|e| RefreshError::Git {
        context: "rev-parse --show-prefix",
        message: e.to_string(),
    })?;
    let rules = catalog(&prefix);

    let io_err = |what: &str, e: io::Error| RefreshError::io(format!("{what} {}", path.display()), e);
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(&path)
        .map_err(|e| io_err("opening", e))?;
    let mut raw = Vec::new();
    file.read_to_end(&mut raw).map_err(|e| io_err("reading", e))?;
    let content = String::from_utf8_lossy(&raw);

    let existing = comparable_lines(&content);
    let additions = lines_to_append(&existing, &rules);
    if additions.is_empty() {
        return Ok(ExcludeOutcome::UpToDate(path));
    }
    let added = missing(&existing, &rules).len();

    let mut block = String::new();
    if !content.is_empty() && !content.ends_with(['\n', '\r']) {
        block.push('\n');
    }
    for line in &additions {
        block.push_str(line);
        block.push('\n');
    }
    file.write_all(block.as_bytes()).map_err(|e| io_err("appending to", e))?;

    reporter.success(">>> Automatically added entries to .git/info/exclude to gitignore generated output.");
    Ok(ExcludeOutcome::Appended { path, added })
}
