//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `compdb-refresh`.
#[derive(Debug, Parser)]
#[command(
    name = "compdb-refresh",
    version,
    about = "Link //external and gitignore generated files for compile_commands.json"
)]
pub struct Cli {
    /// Workspace root; defaults to `BUILD_WORKSPACE_DIRECTORY` set by `bazel run`.
    #[arg(long, value_name = "DIR", global = true)]
    pub workspace: Option<PathBuf>,

    /// When to color status messages.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// The step to run; runs every step when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run every step: exclude entries, external link, install compile_commands.json.
    Refresh,
    /// Create or repair the //external link into Bazel's output base.
    Link,
    /// Add generated-output entries to .git/info/exclude.
    Exclude,
    /// Copy bazel-bin/compile_commands.json into the workspace root.
    Install,
}

/// Color policy for stderr messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and `NO_COLOR` is unset.
    Auto,
    /// Always emit color escapes.
    Always,
    /// Never emit color escapes.
    Never,
}

#[cfg(test)]
mod tests {
    use super::{Cli, ColorChoice, Command};
    use clap::Parser;

    #[test]
    fn no_subcommand_means_full_refresh() {
        let cli = Cli::parse_from(["compdb-refresh"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn parses_link_subcommand() {
        let cli = Cli::parse_from(["compdb-refresh", "link"]);
        assert_eq!(cli.command, Some(Command::Link));
    }

    #[test]
    fn workspace_flag_is_global() {
        let cli = Cli::parse_from(["compdb-refresh", "exclude", "--workspace", "/ws"]);
        assert_eq!(cli.command, Some(Command::Exclude));
        assert_eq!(cli.workspace.as_deref(), Some(std::path::Path::new("/ws")));
    }

    #[test]
    fn parses_color_never() {
        let cli = Cli::parse_from(["compdb-refresh", "--color", "never", "install"]);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.command, Some(Command::Install));
    }
}
