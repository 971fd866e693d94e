//! Core library entry for the `compdb-refresh` CLI.
//!
//! Prepares a Bazel workspace for a generated `compile_commands.json`: links
//! `//external` into the output base and keeps generated files out of git.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod reconcile;
pub mod term;

use clap::Parser;

pub use error::RefreshError;

use crate::adapters::live::reporter::StderrReporter;
use crate::cli::Command;
use crate::config::Settings;
use crate::ports::Reporter;

/// Run the CLI with the provided arguments.
///
/// Failures other than argument errors are reported on stderr before being
/// returned.
///
/// # Errors
///
/// Returns [`RefreshError::Usage`] when argument parsing fails, otherwise the
/// error of the first failing step.
pub fn run<I, T>(args: I) -> Result<(), RefreshError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    let command = cli.command.unwrap_or(Command::Refresh);
    let result = Settings::resolve(&cli).and_then(|settings| commands::dispatch(command, &settings));
    if let Err(err) = &result {
        StderrReporter::new(config::color_enabled(cli.color)).error(&err.to_string());
    }
    result
}
