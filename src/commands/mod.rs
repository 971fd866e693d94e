//! Command dispatch and handlers.

pub mod exclude;
pub mod install;
pub mod link;
pub mod refresh;

use crate::adapters::live::reporter::StderrReporter;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::RefreshError;
use crate::ports::Reporter;

/// Dispatch a command to its handler.
///
/// When `COMPDB_REFRESH_RECORD` is set to a directory, git interactions are
/// recorded to a cassette in that directory.
///
/// # Errors
///
/// Returns the first error raised by the selected step, or a cassette error
/// if the recording cannot be written.
pub fn dispatch(command: Command, settings: &Settings) -> Result<(), RefreshError> {
    let ctx = ServiceContext::from_settings(settings);
    let result = dispatch_with_context(command, &ctx, settings);

    // Finish recording after the command completes, even on error
    let recorded = ctx.finish();
    result?;
    if let Some(path) = recorded? {
        let reporter = StderrReporter::new(settings.color);
        reporter.info(&format!(">>> Recording saved to: {}", path.display()));
    }
    Ok(())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns the first error raised by the selected step.
pub fn dispatch_with_context(
    command: Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), RefreshError> {
    let root = settings.workspace_root.as_path();
    match command {
        Command::Refresh => refresh::run(ctx, root),
        Command::Link => link::run(ctx, root).map(drop),
        Command::Exclude => exclude::run(ctx, root).map(drop),
        Command::Install => install::run(root).map(drop),
    }
}
