//! Binary entrypoint for the `compdb-refresh` CLI.

use std::process::ExitCode;

use compdb_refresh::RefreshError;

fn main() -> ExitCode {
    // Recording is handled in commands::dispatch via COMPDB_REFRESH_RECORD=<dir>.
    match compdb_refresh::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RefreshError::Usage(err)) => err.exit(),
        // Already reported on stderr by `run`.
        Err(_) => ExitCode::FAILURE,
    }
}
