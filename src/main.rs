//! Entry point for the `storelock` CLI.
//!
//! Parses arguments, sets up logging, dispatches to the appropriate command
//! handler, and handles errors with proper exit codes.

use std::process::ExitCode;
use storelock::cli::Cli;
use storelock::{commands, exit_codes, logging};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_tracing(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            if err.is_contention() {
                eprintln!("Stop the other instance, or pass --store to use a different store.");
            }

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
