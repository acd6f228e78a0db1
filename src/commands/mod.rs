//! Command implementations for storelock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command resolves the store directory first.

mod hold;
mod run;
mod status;

use crate::cli::{Cli, Command};
use crate::config::StoreConfig;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = StoreConfig::resolve(cli.store)?;
    tracing::debug!(store = %config.store_dir.display(), "resolved store directory");

    match cli.command {
        Command::Status => status::cmd_status(&config, cli.json),
        Command::Hold(args) => hold::cmd_hold(&config, &args, cli.json),
        Command::Run(args) => run::cmd_run(&config, &args),
    }
}
