//! CLI argument parsing for storelock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Storelock: exclusive lock guarding a local store directory.
///
/// Only one running instance may hold a store at a time. A second instance
/// is rejected immediately with a `store is locked` error naming the holder.
#[derive(Parser, Debug)]
#[command(name = "storelock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Store directory (default: $STORELOCK_STORE, then ~/.storelock).
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for storelock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show whether the store is locked and by whom.
    ///
    /// Never takes the lock over and never rewrites the lock file. A free
    /// store is locked for a moment while it is checked, so an instance
    /// starting at that instant may be rejected as if the previous holder
    /// were still running.
    Status,

    /// Acquire the store lock and hold it.
    ///
    /// Holds for the given number of seconds, or until a line (or EOF) is
    /// read from stdin.
    Hold(HoldArgs),

    /// Run a command while holding the store lock.
    ///
    /// The store directory is passed to the command as STORELOCK_STORE_DIR.
    /// The lock is released when the command exits, whatever its outcome.
    /// A failing command makes storelock exit with code 4; the command's own
    /// exit code is reported in the error message, not propagated.
    Run(RunArgs),
}

/// Arguments for the `hold` command.
#[derive(Parser, Debug)]
pub struct HoldArgs {
    /// Seconds to hold the lock instead of waiting on stdin.
    #[arg(long, value_name = "N")]
    pub seconds: Option<u64>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Program to run, followed by its arguments.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
