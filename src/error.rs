//! Error types for storelock.
//!
//! Uses thiserror for derive macros. Contention is recognisable by the
//! `store is locked` marker in the rendered message on every platform.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Substring present in every contention error message, and in no other.
///
/// Must stay the prefix of the `Locked` variant's `#[error]` format string.
pub const LOCKED_MARKER: &str = "store is locked";

/// Main error type for storelock operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store directory could not be created.
    #[error("create store dir '{}': {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// The lock file could not be opened or created.
    #[error("open lock file '{}': {source}", .path.display())]
    OpenLockFile { path: PathBuf, source: io::Error },

    /// The lock syscall failed for a reason other than contention.
    #[error("lock file '{}' could not be locked: {source}", .path.display())]
    LockFile { path: PathBuf, source: io::Error },

    /// Another live holder owns the exclusive lock.
    #[error("store is locked (another instance is running?): {source}{}", holder_suffix(.holder))]
    Locked {
        path: PathBuf,
        holder: Option<String>,
        source: io::Error,
    },

    /// Unlocking or closing the lock file failed.
    #[error("release lock '{}': {source}", .path.display())]
    Release { path: PathBuf, source: io::Error },

    /// Invalid user input or environment.
    #[error("{0}")]
    UserError(String),

    /// The command launched under the lock failed.
    #[error("command failed: {0}")]
    CommandFailed(String),
}

fn holder_suffix(holder: &Option<String>) -> String {
    match holder {
        Some(info) => format!(" ({})", info.lines().collect::<Vec<_>>().join(" ")),
        None => String::new(),
    }
}

impl StoreError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StoreError::UserError(_) => exit_codes::USER_ERROR,
            StoreError::CreateDir { .. }
            | StoreError::OpenLockFile { .. }
            | StoreError::LockFile { .. }
            | StoreError::Release { .. } => exit_codes::STORE_FAILURE,
            StoreError::Locked { .. } => exit_codes::LOCK_CONTENDED,
            StoreError::CommandFailed(_) => exit_codes::COMMAND_FAILURE,
        }
    }

    /// Whether this error means another holder owns the store.
    pub fn is_contention(&self) -> bool {
        matches!(self, StoreError::Locked { .. })
    }
}

/// Result type alias for storelock operations.
pub type Result<T> = std::result::Result<T, StoreError>;
