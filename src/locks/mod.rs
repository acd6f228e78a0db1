//! Exclusive lock on a store directory.
//!
//! Guards a local store directory so that only one running instance opens it
//! at a time. The lock is taken with the platform's native primitive and is
//! never waited on: a contended acquire fails immediately.
//!
//! # Lock File
//!
//! The marker file is `LOCK` inside the store directory. While held it
//! contains a diagnostic payload:
//!
//! ```text
//! pid=<process id>
//! acquired_at=<RFC3339 timestamp with nanoseconds>
//! ```
//!
//! The payload is advisory. Exclusivity comes from the OS lock alone, which
//! the operating system drops when the holding process exits, so a crashed
//! holder never leaves the store locked.
//!
//! # Platform Drivers
//!
//! - **Unix**: `flock(LOCK_EX | LOCK_NB)` on the whole file.
//! - **Windows**: `LockFileEx(LOCKFILE_EXCLUSIVE_LOCK | LOCKFILE_FAIL_IMMEDIATELY)`
//!   on a single byte.
//!
//! The driver is chosen at build time; both expose the same functions.

mod guard;
mod metadata;
mod operations;
mod types;

#[cfg(unix)]
mod unix;
#[cfg(unix)]
use unix as sys;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
use windows as sys;


/// Name of the marker file inside the store directory.
pub const LOCK_FILE_NAME: &str = "LOCK";

// Re-export public API
pub use guard::StoreLock;
pub use metadata::LockMetadata;
pub use operations::{inspect, release};
pub use types::LockState;
