//! Storelock: exclusive lock guarding a local store directory.
//!
//! A process that owns a local persistent store takes the lock once at
//! startup, before opening the store, and releases it at shutdown:
//!
//! ```no_run
//! use storelock::locks::StoreLock;
//!
//! let mut lock = StoreLock::acquire("/tmp/store1")?;
//! // ... open and use the store ...
//! lock.release()?;
//! # Ok::<(), storelock::error::StoreError>(())
//! ```
//!
//! A second instance gets an error whose message contains
//! `store is locked`, along with the holder's pid and acquisition time.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod locks;
pub mod logging;
