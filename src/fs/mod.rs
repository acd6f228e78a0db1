//! Filesystem utilities for storelock.
//!
//! Preparing the store directory is the only filesystem step that happens
//! before the lock file is touched.

mod store_dir;

pub use store_dir::ensure_store_dir;
