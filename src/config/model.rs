//! Configuration model for storelock.

use std::path::PathBuf;

/// Name of the store directory created under the home directory by default.
pub const DEFAULT_STORE_DIR_NAME: &str = ".storelock";

/// Environment variable overriding the default store directory.
pub const STORE_ENV_VAR: &str = "STORELOCK_STORE";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory guarded by the lock.
    pub store_dir: PathBuf,
}
