//! Configuration for storelock.
//!
//! The only setting is the store directory. It is resolved from the
//! `--store` flag, then the `STORELOCK_STORE` environment variable, then a
//! dot-directory in the user's home.

mod model;
mod operations;


// Re-export public API
pub use model::{DEFAULT_STORE_DIR_NAME, STORE_ENV_VAR, StoreConfig};
