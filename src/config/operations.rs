//! Config resolution.

use super::model::{DEFAULT_STORE_DIR_NAME, STORE_ENV_VAR, StoreConfig};
use crate::error::{Result, StoreError};
use std::ffi::OsString;
use std::path::PathBuf;

impl StoreConfig {
    /// Resolve the configuration from the flag, the environment and the home
    /// directory.
    pub fn resolve(store_flag: Option<PathBuf>) -> Result<Self> {
        Self::resolve_from(
            store_flag,
            std::env::var_os(STORE_ENV_VAR),
            dirs::home_dir(),
        )
    }

    /// Resolve from explicit inputs.
    ///
    /// Precedence: flag, then a non-empty environment value, then
    /// `<home>/.storelock`, then `.storelock` relative to the working
    /// directory when no home is known.
    pub fn resolve_from(
        store_flag: Option<PathBuf>,
        env_value: Option<OsString>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let store_dir = match store_flag {
            Some(flag) => flag,
            None => match env_value.filter(|v| !v.is_empty()) {
                Some(value) => PathBuf::from(value),
                None => match home.filter(|h| !h.as_os_str().is_empty()) {
                    Some(home) => home.join(DEFAULT_STORE_DIR_NAME),
                    None => PathBuf::from(DEFAULT_STORE_DIR_NAME),
                },
            },
        };

        let config = Self { store_dir };
        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    pub fn validate(&self) -> Result<()> {
        if self.store_dir.as_os_str().is_empty() {
            return Err(StoreError::UserError(
                "store directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
