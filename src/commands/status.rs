//! Implementation of the `storelock status` command.
//!
//! Reports whether the store is locked, and by which process, without
//! touching the lock file.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::locks::{self, LockState};
use chrono::SecondsFormat;
use serde::Serialize;

/// JSON document printed by `status --json`.
#[derive(Debug, Serialize)]
struct StatusReport {
    store_dir: String,
    lock_file: String,
    state: &'static str,
    locked: bool,
    /// Holder pid, or the last holder's when the lock is free.
    #[serde(skip_serializing_if = "Option::is_none")]
    pid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    acquired_at: Option<String>,
}

impl StatusReport {
    fn new(config: &StoreConfig, state: &LockState) -> Self {
        let holder = match state {
            LockState::Held { holder, .. } => holder.as_ref(),
            LockState::Free { last, .. } => last.as_ref(),
            LockState::Absent { .. } => None,
        };

        Self {
            store_dir: config.store_dir.display().to_string(),
            lock_file: state.path().display().to_string(),
            state: state.as_str(),
            locked: matches!(state, LockState::Held { .. }),
            pid: holder.map(|m| m.pid),
            acquired_at: holder.map(|m| m.acquired_at.to_rfc3339_opts(SecondsFormat::Nanos, true)),
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::UserError(format!("failed to serialize status: {}", e)))
    }
}

/// Execute the `storelock status` command.
pub fn cmd_status(config: &StoreConfig, json_output: bool) -> Result<()> {
    let state = locks::inspect(&config.store_dir)?;

    if json_output {
        println!("{}", StatusReport::new(config, &state).to_json()?);
        return Ok(());
    }

    println!("Store:  {}", config.store_dir.display());
    println!("Lock:   {}", state.path().display());
    println!("Status: {}", state);
    if let LockState::Free {
        last: Some(last), ..
    } = &state
    {
        println!("Last holder: pid {} ({} ago)", last.pid, last.age_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locks::StoreLock;
    use serde_json::Value;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> StoreConfig {
        StoreConfig {
            store_dir: temp_dir.path().join("store"),
        }
    }

    fn report_json(config: &StoreConfig) -> Value {
        let state = locks::inspect(&config.store_dir).unwrap();
        let json = StatusReport::new(config, &state).to_json().unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn json_for_absent_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let doc = report_json(&config);

        assert_eq!(doc["state"], "absent");
        assert_eq!(doc["locked"], false);
        assert!(doc.get("pid").is_none());
    }

    #[test]
    fn json_for_held_store_names_holder() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let _lock = StoreLock::acquire(&config.store_dir).unwrap();

        let doc = report_json(&config);

        assert_eq!(doc["state"], "held");
        assert_eq!(doc["locked"], true);
        assert_eq!(doc["pid"], std::process::id());
        assert!(doc["acquired_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn json_for_released_store_keeps_last_holder() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let mut lock = StoreLock::acquire(&config.store_dir).unwrap();
        lock.release().unwrap();

        let doc = report_json(&config);

        assert_eq!(doc["state"], "free");
        assert_eq!(doc["locked"], false);
        assert_eq!(doc["pid"], std::process::id());
    }

    #[test]
    fn status_does_not_create_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        cmd_status(&config, false).unwrap();
        cmd_status(&config, true).unwrap();

        assert!(!config.store_dir.exists());
    }
}
