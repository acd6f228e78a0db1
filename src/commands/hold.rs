//! Implementation of the `storelock hold` command.

use crate::cli::HoldArgs;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::locks::StoreLock;
use serde_json::json;
use std::io::BufRead;
use std::thread;
use std::time::Duration;

/// Execute the `storelock hold` command.
///
/// Acquires the lock, holds it for `--seconds` or until stdin yields a line
/// or EOF, then releases it. A release failure is logged, not returned.
pub fn cmd_hold(config: &StoreConfig, args: &HoldArgs, json_output: bool) -> Result<()> {
    let mut lock = StoreLock::acquire(&config.store_dir)?;

    if json_output {
        println!(
            "{}",
            json!({
                "locked": true,
                "lock_file": lock.path().display().to_string(),
                "pid": std::process::id(),
            })
        );
    } else {
        println!(
            "Holding {} (pid {})",
            lock.path().display(),
            std::process::id()
        );
    }

    match args.seconds {
        Some(seconds) => thread::sleep(Duration::from_secs(seconds)),
        None => {
            if !json_output {
                eprintln!("Press Enter to release.");
            }
            let mut line = String::new();
            match std::io::stdin().lock().read_line(&mut line) {
                Ok(0) => tracing::debug!("stdin closed; releasing"),
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "stdin read failed; releasing"),
            }
        }
    }

    if let Err(e) = lock.release() {
        tracing::warn!(error = %e, "release failed");
    }
    Ok(())
}
