//! Implementation of the `storelock run` command.
//!
//! Acquires the store lock, runs a child command, and releases the lock on
//! every exit path of the child.

use crate::cli::RunArgs;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::locks::StoreLock;
use std::process::{Command, ExitStatus};

/// Environment variable carrying the store directory into the child.
pub const STORE_DIR_ENV: &str = "STORELOCK_STORE_DIR";

/// Execute the `storelock run` command.
///
/// The lock file is opened close-on-exec, so the child never inherits the
/// lock itself; it only runs while this process holds it.
///
/// A child that exits unsuccessfully becomes [`StoreError::CommandFailed`].
/// Its exit code (or terminating signal) is carried in the message only; the
/// process exit code is always `COMMAND_FAILURE`.
pub fn cmd_run(config: &StoreConfig, args: &RunArgs) -> Result<()> {
    let (program, program_args) = args
        .command
        .split_first()
        .ok_or_else(|| StoreError::UserError("no command given".to_string()))?;

    let mut lock = StoreLock::acquire(&config.store_dir)?;
    tracing::info!(program = %program, "running under store lock");

    let status = Command::new(program)
        .args(program_args)
        .env(STORE_DIR_ENV, &config.store_dir)
        .status();

    if let Err(e) = lock.release() {
        tracing::warn!(error = %e, "release failed");
    }

    let status = status
        .map_err(|e| StoreError::CommandFailed(format!("failed to start `{}`: {}", program, e)))?;
    if !status.success() {
        let message = format!("`{}` {}", program, exit_description(status));
        return Err(StoreError::CommandFailed(message));
    }
    Ok(())
}

fn exit_description(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exited with code {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by signal {}", signal);
        }
    }

    format!("exited with {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> StoreConfig {
        StoreConfig {
            store_dir: temp_dir.path().join("store"),
        }
    }

    fn run_args(command: &[&str]) -> RunArgs {
        RunArgs {
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_command_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = cmd_run(&config_in(&temp_dir), &run_args(&[])).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn missing_program_fails_and_releases() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let err = cmd_run(&config, &run_args(&["storelock-no-such-program"])).unwrap_err();

        assert!(matches!(err, StoreError::CommandFailed(_)));
        let _lock = StoreLock::acquire(&config.store_dir).unwrap();
    }

    #[test]
    fn contended_store_does_not_run_command() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let _held = StoreLock::acquire(&config.store_dir).unwrap();

        let err = cmd_run(&config, &run_args(&["storelock-no-such-program"])).unwrap_err();

        assert!(err.is_contention());
    }

    #[cfg(unix)]
    #[test]
    fn child_sees_store_dir_and_runs_under_lock() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let marker = temp_dir.path().join("marker");
        let script = format!(
            "test \"${}\" = \"{}\" && grep -q '^pid=' \"${}/LOCK\" && touch \"{}\"",
            STORE_DIR_ENV,
            config.store_dir.display(),
            STORE_DIR_ENV,
            marker.display()
        );

        cmd_run(&config, &run_args(&["sh", "-c", &script])).unwrap();

        assert!(marker.exists());
        let _lock = StoreLock::acquire(&config.store_dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn failing_child_is_command_failure_and_releases() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let err = cmd_run(&config, &run_args(&["sh", "-c", "exit 3"])).unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::COMMAND_FAILURE);
        let msg = err.to_string();
        assert!(msg.contains("`sh` exited with code 3"), "{}", msg);
        let _lock = StoreLock::acquire(&config.store_dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn signalled_child_names_the_signal() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let err = cmd_run(&config, &run_args(&["sh", "-c", "kill -9 $$"])).unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::COMMAND_FAILURE);
        let msg = err.to_string();
        assert!(msg.contains("terminated by signal 9"), "{}", msg);
    }
}
