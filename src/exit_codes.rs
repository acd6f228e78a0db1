//! Exit code constants for the storelock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unresolvable store directory)
//! - 2: Store failure (directory, lock file, or release I/O)
//! - 3: Store is locked by another instance
//! - 4: Child command failed (`storelock run`)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or a store directory that cannot be resolved.
pub const USER_ERROR: i32 = 1;

/// Store failure: the directory or lock file could not be prepared or released.
pub const STORE_FAILURE: i32 = 2;

/// Another instance holds the store lock.
pub const LOCK_CONTENDED: i32 = 3;

/// The command launched by `storelock run` failed.
pub const COMMAND_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            STORE_FAILURE,
            LOCK_CONTENDED,
            COMMAND_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
