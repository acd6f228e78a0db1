//! Lock state reported by an inspection.

use super::metadata::LockMetadata;
use std::path::PathBuf;

/// State of a store directory's lock, as seen from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockState {
    /// There is no `LOCK` file (the store was never locked).
    Absent { path: PathBuf },

    /// The `LOCK` file exists but nobody holds it.
    ///
    /// `last` is whatever payload the previous holder left behind.
    Free {
        path: PathBuf,
        last: Option<LockMetadata>,
    },

    /// Another handle holds the lock.
    Held {
        path: PathBuf,
        holder: Option<LockMetadata>,
    },
}

impl LockState {
    /// The lock file path this state refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            LockState::Absent { path }
            | LockState::Free { path, .. }
            | LockState::Held { path, .. } => path,
        }
    }

    /// Short label used in CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockState::Absent { .. } => "absent",
            LockState::Free { .. } => "free",
            LockState::Held { .. } => "held",
        }
    }
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::Absent { path } => {
                write!(f, "not locked (no lock file at {})", path.display())
            }
            LockState::Free { path, .. } => write!(f, "not locked ({})", path.display()),
            LockState::Held { path, holder } => match holder {
                Some(meta) => write!(
                    f,
                    "locked by pid {} since {} ({} ago)",
                    meta.pid,
                    meta.acquired_at.to_rfc3339(),
                    meta.age_string()
                ),
                None => write!(f, "locked ({}; holder unknown)", path.display()),
            },
        }
    }
}
