//! The store lock handle.

use super::sys;
use crate::error::{Result, StoreError};
use std::fs::File;
use std::path::{Path, PathBuf};

/// A held exclusive lock on a store directory.
///
/// Owns the open `LOCK` file handle. The lock is released by [`release`],
/// or when the handle is dropped, or by the operating system when the process
/// exits. If release fails during drop, a warning is logged but no panic
/// occurs.
///
/// [`release`]: StoreLock::release
#[derive(Debug)]
pub struct StoreLock {
    /// Path to the `LOCK` file.
    path: PathBuf,

    /// The locked file; `None` once released.
    file: Option<File>,
}

impl StoreLock {
    pub(super) fn new(path: PathBuf, file: File) -> Self {
        Self {
            path,
            file: Some(file),
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(super) fn file_mut(&mut self) -> Option<&mut File> {
        self.file.as_mut()
    }

    /// Whether this handle still holds the lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Unlock and close the lock file.
    ///
    /// Calling this on an already-released handle is a no-op. The handle is
    /// marked released even when the unlock or close call fails, so the error
    /// is reported exactly once. The `LOCK` file itself is left in place.
    pub fn release(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };

        let unlocked = sys::unlock(&file);
        let closed = sys::close(file);

        unlocked.and(closed).map_err(|source| StoreError::Release {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "released store lock");
        Ok(())
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(error = %e, "failed to release store lock on drop");
        }
    }
}
