//! Lock acquisition, probing, and release helpers.

use super::LOCK_FILE_NAME;
use super::guard::StoreLock;
use super::metadata::LockMetadata;
use super::sys;
use super::types::LockState;
use crate::error::{Result, StoreError};
use crate::fs::ensure_store_dir;
use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

impl StoreLock {
    /// Acquire the exclusive lock on `store_dir`.
    ///
    /// Creates the directory (owner-only) if needed, opens or creates its
    /// `LOCK` file, and takes a non-blocking exclusive OS lock. On success the
    /// file is rewritten with this process's [`LockMetadata`].
    ///
    /// Never waits: if the lock is held, this returns immediately with
    /// [`StoreError::Locked`], whose message contains `store is locked` and the
    /// holder's payload when it could be read.
    ///
    /// Acquisition is not re-entrant. A second call for the same directory
    /// while a handle from this process is still held fails with the same
    /// contention error a foreign process would get.
    pub fn acquire<P: AsRef<Path>>(store_dir: P) -> Result<Self> {
        let store_dir = store_dir.as_ref();

        ensure_store_dir(store_dir).map_err(|source| StoreError::CreateDir {
            path: store_dir.to_path_buf(),
            source,
        })?;

        let path = store_dir.join(LOCK_FILE_NAME);
        let file = sys::open_options()
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StoreError::OpenLockFile {
                path: path.clone(),
                source,
            })?;

        if let Err(source) = sys::try_lock_exclusive(&file) {
            // Close before reading the holder's payload.
            drop(file);
            return Err(lock_failure(path, source));
        }

        let metadata = LockMetadata::current();
        let mut lock = StoreLock::new(path, file);
        if let Err(e) = lock.write_metadata(&metadata) {
            tracing::warn!(
                path = %lock.path().display(),
                error = %e,
                "failed to write lock metadata"
            );
        }

        tracing::debug!(
            path = %lock.path().display(),
            pid = metadata.pid,
            "acquired store lock"
        );
        Ok(lock)
    }

    fn write_metadata(&mut self, metadata: &LockMetadata) -> io::Result<()> {
        let Some(file) = self.file_mut() else {
            return Ok(());
        };
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(metadata.render().as_bytes())?;
        file.sync_all()
    }
}

/// Classify a failed lock attempt.
fn lock_failure(path: PathBuf, source: io::Error) -> StoreError {
    if source.kind() != io::ErrorKind::WouldBlock {
        return StoreError::LockFile { path, source };
    }

    // Diagnostic only: the holder may be mid-write, and read errors are ignored.
    let holder = fs::read_to_string(&path)
        .ok()
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    StoreError::Locked {
        path,
        holder,
        source,
    }
}

/// Release an optional handle, leaving `None` behind.
///
/// A `None` (never acquired, or already taken) is a no-op.
pub fn release(lock: &mut Option<StoreLock>) -> Result<()> {
    match lock.take() {
        Some(mut held) => held.release(),
        None => Ok(()),
    }
}

/// Inspect the lock state of `store_dir` without taking it over.
///
/// Never creates the directory or the lock file and never rewrites the
/// payload. The state is found by briefly taking the exclusive lock itself;
/// if that succeeds the lock is dropped again before returning.
///
/// That brief hold is visible to other processes. A [`StoreLock::acquire`]
/// racing with this call may fail with [`StoreError::Locked`] even though the
/// store is free, and its message then names the previous holder's pid from
/// the stale payload. Callers that must not see this should retry once.
pub fn inspect<P: AsRef<Path>>(store_dir: P) -> Result<LockState> {
    let path = store_dir.as_ref().join(LOCK_FILE_NAME);

    let file = match sys::open_options().open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(LockState::Absent { path });
        }
        Err(source) => return Err(StoreError::OpenLockFile { path, source }),
    };

    // Read before locking; on Windows the holder's region does not cover the payload.
    let payload = read_payload(&path);

    match sys::try_lock_exclusive(&file) {
        Ok(()) => {
            unlock_and_close(&path, file);
            Ok(LockState::Free {
                path,
                last: payload,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(LockState::Held {
            path,
            holder: payload,
        }),
        Err(source) => Err(StoreError::LockFile { path, source }),
    }
}

fn read_payload(path: &Path) -> Option<LockMetadata> {
    LockMetadata::from_file(path).ok().flatten()
}

fn unlock_and_close(path: &Path, file: File) {
    let result = sys::unlock(&file).and(sys::close(file));
    if let Err(e) = result {
        tracing::warn!(path = %path.display(), error = %e, "failed to drop momentary lock");
    }
}
