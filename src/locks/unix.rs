//! Unix lock driver: `flock(2)` advisory locks.
//!
//! `flock` binds the lock to the open file description, so a second `open` of
//! the same file conflicts even inside the holding process, and the kernel
//! drops the lock when the last descriptor is closed or the process dies.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, IntoRawFd};

/// Options for opening the lock file: read/write, owner-only when created.
pub(super) fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true).mode(0o600);
    options
}

/// Place an exclusive, non-blocking lock over the whole file.
///
/// Contention surfaces as `ErrorKind::WouldBlock`.
pub(super) fn try_lock_exclusive(file: &File) -> io::Result<()> {
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result != 0 {
        // EWOULDBLOCK already maps to WouldBlock.
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub(super) fn unlock(file: &File) -> io::Result<()> {
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_UN) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Close the descriptor and report the result, which `Drop for File` discards.
pub(super) fn close(file: File) -> io::Result<()> {
    let fd = file.into_raw_fd();
    if unsafe { libc::close(fd) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
