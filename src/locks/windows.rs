//! Windows lock driver: `LockFileEx` byte-range locks.
//!
//! The lock covers a single byte at [`LOCK_OFFSET`], well past the metadata
//! payload. Windows range locks are mandatory, so locking byte 0 would stop
//! contenders from reading the holder's pid for their error message. Locking
//! beyond end-of-file is permitted and is still exclusive between handles.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::windows::io::{AsRawHandle, IntoRawHandle};
use windows_sys::Win32::Foundation::{CloseHandle, ERROR_IO_PENDING, ERROR_LOCK_VIOLATION, HANDLE};
use windows_sys::Win32::Storage::FileSystem::{
    LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx, UnlockFileEx,
};
use windows_sys::Win32::System::IO::OVERLAPPED;

/// Offset of the locked byte (1 GiB).
const LOCK_OFFSET: u64 = 1 << 30;

pub(super) fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true);
    options
}

fn overlapped_at(offset: u64) -> OVERLAPPED {
    unsafe {
        let mut overlapped: OVERLAPPED = std::mem::zeroed();
        overlapped.Anonymous.Anonymous.Offset = offset as u32;
        overlapped.Anonymous.Anonymous.OffsetHigh = (offset >> 32) as u32;
        overlapped
    }
}

/// Place an exclusive lock that fails immediately when contended.
///
/// Contention surfaces as `ErrorKind::WouldBlock`.
pub(super) fn try_lock_exclusive(file: &File) -> io::Result<()> {
    let handle = file.as_raw_handle() as HANDLE;
    let mut overlapped = overlapped_at(LOCK_OFFSET);
    let result = unsafe {
        LockFileEx(
            handle,
            LOCKFILE_EXCLUSIVE_LOCK | LOCKFILE_FAIL_IMMEDIATELY,
            0,
            1,
            0,
            &mut overlapped,
        )
    };

    if result == 0 {
        let err = io::Error::last_os_error();
        let contended = matches!(
            err.raw_os_error(),
            Some(code) if code == ERROR_LOCK_VIOLATION as i32 || code == ERROR_IO_PENDING as i32
        );
        if contended {
            return Err(io::Error::new(io::ErrorKind::WouldBlock, err));
        }
        return Err(err);
    }
    Ok(())
}

pub(super) fn unlock(file: &File) -> io::Result<()> {
    let handle = file.as_raw_handle() as HANDLE;
    let mut overlapped = overlapped_at(LOCK_OFFSET);
    let result = unsafe { UnlockFileEx(handle, 0, 1, 0, &mut overlapped) };
    if result == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Close the handle and report the result, which `Drop for File` discards.
pub(super) fn close(file: File) -> io::Result<()> {
    let handle = file.into_raw_handle() as HANDLE;
    if unsafe { CloseHandle(handle) } == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
