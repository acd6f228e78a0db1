//! Store directory initialization.
//!
//! # Cross-Platform Behavior
//!
//! - **POSIX (Linux, macOS)**: Every directory created along the way gets mode
//!   `0o700` (owner-only, subject to the umask).
//! - **Windows**: Directories inherit the ACL of their parent; there is no
//!   mode to apply.
//!
//! Existing directories are left untouched, including their permissions.

use std::fs;
use std::io;
use std::path::Path;

/// Ensure `path` exists as a directory, creating missing parents.
///
/// Idempotent: succeeds silently when the directory is already there.
/// Fails when any component exists but is not a directory.
pub fn ensure_store_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }
    create_owner_only(path)
}

#[cfg(unix)]
fn create_owner_only(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)
}

#[cfg(windows)]
fn create_owner_only(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_parents() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("a").join("b").join("store");

        ensure_store_dir(&store).unwrap();

        assert!(store.is_dir());
    }

    #[test]
    fn is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("store");

        ensure_store_dir(&store).unwrap();
        ensure_store_dir(&store).unwrap();

        assert!(store.is_dir());
    }

    #[test]
    fn fails_when_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        assert!(ensure_store_dir(&file).is_err());
        assert!(ensure_store_dir(file.join("store")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn created_directories_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let parent = temp_dir.path().join("parent");
        let store = parent.join("store");

        ensure_store_dir(&store).unwrap();

        for dir in [&parent, &store] {
            let mode = fs::metadata(dir).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode & 0o077, 0, "{} has mode {:o}", dir.display(), mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn existing_permissions_are_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("store");
        fs::create_dir(&store).unwrap();
        fs::set_permissions(&store, fs::Permissions::from_mode(0o750)).unwrap();

        ensure_store_dir(&store).unwrap();

        let mode = fs::metadata(&store).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }
}
