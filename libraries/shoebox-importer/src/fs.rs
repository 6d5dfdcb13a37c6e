//! Filesystem abstraction
//!
//! Every side effect the importer has on disk goes through `FileSystem`, so
//! rollback can undo exactly what was done and tests can inject failures.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create a single directory; the parent must exist
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and every missing parent
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Copy `from` to `to`, replacing `to` only if `overwrite` is set
    fn copy(&self, from: &Path, to: &Path, overwrite: bool) -> io::Result<()>;

    fn file_len(&self, path: &Path) -> io::Result<u64>;

    fn modified(&self, path: &Path) -> io::Result<SystemTime>;
}

/// `FileSystem` backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn copy(&self, from: &Path, to: &Path, overwrite: bool) -> io::Result<()> {
        if !overwrite && to.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", to.display()),
            ));
        }
        fs::copy(from, to).map(|_| ())
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.jpg");
        let b = temp.path().join("b.jpg");
        fs::write(&a, b"new").unwrap();
        fs::write(&b, b"old").unwrap();

        let err = LocalFileSystem.copy(&a, &b, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&b).unwrap(), b"old");

        LocalFileSystem.copy(&a, &b, true).unwrap();
        assert_eq!(fs::read(&b).unwrap(), b"new");
    }

    #[test]
    fn test_remove_dir_fails_when_not_empty() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("2024");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("keep.jpg"), b"x").unwrap();

        assert!(LocalFileSystem.remove_dir(&dir).is_err());
        assert!(dir.exists());
    }
}
