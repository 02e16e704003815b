//! File read/write primitives used by the editor session.
//!
//! `OsFs` goes to disk; `MemoryFs` keeps files in a map so session behavior
//! can be tested without touching the filesystem.

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Whole-file text access.
pub trait TextFs {
    /// Read the full text of `path`.
    ///
    /// Fails with [`CoreError::NotFound`] when `path` is not an existing file.
    fn read_to_string(&self, path: &Path) -> CoreResult<String>;

    /// Replace the contents of `path` with `content`.
    fn write(&self, path: &Path, content: &str) -> CoreResult<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl TextFs for OsFs {
    fn read_to_string(&self, path: &Path) -> CoreResult<String> {
        if path.is_dir() {
            return Err(CoreError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::read(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read file");
        Ok(content)
    }

    fn write(&self, path: &Path, content: &str) -> CoreResult<()> {
        std::fs::write(path, content).map_err(|e| CoreError::write(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(())
    }
}

/// In-memory filesystem for tests.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<HashMap<PathBuf, String>>,
    read_only: bool,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filesystem where every write fails with permission denied.
    pub fn read_only() -> Self {
        Self {
            files: RwLock::default(),
            read_only: true,
        }
    }

    /// Seed a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(files) = self.files.get_mut() {
            files.insert(path.into(), content.into());
        }
        self
    }

    /// Current contents of `path`, if present.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }
}

fn poisoned() -> io::Error {
    io::Error::other("memory filesystem lock poisoned")
}

impl TextFs for MemoryFs {
    fn read_to_string(&self, path: &Path) -> CoreResult<String> {
        let files = self.files.read().map_err(|_| CoreError::read(path, poisoned()))?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> CoreResult<()> {
        if self.read_only {
            return Err(CoreError::write(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only filesystem"),
            ));
        }
        let mut files = self.files.write().map_err(|_| CoreError::write(path, poisoned()))?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn os_fs_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");

        OsFs.write(&path, "hello").unwrap();
        assert_eq!(OsFs.read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn os_fs_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = OsFs.read_to_string(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn os_fs_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = OsFs.read_to_string(dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn os_fs_write_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let err = OsFs
            .write(&dir.path().join("missing/out.txt"), "x")
            .unwrap_err();
        assert!(matches!(err, CoreError::Write { .. }));
    }

    #[test]
    fn memory_fs_behaves_like_disk() {
        let fs = MemoryFs::new().with_file("/a.txt", "seed");
        assert_eq!(fs.read_to_string(Path::new("/a.txt")).unwrap(), "seed");
        assert!(fs.read_to_string(Path::new("/b.txt")).unwrap_err().is_not_found());

        fs.write(Path::new("/b.txt"), "new").unwrap();
        assert_eq!(fs.get(Path::new("/b.txt")).as_deref(), Some("new"));
    }

    #[test]
    fn memory_fs_read_only_rejects_writes() {
        let fs = MemoryFs::read_only();
        let err = fs.write(Path::new("/x.txt"), "data").unwrap_err();
        assert!(matches!(err, CoreError::Write { .. }));
        assert!(fs.get(Path::new("/x.txt")).is_none());
    }
}
