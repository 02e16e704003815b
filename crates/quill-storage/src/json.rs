//! JSON file-based document storage.
//!
//! Each document is a pretty-printed JSON file. Relative locations resolve
//! against the store's base directory; absolute locations are used as-is.

use crate::{Document, DocumentStore, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON file-based document storage.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    base_path: PathBuf,
}

impl JsonDocumentStore {
    /// Create a new JSON store resolving relative locations under `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Get the file path for a location.
    fn resolve(&self, location: &Path) -> PathBuf {
        quill_util::path::absolutize(location, &self.base_path)
    }
}

impl DocumentStore for JsonDocumentStore {
    fn save(&self, location: &Path, document: &Document) -> StorageResult<()> {
        let path = self.resolve(location);
        debug!(path = %path.display(), bytes = document.content.len(), "Saving document");

        // Create parent directories
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(document)?;

        // Write atomically (write to temp file, then rename)
        let mut temp_name = path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn load(&self, location: &Path) -> StorageResult<Document> {
        let path = self.resolve(location);
        debug!(path = %path.display(), "Loading document");

        match fs::read_to_string(&path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(&path))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn exists(&self, location: &Path) -> StorageResult<bool> {
        Ok(self.resolve(location).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path());
        let doc = Document::new(Some(PathBuf::from("/notes/a.txt")), "hello\nworld");

        store.save(Path::new("a.json"), &doc).unwrap();

        let loaded = store.load(Path::new("a.json")).unwrap();
        assert_eq!(loaded, doc);
        assert!(!dir.path().join("a.json.tmp").exists());
    }

    #[test]
    fn test_load_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path());

        let result = store.load(Path::new("missing.json"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path());

        store
            .save(Path::new("nested/deep/doc.json"), &Document::default())
            .unwrap();
        assert!(store.exists(Path::new("nested/deep/doc.json")).unwrap());
    }

    #[test]
    fn test_absolute_location_ignores_base() {
        let base = tempdir().unwrap();
        let other = tempdir().unwrap();
        let store = JsonDocumentStore::new(base.path());
        let target = other.path().join("doc.json");

        store.save(&target, &Document::new(None, "x")).unwrap();
        assert!(target.exists());
        assert!(!base.path().join("doc.json").exists());
    }

    #[test]
    fn test_overwrite() {
        let dir = tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path());

        store.save(Path::new("d.json"), &Document::new(None, "first")).unwrap();
        store.save(Path::new("d.json"), &Document::new(None, "second")).unwrap();

        assert_eq!(store.load(Path::new("d.json")).unwrap().content, "second");
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "not json").unwrap();
        let store = JsonDocumentStore::new(dir.path());

        assert!(matches!(
            store.load(Path::new("bad.json")),
            Err(StorageError::Json(_))
        ));
    }
}
