//! Document persistence for quill.
//!
//! An editor session's visible state (the file it was opened from and its
//! current text) can be exported as a [`Document`] and loaded back later.
//! Documents are stored as JSON files.
//!
//! Undo history is never persisted.

pub mod error;
pub mod json;

pub use error::{StorageError, StorageResult};
pub use json::JsonDocumentStore;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Serializable form of an editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File the content was opened from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Text content.
    pub content: String,
}

impl Document {
    pub fn new(file_path: Option<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            file_path,
            content: content.into(),
        }
    }
}

/// A backend that saves and loads documents by location.
pub trait DocumentStore {
    /// Persist `document` at `location`, replacing anything already there.
    fn save(&self, location: &Path, document: &Document) -> StorageResult<()>;

    /// Load the document at `location`.
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored there.
    fn load(&self, location: &Path) -> StorageResult<Document>;

    /// Check whether a document exists at `location`.
    fn exists(&self, location: &Path) -> StorageResult<bool>;
}
