//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (permission denied, disk full, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing stored at the location
    #[error("Document not found: {0}")]
    NotFound(String),
}

impl StorageError {
    /// Create a not found error for the given location.
    pub fn not_found(location: &std::path::Path) -> Self {
        Self::NotFound(location.display().to_string())
    }
}
