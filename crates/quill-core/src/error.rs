//! Error types for the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Path does not resolve to an existing file.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Operation needs an open document.
    #[error("no file is open")]
    NotOpen,

    /// Reading a file failed for a reason other than absence.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document storage error.
    #[error("storage error: {0}")]
    Storage(#[from] quill_storage::StorageError),

    /// History configuration error.
    #[error("history error: {0}")]
    History(#[from] quill_history::HistoryError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Classify a read failure, mapping absence to [`CoreError::NotFound`].
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Read { path, source },
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a missing-file error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid JSON/JSONC syntax.
    #[error("invalid config at {path}: {message}")]
    InvalidJson { path: String, message: String },

    /// Config validation failed.
    #[error("config validation failed: {message}")]
    Validation { message: String },

    /// Environment variable not found during substitution.
    #[error("environment variable not found: {name}")]
    EnvVarNotFound { name: String },

    /// File reference not found during substitution.
    #[error("file reference not found: {path}")]
    FileRefNotFound { path: String },

    /// Invalid path (e.g., could not determine config directory).
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn read_maps_not_found() {
        let err = CoreError::read("a.txt", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "file not found: a.txt");
    }

    #[test]
    fn read_keeps_other_kinds() {
        let err = CoreError::read(
            "a.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CoreError::Read { .. }));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn write_error_display() {
        let err = CoreError::write("/ro/out.txt", io::Error::other("read-only"));
        assert_eq!(err.to_string(), "failed to write /ro/out.txt: read-only");
    }

    #[test]
    fn config_error_wraps() {
        let err: CoreError = ConfigError::Validation {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "config error: config validation failed: bad");
    }
}
