//! Search error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while scanning a directory tree.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The directory to scan does not exist.
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Directory enumeration failed.
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A candidate file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lock was poisoned (another thread panicked while holding the lock)
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl SearchError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_not_found_displays_path() {
        let err = SearchError::RootNotFound(PathBuf::from("/nowhere"));
        assert_eq!(err.to_string(), "Directory not found: /nowhere");
    }

    #[test]
    fn read_error_displays_path_and_cause() {
        let err = SearchError::read(
            "/notes/a.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to read /notes/a.txt: denied");
    }
}
