//! History error types.

use thiserror::Error;

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur while configuring a snapshot store.
///
/// Pushing and popping never fail; an empty store is reported through
/// `Option`, not through this type.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A depth bound of zero would make every undo a no-op.
    #[error("Invalid history depth: {0} (must be at least 1)")]
    InvalidDepth(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_depth_displays_value() {
        let err = HistoryError::InvalidDepth(0);
        assert_eq!(
            err.to_string(),
            "Invalid history depth: 0 (must be at least 1)"
        );
    }
}
