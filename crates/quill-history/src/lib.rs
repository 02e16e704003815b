//! Snapshot history for quill.
//!
//! This crate provides the undo engine behind an editor session:
//! - Immutable full-content snapshots
//! - A LIFO store with pop-most-recent undo
//! - Optional depth bound that discards the oldest entries
//! - Unified diffs between saved and live content (display only)
//!
//! # Example
//!
//! ```
//! use quill_history::SnapshotStore;
//!
//! let mut history = SnapshotStore::new();
//! history.push("first draft");
//! history.push("second draft");
//!
//! assert_eq!(history.pop_latest().unwrap().content(), "second draft");
//! assert_eq!(history.pop_latest().unwrap().content(), "first draft");
//! assert!(history.pop_latest().is_none());
//! ```

mod error;
mod snapshot;
mod store;

pub use error::{HistoryError, HistoryResult};
pub use snapshot::{generate_diff, Snapshot, SnapshotId};
pub use store::{HistoryConfig, SnapshotStore};
