//! Snapshot storage implementation.

use crate::{HistoryError, HistoryResult, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Configuration for snapshot storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept; `None` keeps every snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl HistoryConfig {
    /// Reject bounds that would make undo impossible.
    pub fn validate(&self) -> HistoryResult<()> {
        match self.max_depth {
            Some(0) => Err(HistoryError::InvalidDepth(0)),
            _ => Ok(()),
        }
    }
}

/// LIFO storage for editor snapshots.
///
/// The most recently pushed snapshot is the first to be popped. There is no
/// redo: a popped snapshot is gone. When a depth bound is configured the
/// oldest snapshot is discarded to make room for a new one.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    /// Oldest at the front, newest at the back.
    snapshots: VecDeque<Snapshot>,

    config: HistoryConfig,
}

impl SnapshotStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: HistoryConfig) -> HistoryResult<Self> {
        config.validate()?;
        Ok(Self {
            snapshots: VecDeque::new(),
            config,
        })
    }

    /// Capture `content` as the most recent snapshot.
    pub fn push(&mut self, content: impl Into<String>) -> &Snapshot {
        let snapshot = Snapshot::new(content);

        if let Some(max) = self.config.max_depth {
            while self.snapshots.len() >= max {
                if let Some(dropped) = self.snapshots.pop_front() {
                    trace!(id = %dropped.id(), "Dropped oldest snapshot");
                }
            }
        }

        debug!(
            id = %snapshot.id(),
            bytes = snapshot.len(),
            depth = self.snapshots.len() + 1,
            "Pushed snapshot"
        );
        self.snapshots.push_back(snapshot);
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Remove and return the most recent snapshot.
    ///
    /// Returns `None` when the store is empty; callers treat that as a no-op.
    pub fn pop_latest(&mut self) -> Option<Snapshot> {
        let snapshot = self.snapshots.pop_back();
        match &snapshot {
            Some(s) => debug!(id = %s.id(), depth = self.snapshots.len(), "Popped snapshot"),
            None => debug!("Pop on empty history"),
        }
        snapshot
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The configured depth bound, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.config.max_depth
    }

    /// Iterate snapshots newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> + '_ {
        self.snapshots.iter().rev()
    }
}
