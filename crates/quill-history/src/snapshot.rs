//! Snapshot data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub String);

impl SnapshotId {
    /// Create a new random snapshot ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for compact listings.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editor content captured at one point in time.
///
/// The content is shared behind an `Arc` and there is no mutable access,
/// so a snapshot never changes after it is taken.
#[derive(Debug, Clone)]
pub struct Snapshot {
    id: SnapshotId,
    timestamp: DateTime<Utc>,
    content: Arc<str>,
}

impl Snapshot {
    /// Capture `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: SnapshotId::new(),
            timestamp: Utc::now(),
            content: Arc::from(content.into()),
        }
    }

    pub fn id(&self) -> &SnapshotId {
        &self.id
    }

    /// When the snapshot was taken.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The captured text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume the snapshot, returning the captured text.
    pub fn into_content(self) -> String {
        self.content.to_string()
    }

    /// Size of the captured text in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Generate a unified diff between two strings.
pub fn generate_diff(old: &str, new: &str, label: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    output.push_str(&format!("--- a/{}\n", label));
    output.push_str(&format!("+++ b/{}\n", label));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };

                output.push_str(sign);
                output.push_str(change.value());
                if !change.value().ends_with('\n') {
                    output.push('\n');
                }
            }
        }
    }

    output
}
