//! Editor session with snapshot-based undo.
//!
//! A session holds the text of one opened file and a private
//! [`SnapshotStore`]. Every successful `open` starts a fresh history whose
//! first entry is the loaded text; every `edit` pushes the pre-edit text before
//! replacing it, so `undo` always returns to the state before the most recent
//! change.
//!
//! Failed operations leave both the content and the history untouched.

use crate::error::{CoreError, CoreResult};
use crate::fs::{OsFs, TextFs};
use quill_history::{generate_diff, HistoryConfig, SnapshotStore};
use quill_storage::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Whether a session has content loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    Open,
}

/// Result of an undo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// Content was replaced by the most recent snapshot.
    Restored,
    /// History was empty; content is unchanged.
    NoOp,
}

/// A single-user editing session over one text file.
#[derive(Debug)]
pub struct EditorSession<F: TextFs = OsFs> {
    fs: F,
    file_path: Option<PathBuf>,
    content: Option<String>,
    history: SnapshotStore,
    history_config: HistoryConfig,
}

impl EditorSession<OsFs> {
    /// Create an unopened session backed by the real filesystem.
    pub fn new() -> Self {
        Self::with_fs(OsFs)
    }
}

impl Default for EditorSession<OsFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TextFs> EditorSession<F> {
    /// Create an unopened session over the given filesystem.
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            file_path: None,
            content: None,
            history: SnapshotStore::new(),
            history_config: HistoryConfig::default(),
        }
    }

    /// Apply history settings to this session and every history it starts.
    pub fn with_history_config(mut self, config: HistoryConfig) -> CoreResult<Self> {
        self.history = SnapshotStore::with_config(config.clone())?;
        self.history_config = config;
        Ok(self)
    }

    /// Load `path` and start a fresh history with its text as the first entry.
    pub fn open(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let content = self.fs.read_to_string(path)?;
        self.install(Some(path.to_path_buf()), content)?;
        info!(path = %path.display(), "Opened file");
        Ok(())
    }

    /// Replace the content, recording the current text for undo.
    pub fn edit(&mut self, new_content: impl Into<String>) -> CoreResult<()> {
        let current = self.content.as_mut().ok_or(CoreError::NotOpen)?;
        let previous = std::mem::replace(current, new_content.into());
        self.history.push(previous);
        debug!(depth = self.history.len(), "Edited content");
        Ok(())
    }

    /// Restore the most recent snapshot, if any.
    pub fn undo(&mut self) -> UndoOutcome {
        match self.history.pop_latest() {
            Some(snapshot) => {
                self.content = Some(snapshot.into_content());
                debug!(depth = self.history.len(), "Undo restored snapshot");
                UndoOutcome::Restored
            }
            None => {
                debug!("Undo with empty history");
                UndoOutcome::NoOp
            }
        }
    }

    /// Write the current content to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let content = self.content.as_deref().ok_or(CoreError::NotOpen)?;
        self.fs.write(path, content)?;
        info!(path = %path.display(), bytes = content.len(), "Saved file");
        Ok(())
    }

    /// Write the current content back to the file it was opened from.
    pub fn save_in_place(&self) -> CoreResult<PathBuf> {
        let path = self.file_path.clone().ok_or(CoreError::NotOpen)?;
        self.save(&path)?;
        Ok(path)
    }

    /// Capture the visible state for persistence.
    pub fn to_document(&self) -> CoreResult<Document> {
        let content = self.content.clone().ok_or(CoreError::NotOpen)?;
        Ok(Document::new(self.file_path.clone(), content))
    }

    /// Load a previously exported document as if it had just been opened.
    pub fn restore_document(&mut self, document: Document) -> CoreResult<()> {
        let Document { file_path, content } = document;
        self.install(file_path, content)?;
        info!("Restored document");
        Ok(())
    }

    /// Unified diff from the opened file on disk to the current content.
    pub fn diff_against_saved(&self) -> CoreResult<String> {
        let path = self.file_path.as_deref().ok_or(CoreError::NotOpen)?;
        let current = self.content.as_deref().ok_or(CoreError::NotOpen)?;
        let saved = self.fs.read_to_string(path)?;
        Ok(generate_diff(&saved, current, &path.display().to_string()))
    }

    pub fn state(&self) -> SessionState {
        if self.content.is_some() {
            SessionState::Open
        } else {
            SessionState::Unopened
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }

    /// Current text, or `None` before anything is opened.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// File the content was loaded from.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Read-only view of the undo history.
    pub fn history(&self) -> &SnapshotStore {
        &self.history
    }

    /// Borrow the underlying filesystem.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Swap in new content and a fresh history seeded with it.
    fn install(&mut self, file_path: Option<PathBuf>, content: String) -> CoreResult<()> {
        let mut history = SnapshotStore::with_config(self.history_config.clone())?;
        history.push(content.clone());

        self.history = history;
        self.file_path = file_path;
        self.content = Some(content);
        Ok(())
    }
}
