//! Core editing logic for quill.
//!
//! This crate provides:
//! - The editor session with snapshot-based linear undo
//! - File read/write primitives behind the `TextFs` trait
//! - Configuration management (multi-source, JSONC support)

pub mod config;
pub mod editor;
pub mod error;
pub mod fs;

pub use config::Config;
pub use editor::{EditorSession, SessionState, UndoOutcome};
pub use error::{ConfigError, CoreError, CoreResult};
pub use fs::{MemoryFs, OsFs, TextFs};
