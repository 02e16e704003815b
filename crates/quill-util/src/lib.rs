//! Shared utilities for quill.
//!
//! This crate provides common utilities used across the quill workspace:
//! - Error handling patterns
//! - Logging setup with tracing
//! - Path utilities

pub mod error;
pub mod log;
pub mod path;

pub use error::{Error, ErrorKind, Result};
pub use log::{LogConfig, LogLevel};
