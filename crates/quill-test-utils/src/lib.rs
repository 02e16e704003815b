//! Testing utilities and fixtures for quill.
//!
//! - **Fixtures**: temporary directory trees of text files
//! - **Assertions**: helpers for checking files and path lists
//!
//! # Example Usage
//!
//! ```rust
//! use quill_test_utils::TestProject;
//!
//! let project = TestProject::new()
//!     .with_file("a.txt", "hello world")
//!     .with_file("notes/b.txt", "hello there")
//!     .build();
//!
//! assert!(project.path().join("notes/b.txt").exists());
//! ```

pub mod assertions;
pub mod fixtures;

pub use fixtures::{BuiltTestProject, TestProject};
