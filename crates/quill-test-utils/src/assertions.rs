//! Assertion helpers for files and path lists.

use std::path::{Path, PathBuf};

/// Assert that a file's content equals expected text exactly.
///
/// # Example
///
/// ```rust
/// use quill_test_utils::assertions::assert_file_equals;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// let path = dir.path().join("note.txt");
/// std::fs::write(&path, "draft").unwrap();
///
/// assert_file_equals(&path, "draft");
/// ```
pub fn assert_file_equals(path: &Path, expected: &str) {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));

    assert_eq!(
        content,
        expected,
        "File {} content does not match expected.\nExpected:\n{}\nActual:\n{}",
        path.display(),
        expected,
        content
    );
}

/// Assert that `actual` lists exactly `expected`, given relative to `root`,
/// in the same order.
pub fn assert_paths_eq(actual: &[PathBuf], root: &Path, expected: &[&str]) {
    let expected: Vec<PathBuf> = expected.iter().map(|p| root.join(p)).collect();
    assert_eq!(
        actual,
        expected.as_slice(),
        "Path lists differ.\nExpected: {:?}\nActual: {:?}",
        expected,
        actual
    );
}
