//! Test fixtures for creating reproducible directory trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of files, described before it is created.
///
/// The directory is removed when the built project is dropped.
///
/// # Example
///
/// ```rust
/// use quill_test_utils::fixtures::TestProject;
///
/// let project = TestProject::new()
///     .with_file("journal/monday.txt", "rain")
///     .with_dir("empty")
///     .build();
///
/// assert_eq!(project.read_file("journal/monday.txt"), "rain");
/// assert!(project.path().join("empty").is_dir());
/// ```
pub struct TestProject {
    /// The temporary directory backing this project.
    temp_dir: TempDir,
    /// Files to create (path relative to root -> contents).
    files: BTreeMap<PathBuf, String>,
    /// Directories to create (paths relative to root).
    dirs: Vec<PathBuf>,
}

impl TestProject {
    /// Create a new test project builder.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            files: BTreeMap::new(),
            dirs: Vec::new(),
        }
    }

    /// Add a file. Parent directories are created automatically.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), contents.into());
        self
    }

    /// Add an empty directory.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dirs.push(path.as_ref().to_path_buf());
        self
    }

    /// Add the two-file tree used throughout the search tests.
    pub fn with_greetings(self) -> Self {
        self.with_file("a.txt", content::HELLO_WORLD)
            .with_file("b.txt", content::HELLO_THERE)
    }

    /// Add a quill configuration file.
    pub fn with_config(self, config: &str) -> Self {
        self.with_file("quill.json", config)
    }

    /// Build the project, creating all files and directories.
    pub fn build(self) -> BuiltTestProject {
        let root = self.temp_dir.path();

        for dir in &self.dirs {
            let full_path = root.join(dir);
            fs::create_dir_all(&full_path).unwrap_or_else(|e| {
                panic!("Failed to create directory {}: {}", full_path.display(), e)
            });
        }

        for (path, contents) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).unwrap_or_else(|e| {
                    panic!(
                        "Failed to create parent directory for {}: {}",
                        full_path.display(),
                        e
                    )
                });
            }
            fs::write(&full_path, contents)
                .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
        }

        BuiltTestProject {
            temp_dir: self.temp_dir,
        }
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A built test project with files created on disk.
pub struct BuiltTestProject {
    temp_dir: TempDir,
}

impl BuiltTestProject {
    /// Get the path to the project root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a project-relative file.
    pub fn join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.path().join(path)
    }

    /// Read a file from the project.
    pub fn read_file(&self, path: impl AsRef<Path>) -> String {
        let full_path = self.join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", full_path.display(), e))
    }

    /// Write a file to the project (for modifying during tests).
    pub fn write_file(&self, path: impl AsRef<Path>, contents: impl AsRef<str>) {
        let full_path = self.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&full_path, contents.as_ref())
            .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
    }

    /// Create a symlink at `link` pointing to `target`, both relative to the
    /// project root. The target need not exist.
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, link: impl AsRef<Path>) {
        let target = self.join(target);
        let link = self.join(link);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).ok();
        }
        std::os::unix::fs::symlink(&target, &link).unwrap_or_else(|e| {
            panic!(
                "Failed to link {} -> {}: {}",
                link.display(),
                target.display(),
                e
            )
        });
    }

    /// Delete a file from the project.
    pub fn delete_file(&self, path: impl AsRef<Path>) {
        let full_path = self.join(path);
        fs::remove_file(&full_path)
            .unwrap_or_else(|e| panic!("Failed to delete file {}: {}", full_path.display(), e));
    }
}

/// Common test file contents.
pub mod content {
    pub const HELLO_WORLD: &str = "hello world";

    pub const HELLO_THERE: &str = "hello there";

    /// A quill configuration pointing at `root`.
    pub fn quill_config(root: &str, extension: &str) -> String {
        format!(
            r#"{{
    "root": "{root}",
    "extension": "{extension}"
}}"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_creates_files_and_dirs() {
        let project = TestProject::new()
            .with_file("x/y/z.txt", "deep")
            .with_dir("empty")
            .build();

        assert_eq!(project.read_file("x/y/z.txt"), "deep");
        assert!(project.join("empty").is_dir());
    }

    #[test]
    fn test_write_and_delete() {
        let project = TestProject::new().with_greetings().build();
        project.write_file("a.txt", "changed");
        assert_eq!(project.read_file("a.txt"), "changed");

        project.delete_file("b.txt");
        assert!(!project.join("b.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_resolves_to_target() {
        let project = TestProject::new().with_file("real/a.txt", "body").build();
        project.symlink("real/a.txt", "links/a.txt");

        assert_eq!(project.read_file("links/a.txt"), "body");
        assert!(project
            .join("links/a.txt")
            .symlink_metadata()
            .unwrap()
            .file_type()
            .is_symlink());
    }

    #[test]
    fn test_config_content() {
        let config = content::quill_config("/notes", ".md");
        assert!(config.contains(r#""root": "/notes""#));
        assert!(config.contains(r#""extension": ".md""#));
    }
}
