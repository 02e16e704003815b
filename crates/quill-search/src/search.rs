//! Stateless keyword search.

use crate::walk::{read_text, TextFileWalker, WalkOptions};
use crate::SearchResult;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One-shot scanner returning files whose text contains a keyword.
///
/// Nothing is cached between calls; every search re-reads the tree.
#[derive(Debug, Clone, Default)]
pub struct FileSearch {
    options: WalkOptions,
}

impl FileSearch {
    /// Search `.txt` files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search with custom file selection.
    pub fn with_options(options: WalkOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Lazily yield files under `root` whose content contains `keyword`.
    ///
    /// Matching is case-sensitive literal containment. Walk and read failures
    /// are yielded as `Err` items; collect into `Result<Vec<_>, _>` to stop at
    /// the first one.
    pub fn search_files(&self, root: impl AsRef<Path>, keyword: &str) -> SearchFiles {
        let root = root.as_ref();
        debug!(root = %root.display(), keyword = %keyword, "Searching files");
        SearchFiles {
            files: Box::new(TextFileWalker::new(root, self.options.clone()).files()),
            keyword: keyword.to_string(),
        }
    }
}

/// Iterator returned by [`FileSearch::search_files`].
pub struct SearchFiles {
    files: Box<dyn Iterator<Item = SearchResult<PathBuf>> + Send>,
    keyword: String,
}

impl Iterator for SearchFiles {
    type Item = SearchResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = match self.files.next()? {
                Ok(path) => path,
                Err(e) => return Some(Err(e)),
            };
            match read_text(&path) {
                Ok(text) if text.contains(self.keyword.as_str()) => {
                    debug!(path = %path.display(), "Match");
                    return Some(Ok(path));
                }
                Ok(_) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl std::fmt::Debug for SearchFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFiles")
            .field("keyword", &self.keyword)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchError;
    use quill_test_utils::TestProject;

    #[test]
    fn test_scenario_hello_world() {
        let project = TestProject::new()
            .with_file("a.txt", "hello world")
            .with_file("b.txt", "hello there")
            .build();
        let search = FileSearch::new();

        let hello: Vec<PathBuf> = search
            .search_files(project.path(), "hello")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            hello,
            vec![project.path().join("a.txt"), project.path().join("b.txt")]
        );

        let world: Vec<PathBuf> = search
            .search_files(project.path(), "world")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(world, vec![project.path().join("a.txt")]);
    }

    #[test]
    fn test_case_sensitive() {
        let project = TestProject::new()
            .with_file("a.txt", "Hello")
            .with_file("b.txt", "hello")
            .build();

        let found: Vec<PathBuf> = FileSearch::new()
            .search_files(project.path(), "Hello")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(found, vec![project.path().join("a.txt")]);
    }

    #[test]
    fn test_substring_not_word_match() {
        let project = TestProject::new().with_file("a.txt", "subway").build();

        let found: Vec<PathBuf> = FileSearch::new()
            .search_files(project.path(), "bwa")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        let project = TestProject::new().with_file("a.txt", "nothing here").build();

        let mut results = FileSearch::new().search_files(project.path(), "absent");
        assert!(results.next().is_none());
    }

    #[test]
    fn test_non_text_files_ignored() {
        let project = TestProject::new()
            .with_file("a.txt", "needle")
            .with_file("b.md", "needle")
            .build();

        let found: Vec<PathBuf> = FileSearch::new()
            .search_files(project.path(), "needle")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(found, vec![project.path().join("a.txt")]);
    }

    #[test]
    fn test_missing_root_propagates() {
        let project = TestProject::new().build();
        let result: Result<Vec<PathBuf>, _> = FileSearch::new()
            .search_files(project.path().join("gone"), "x")
            .collect();
        assert!(matches!(result, Err(SearchError::RootNotFound(_))));
    }

    #[test]
    fn test_reflects_changes_between_calls() {
        let project = TestProject::new().with_file("a.txt", "old").build();
        let search = FileSearch::new();

        assert_eq!(search.search_files(project.path(), "new").count(), 0);
        project.write_file("a.txt", "new");
        assert_eq!(search.search_files(project.path(), "new").count(), 1);
        project.delete_file("a.txt");
        assert_eq!(search.search_files(project.path(), "new").count(), 0);
    }
}
