//! Per-keyword index of matching files.

use crate::search::FileSearch;
use crate::walk::WalkOptions;
use crate::SearchResult;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Maps keywords to the files that contained them when last indexed.
///
/// Keywords are listed in the order they were first indexed. Re-indexing a
/// keyword replaces its file list in place.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    search: FileSearch,
    order: Vec<String>,
    entries: HashMap<String, Vec<PathBuf>>,
}

/// One keyword and its matching files, as listed by [`KeywordIndex::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexEntry<'a> {
    pub keyword: &'a str,
    pub paths: &'a [PathBuf],
}

impl KeywordIndex {
    /// Create an empty index over `.txt` files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with custom file selection.
    pub fn with_options(options: WalkOptions) -> Self {
        Self {
            search: FileSearch::with_options(options),
            ..Self::default()
        }
    }

    /// Scan `root` and record every file containing `keyword`.
    ///
    /// The keyword's previous entry is replaced only once the whole scan has
    /// succeeded; on error it is left as it was. Returns the number of
    /// matching files.
    pub fn index_directory(&mut self, root: impl AsRef<Path>, keyword: &str) -> SearchResult<usize> {
        let root = root.as_ref();
        let paths = scan(&self.search, root, keyword)?;
        let count = paths.len();
        self.commit(keyword, paths);
        info!(root = %root.display(), keyword = %keyword, files = count, "Indexed keyword");
        Ok(count)
    }

    /// Store `paths` as the entry for `keyword`, replacing any previous one.
    pub(crate) fn commit(&mut self, keyword: &str, paths: Vec<PathBuf>) {
        if self.entries.insert(keyword.to_string(), paths).is_none() {
            self.order.push(keyword.to_string());
        }
    }

    /// Iterate keywords and their files in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = IndexEntry<'_>> + '_ {
        self.order.iter().filter_map(move |keyword| {
            self.entries.get(keyword).map(|paths| IndexEntry {
                keyword: keyword.as_str(),
                paths: paths.as_slice(),
            })
        })
    }

    /// Files recorded for `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&[PathBuf]> {
        self.entries.get(keyword).map(Vec::as_slice)
    }

    /// Indexed keywords in insertion order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Forget `keyword`.
    pub fn remove(&mut self, keyword: &str) -> Option<Vec<PathBuf>> {
        let removed = self.entries.remove(keyword)?;
        self.order.retain(|k| k != keyword);
        Some(removed)
    }

    /// Number of indexed keywords.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn options(&self) -> &WalkOptions {
        self.search.options()
    }
}

/// Collect every match, stopping at the first failure.
pub(crate) fn scan(search: &FileSearch, root: &Path, keyword: &str) -> SearchResult<Vec<PathBuf>> {
    search.search_files(root, keyword).collect()
}

/// Lists each keyword with its files. Keywords that matched nothing are
/// left out; [`KeywordIndex::entries`] still reports them.
impl fmt::Display for KeywordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries().filter(|e| !e.paths.is_empty()) {
            writeln!(f, "Keyword: {}", entry.keyword)?;
            for path in entry.paths {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}
