//! Recursive enumeration of text files.

use crate::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Default suffix selecting text files.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Which files a walk yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOptions {
    /// Case-sensitive file-name suffix, e.g. `.txt`.
    pub extension: String,

    /// Whether to descend through symlinked directories. Symlinked files
    /// are always yielded when their target is a regular file.
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            follow_links: false,
        }
    }
}

impl WalkOptions {
    /// Options selecting files ending in `extension`.
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            ..Self::default()
        }
    }

    /// Set whether symlinks are followed.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Whether a file name passes the suffix filter.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(&self.extension))
    }
}

/// Enumerates matching files under a root, sorted by file name at each level.
#[derive(Debug, Clone)]
pub struct TextFileWalker {
    root: PathBuf,
    options: WalkOptions,
}

impl TextFileWalker {
    pub fn new(root: impl Into<PathBuf>, options: WalkOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield matching file paths.
    ///
    /// Enumeration errors are yielded in place and the walk continues past
    /// them; a missing root yields a single [`SearchError::RootNotFound`].
    pub fn files(&self) -> impl Iterator<Item = SearchResult<PathBuf>> {
        let root = self.root.clone();
        let options = self.options.clone();

        WalkDir::new(&self.root)
            .follow_links(options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if !options.matches(entry.path()) {
                        return None;
                    }
                    match is_text_file(&entry) {
                        Ok(true) => {
                            trace!(path = %entry.path().display(), "Candidate file");
                            Some(Ok(entry.into_path()))
                        }
                        Ok(false) => None,
                        Err(e) => Some(Err(e)),
                    }
                }
                Err(e) => Some(Err(walk_error(&root, e))),
            })
    }
}

/// Regular files, and symlinks whose target is one.
///
/// A dangling link is skipped; any other failure to stat the target is
/// reported.
fn is_text_file(entry: &walkdir::DirEntry) -> SearchResult<bool> {
    let file_type = entry.file_type();
    if !file_type.is_symlink() {
        return Ok(file_type.is_file());
    }
    match std::fs::metadata(entry.path()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %entry.path().display(), "Skipping dangling symlink");
            Ok(false)
        }
        Err(e) => Err(SearchError::read(entry.path(), e)),
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> SearchError {
    let missing_root = err.depth() == 0
        && err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
    if missing_root {
        return SearchError::RootNotFound(root.to_path_buf());
    }
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    SearchError::Walk { path, source: err }
}

/// Read a file's full text.
///
/// Invalid UTF-8 sequences are replaced rather than rejected so that a stray
/// byte does not hide the rest of the file from matching.
pub fn read_text(path: &Path) -> SearchResult<String> {
    let bytes = std::fs::read(path).map_err(|e| SearchError::read(path, e))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
