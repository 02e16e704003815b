//! Thread-safe handle to a keyword index.

use crate::index::{scan, KeywordIndex};
use crate::search::FileSearch;
use crate::walk::WalkOptions;
use crate::{SearchError, SearchResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard};
use tracing::{debug, info};

/// Cloneable handle to one long-lived [`KeywordIndex`].
///
/// Builds of the same keyword are serialized, scan and commit together, so
/// an older scan can never overwrite a newer result. Builds of different
/// keywords scan in parallel and only contend on the final write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedKeywordIndex {
    search: FileSearch,
    inner: Arc<RwLock<KeywordIndex>>,
    building: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl SharedKeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: WalkOptions) -> Self {
        Self {
            search: FileSearch::with_options(options.clone()),
            inner: Arc::new(RwLock::new(KeywordIndex::with_options(options))),
            building: Arc::default(),
        }
    }

    /// Scan `root` for `keyword` and replace its entry.
    pub fn index_directory(&self, root: impl AsRef<Path>, keyword: &str) -> SearchResult<usize> {
        let root = root.as_ref();
        let keyword_lock = self.keyword_lock(keyword)?;
        let _building = keyword_lock
            .lock()
            .map_err(|e| SearchError::LockPoisoned(e.to_string()))?;
        debug!(keyword = %keyword, "Acquired keyword build lock");

        let paths = scan(&self.search, root, keyword)?;
        let count = paths.len();

        self.inner
            .write()
            .map_err(|e| SearchError::LockPoisoned(e.to_string()))?
            .commit(keyword, paths);

        info!(root = %root.display(), keyword = %keyword, files = count, "Indexed keyword");
        Ok(count)
    }

    /// The mutex serializing builds of `keyword`, created on first use.
    fn keyword_lock(&self, keyword: &str) -> SearchResult<Arc<Mutex<()>>> {
        let mut building = self
            .building
            .lock()
            .map_err(|e| SearchError::LockPoisoned(e.to_string()))?;
        Ok(Arc::clone(building.entry(keyword.to_string()).or_default()))
    }

    /// Borrow the index for reading, e.g. to list its entries.
    pub fn read(&self) -> SearchResult<RwLockReadGuard<'_, KeywordIndex>> {
        self.inner
            .read()
            .map_err(|e| SearchError::LockPoisoned(e.to_string()))
    }

    /// Files recorded for `keyword`, copied out of the lock.
    pub fn get(&self, keyword: &str) -> SearchResult<Option<Vec<PathBuf>>> {
        Ok(self.read()?.get(keyword).map(<[PathBuf]>::to_vec))
    }
}
