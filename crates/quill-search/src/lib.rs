//! Keyword search and indexing over a directory tree of text files.
//!
//! Matching is case-sensitive literal substring containment over each file's
//! full text. Files are selected by a case-sensitive name suffix (`.txt` by
//! default) and visited in file-name order at every level, so results are
//! deterministic.
//!
//! - [`FileSearch`] scans on every call and keeps nothing.
//! - [`KeywordIndex`] remembers the matching files per keyword until the
//!   keyword is indexed again.
//! - [`SharedKeywordIndex`] is a cloneable, thread-safe handle to an index.

pub mod error;
pub mod index;
pub mod search;
pub mod shared;
pub mod walk;

pub use error::{SearchError, SearchResult};
pub use index::{IndexEntry, KeywordIndex};
pub use search::{FileSearch, SearchFiles};
pub use shared::SharedKeywordIndex;
pub use walk::{TextFileWalker, WalkOptions};
