//! `search` and `index` subcommands.

use anyhow::Context;
use quill_search::{FileSearch, KeywordIndex, WalkOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Print every file under `root` containing `keyword`, one per line.
///
/// Paths are streamed as they are found; with `json` they are collected and
/// printed as one array.
pub fn run_search(
    out: &mut impl Write,
    root: &Path,
    keyword: &str,
    options: WalkOptions,
    json: bool,
) -> anyhow::Result<()> {
    let search = FileSearch::with_options(options);
    let context = || format!("Search failed under {}", root.display());

    if json {
        let paths: Vec<PathBuf> = search
            .search_files(root, keyword)
            .collect::<Result<_, _>>()
            .with_context(context)?;
        writeln!(out, "{}", serde_json::to_string_pretty(&paths)?)?;
        return Ok(());
    }

    for path in search.search_files(root, keyword) {
        let path = path.with_context(context)?;
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

/// Index each keyword under `root` and print the resulting index.
pub fn run_index(
    out: &mut impl Write,
    root: &Path,
    keywords: &[String],
    options: WalkOptions,
    json: bool,
) -> anyhow::Result<()> {
    let mut index = KeywordIndex::with_options(options);
    for keyword in keywords {
        index
            .index_directory(root, keyword)
            .with_context(|| format!("Failed to index '{keyword}' under {}", root.display()))?;
    }

    if json {
        let entries: Vec<_> = index.entries().collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        write!(out, "{index}")?;
    }
    Ok(())
}
