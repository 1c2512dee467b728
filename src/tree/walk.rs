//! Single-level directory enumeration with a three-way continuation filter.
//!
//! Every recursive tree operation in this crate is built on `walk`: it lists
//! exactly one level, in whatever order the storage yields, and leaves the
//! recursion to the caller. The filter's `Stop` decision is how pagination
//! and first-failure aborts cut a traversal short without visiting the rest
//! of a level.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{io_ctx, Result};

/// Continuation decision returned by a walk filter for each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Accumulate the entry and continue.
    Keep,
    /// Exclude the entry and continue.
    Skip,
    /// Halt enumeration immediately; the entry producing `Stop` is excluded.
    Stop,
}

/// One item yielded during traversal: a path plus its directory flag.
///
/// Symlinks are followed as opaque entries — `is_dir` reflects the link
/// target, and no link-specific handling happens anywhere above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    /// Render the entry as the string form used by listings and markers:
    /// the path, with a trailing separator when the entry is a directory.
    pub fn marked_path(&self) -> String {
        let mut s = self.path.display().to_string();
        if self.is_dir {
            s.push(std::path::MAIN_SEPARATOR);
        }
        s
    }
}

/// Enumerate the immediate children of `dir`, consulting `filter` per entry.
///
/// Returns the kept entries in storage order, or an error when `dir` cannot
/// be opened for enumeration (missing, not a directory, permission denied).
pub fn walk<F>(dir: &Path, mut filter: F) -> Result<Vec<DirEntry>>
where
    F: FnMut(&DirEntry) -> Decision,
{
    let reader = fs::read_dir(dir).map_err(io_ctx("read directory", dir))?;

    let mut kept = Vec::new();
    for entry in reader {
        let entry = entry.map_err(io_ctx("read directory entry", dir))?;
        let path = entry.path();
        let is_dir = path.is_dir();
        let item = DirEntry { path, is_dir };
        match filter(&item) {
            Decision::Keep => kept.push(item),
            Decision::Skip => {}
            Decision::Stop => break,
        }
    }
    Ok(kept)
}
