//! Bottom-up removal of empty subdirectories.
//!
//! "Clean the insides but keep the shell" is a first-class mode: with
//! `include_self = false` the target directory itself survives even when it
//! ends up empty.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{io_ctx, Result};
use crate::tree::walk::{walk, Decision};

/// Post-order state of one pruned subtree. Failure is the `Err` arm of the
/// surrounding `Result`, so "operation failed" and "directory legitimately
/// non-empty" can never be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prune {
    /// All children are gone; the directory itself is removable.
    Empty,
    /// Files (or non-empty subtrees) remain.
    NonEmpty,
}

/// Remove every empty subdirectory under `dir`, bottom-up.
///
/// A missing `dir` is a trivial success. With `include_self = true` the
/// directory itself is also removed when it ended up empty. Non-empty
/// subtrees and their contents are left untouched.
pub fn clean_tree(dir: &Path, include_self: bool) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    if prune_children(dir)? == Prune::Empty && include_self {
        fs::remove_dir(dir).map_err(io_ctx("remove directory", dir))?;
        debug!(dir = %dir.display(), "removed emptied root");
    }
    Ok(())
}

/// Clean the subdirectories of `dir` and report whether `dir` itself ended
/// up empty. Children found empty after their own cleaning are removed here.
fn prune_children(dir: &Path) -> Result<Prune> {
    let entries = walk(dir, |_| Decision::Keep)?;
    let mut remaining = entries.len();

    for entry in entries.iter().filter(|e| e.is_dir) {
        if prune_children(&entry.path)? == Prune::Empty {
            fs::remove_dir(&entry.path).map_err(io_ctx("remove empty directory", &entry.path))?;
            remaining -= 1;
        }
    }

    Ok(if remaining == 0 { Prune::Empty } else { Prune::NonEmpty })
}
