//! Recursive merge copy/move of a directory tree.
//!
//! Merging combines the source into a possibly pre-existing destination;
//! it never deletes entries that are only present in the destination. The
//! operation is best-effort, not transactional: the first child failure
//! aborts the remaining work and whatever was already transferred stays
//! transferred.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{io_ctx, FsError, Result};
use crate::path::normalize;
use crate::tree::clean::clean_tree;
use crate::tree::walk::{walk, Decision};

/// Copy the directory tree at `from` into `to`, creating `to` if absent.
///
/// With `overwrite = false`, a file already present at a destination path is
/// left untouched and that source entry counts as successfully skipped.
pub fn copy_tree(from: &Path, to: &Path, overwrite: bool) -> Result<()> {
    transfer(from, to, overwrite, false)?;
    info!(from = %from.display(), to = %to.display(), "copied directory tree");
    Ok(())
}

/// Move the directory tree at `from` into `to`.
///
/// When `to` does not exist the whole move is a single atomic rename. In the
/// merge case, emptied source directories are pruned afterwards (including
/// the source root) so no orphaned shells remain; with `overwrite = false`
/// the source keeps exactly the subtree whose destinations were skipped.
/// Moving a directory onto itself is a no-op and leaves it in place.
pub fn move_tree(from: &Path, to: &Path, overwrite: bool) -> Result<()> {
    if transfer(from, to, overwrite, true)? == Transferred::Merged {
        clean_tree(from, true)?;
    }
    info!(from = %from.display(), to = %to.display(), "moved directory tree");
    Ok(())
}

/// Comparison key: normalized with `/` and no trailing separator, so that
/// `from == to` is detected regardless of spelling.
fn normalized_key(path: &Path) -> String {
    let normalized = normalize(&path.to_string_lossy(), Some("/"));
    normalized.trim_end_matches('/').to_string()
}

/// Which path a transfer took; only the merge path leaves emptied source
/// directories behind that a move must prune.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transferred {
    /// Source and destination are the same directory; nothing happened.
    Noop,
    /// Single top-level rename, source is already gone.
    Renamed,
    /// Recursive merge into an existing destination.
    Merged,
}

fn transfer(from: &Path, to: &Path, overwrite: bool, move_src: bool) -> Result<Transferred> {
    if !from.is_dir() {
        return Err(FsError::NotADirectory(from.to_path_buf()));
    }
    if normalized_key(from) == normalized_key(to) {
        return Ok(Transferred::Noop);
    }

    // Fast path: moving onto a non-existent destination is one rename,
    // no recursive copy.
    if move_src && !to.is_dir() {
        fs::rename(from, to).map_err(io_ctx("rename directory", from))?;
        return Ok(Transferred::Renamed);
    }

    merge(from, to, overwrite, move_src)?;
    Ok(Transferred::Merged)
}

fn merge(from: &Path, to: &Path, overwrite: bool, move_src: bool) -> Result<()> {
    if !to.is_dir() {
        fs::create_dir(to).map_err(io_ctx("create directory", to))?;
    }

    let mut failure: Option<FsError> = None;
    walk(from, |entry| {
        let dest = match entry.path.file_name() {
            Some(name) => to.join(name),
            // read_dir children always carry a final component
            None => return Decision::Skip,
        };

        let outcome = if entry.is_dir {
            if move_src && !dest.is_dir() {
                // Same rename shortcut as the top level, applied per subtree.
                fs::rename(&entry.path, &dest).map_err(io_ctx("rename directory", &entry.path))
            } else {
                merge(&entry.path, &dest, overwrite, move_src)
            }
        } else if !overwrite && dest.is_file() {
            debug!(dest = %dest.display(), "destination exists, entry skipped");
            Ok(())
        } else if move_src {
            fs::rename(&entry.path, &dest).map_err(io_ctx("move file", &entry.path))
        } else {
            fs::copy(&entry.path, &dest)
                .map(|_| ())
                .map_err(io_ctx("copy file", &entry.path))
        };

        match outcome {
            Ok(()) => Decision::Skip,
            Err(e) => {
                failure = Some(e);
                Decision::Stop
            }
        }
    })?;

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
