//! Marker-resumable, size-capped directory listing.
//!
//! Built directly on the walker: traversal is pre-order depth-first when
//! expansion is requested, the `marker` designates a resume point from a
//! previous page, and collection halts with a `Stop` decision the moment an
//! entry arrives while the page is already full.
//!
//! No snapshot isolation exists across pages: a tree mutated between calls
//! can shift, duplicate, or drop entries, and a stale marker simply never
//! matches, yielding an empty page.

use std::path::Path;

use tracing::trace;

use crate::errors::{FsError, Result};
use crate::tree::walk::{walk, Decision, DirEntry};

/// Page size bounds applied to every `list_dir` call.
pub const LIST_MAX_FLOOR: usize = 1;
pub const LIST_MAX_CEILING: usize = 1000;

/// One page of listing output. `truncated` is true iff more entries exist
/// beyond what was returned; feed the last entry back as the next marker to
/// resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub truncated: bool,
    pub contents: Vec<String>,
}

/// List `dir`, expanding subdirectories in pre-order when `expand` is true.
///
/// Directory entries are rendered with a trailing separator. When `marker` is
/// non-empty, all entries up to and including the byte-exact match are
/// skipped and collection starts after it; a marker that never matches
/// yields zero entries, not an error. `max` is clamped to
/// [`LIST_MAX_FLOOR`, `LIST_MAX_CEILING`].
pub fn list_dir(dir: &Path, expand: bool, marker: Option<&str>, max: usize) -> Result<ListingPage> {
    let max = max.clamp(LIST_MAX_FLOOR, LIST_MAX_CEILING);
    let mut pending_marker = marker.filter(|m| !m.is_empty()).map(str::to_owned);

    let mut contents: Vec<String> = Vec::new();
    let mut truncated = false;

    collect(dir, expand, &mut |entry| {
        if contents.len() >= max {
            truncated = true;
            return true;
        }
        let rendered = entry.marked_path();
        if pending_marker.is_none() {
            contents.push(rendered.clone());
        } else if pending_marker.as_deref() == Some(rendered.as_str()) {
            pending_marker = None;
        }
        false
    })?;

    trace!(
        dir = %dir.display(),
        returned = contents.len(),
        truncated,
        "listing page assembled"
    );
    Ok(ListingPage { truncated, contents })
}

/// Drive the pre-order traversal. `visit` returns true to stop the whole
/// traversal; the boolean result propagates that stop through the recursion.
fn collect<F>(dir: &Path, expand: bool, visit: &mut F) -> Result<bool>
where
    F: FnMut(&DirEntry) -> bool,
{
    let mut stopped = false;
    let mut failure: Option<FsError> = None;

    walk(dir, |entry| {
        stopped = visit(entry);
        if !stopped && expand && entry.is_dir {
            match collect(&entry.path, expand, visit) {
                Ok(inner_stop) => stopped = inner_stop,
                Err(e) => {
                    failure = Some(e);
                    return Decision::Stop;
                }
            }
        }
        if stopped { Decision::Stop } else { Decision::Skip }
    })?;

    match failure {
        Some(e) => Err(e),
        None => Ok(stopped),
    }
}
