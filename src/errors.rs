//! Typed error definitions for dirkit.
//! Failures are returned, never panicked; operations abort at the point of
//! failure and leave already-applied side effects in place.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    /// The operation requires the path to exist and it does not.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// A directory operation was pointed at something that is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Destination collision with `overwrite = false` on a single-file operation.
    #[error("destination already exists: {0}")]
    AlreadyExists(PathBuf),

    /// An underlying filesystem call failed.
    #[error("{op} '{path}': {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FsError>;

/// Adapter for `.map_err(...)`: wraps an `io::Error` with the failing
/// operation and path so callers see where a deep recursion gave up.
pub(crate) fn io_ctx(op: &'static str, path: &Path) -> impl FnOnce(io::Error) -> FsError {
    let path = path.to_path_buf();
    move |source| FsError::Io { op, path, source }
}

impl FsError {
    /// True when the failure maps to the NotFound taxonomy entry, whichever
    /// layer produced it.
    pub fn is_not_found(&self) -> bool {
        match self {
            FsError::NotFound(_) => true,
            FsError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
