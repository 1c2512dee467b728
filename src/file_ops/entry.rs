//! Single-entry operations: rename, copy, delete, directory creation.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{io_ctx, FsError, Result};

/// Rename (move) a single file. With `overwrite = false`, an existing file
/// at `to` is an outright `AlreadyExists` failure — unlike tree merges,
/// where a conflicting entry is merely skipped.
pub fn rename_file(from: &Path, to: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && to.is_file() {
        return Err(FsError::AlreadyExists(to.to_path_buf()));
    }
    fs::rename(from, to).map_err(io_ctx("rename file", from))
}

/// Copy a single file's bytes. Same conflict policy as [`rename_file`].
/// Returns the number of bytes copied.
pub fn copy_file(from: &Path, to: &Path, overwrite: bool) -> Result<u64> {
    if !overwrite && to.is_file() {
        return Err(FsError::AlreadyExists(to.to_path_buf()));
    }
    fs::copy(from, to).map_err(io_ctx("copy file", from))
}

/// Delete a single file. A missing target is a trivial success.
pub fn delete_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }
    fs::remove_file(path).map_err(io_ctx("delete file", path))
}

/// Create a directory; an already-existing directory is a success. The
/// recursive form creates the whole missing chain. On Unix, fresh
/// directories get 0o755, best-effort.
pub fn create_dir(path: &Path, recursive: bool) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if recursive {
        fs::create_dir_all(path).map_err(io_ctx("create directory", path))?;
    } else {
        fs::create_dir(path).map_err(io_ctx("create directory", path))?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
    }
    debug!(path = %path.display(), "created directory");
    Ok(())
}
