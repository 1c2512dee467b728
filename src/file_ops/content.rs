//! Single-file content I/O with optional advisory locking.
//!
//! Write-side operations create the missing parent directory chain on
//! demand, matching the tree operations' expectation that a destination
//! path can always be written once its directory exists.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::errors::{io_ctx, FsError, Result};
use crate::file_ops::lock::LockGuard;

/// Read the full contents of `path`. A missing or non-file target reports
/// `NotFound`. With `lock = true` a shared advisory lock is held for the
/// duration of the read.
pub fn read(path: &Path, lock: bool) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }
    if !lock {
        return fs::read(path).map_err(io_ctx("read file", path));
    }

    let file = File::open(path).map_err(io_ctx("open file", path))?;
    let guard = LockGuard::shared(file).map_err(io_ctx("lock file", path))?;
    let mut data = Vec::new();
    (&*guard)
        .read_to_end(&mut data)
        .map_err(io_ctx("read file", path))?;
    Ok(data)
}

/// Replace the contents of `path` with `data`, creating the file and its
/// parent directories as needed. Returns the number of bytes written.
pub fn write(path: &Path, data: &[u8], lock: bool) -> Result<u64> {
    ensure_parent(path)?;
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(io_ctx("open file", path))?;
    write_through(file, path, data, lock)
}

/// Append `data` to `path`, creating the file and its parent directories as
/// needed. Returns the number of bytes appended.
pub fn append(path: &Path, data: &[u8], lock: bool) -> Result<u64> {
    ensure_parent(path)?;
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(io_ctx("open file", path))?;
    write_through(file, path, data, lock)
}

/// Insert `data` at the beginning of `path`.
///
/// The new contents are staged in a unique sibling temp file which is then
/// renamed over the target, so readers never observe a half-written file.
/// With `lock = true` an exclusive advisory lock on the target is held
/// across the staging and rename. Returns the number of bytes inserted.
pub fn prepend(path: &Path, data: &[u8], lock: bool) -> Result<u64> {
    ensure_parent(path)?;

    // Existing content is read up front; while the lock variant holds the
    // target exclusively, the unlocked variant tolerates a missing file.
    let (existing, _guard) = if lock {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)
            .map_err(io_ctx("open file", path))?;
        let guard = LockGuard::exclusive(file).map_err(io_ctx("lock file", path))?;
        let mut current = Vec::new();
        (&*guard)
            .read_to_end(&mut current)
            .map_err(io_ctx("read file", path))?;
        (current, Some(guard))
    } else if path.is_file() {
        (fs::read(path).map_err(io_ctx("read file", path))?, None)
    } else {
        (Vec::new(), None)
    };

    let tmp = unique_temp_path(path);
    if let Err(e) = stage_prepend(&tmp, data, &existing) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_ctx("rename temporary file", &tmp)(e));
    }

    debug!(path = %path.display(), bytes = data.len(), "prepended file content");
    Ok(data.len() as u64)
}

fn stage_prepend(tmp: &Path, data: &[u8], existing: &[u8]) -> Result<()> {
    let mut out = File::create(tmp).map_err(io_ctx("create temporary file", tmp))?;
    out.write_all(data).map_err(io_ctx("write temporary file", tmp))?;
    out.write_all(existing)
        .map_err(io_ctx("write temporary file", tmp))?;
    out.sync_all().map_err(io_ctx("sync temporary file", tmp))
}

fn write_through(file: File, path: &Path, data: &[u8], lock: bool) -> Result<u64> {
    if lock {
        let guard = LockGuard::exclusive(file).map_err(io_ctx("lock file", path))?;
        (&*guard)
            .write_all(data)
            .map_err(io_ctx("write file", path))?;
    } else {
        let mut file = file;
        file.write_all(data).map_err(io_ctx("write file", path))?;
    }
    Ok(data.len() as u64)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            fs::create_dir_all(parent).map_err(io_ctx("create directory", parent))?;
        }
    }
    Ok(())
}

/// Unique sibling temp path for staged rewrites of `target`.
fn unique_temp_path(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    target.with_file_name(format!(".{name}.{pid}.{nanos}.tmp"))
}
