//! Unconditional recursive deletion.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{io_ctx, FsError, Result};
use crate::tree::walk::{walk, Decision};

/// Delete the directory at `dir`.
///
/// A missing `dir` is a trivial success. The non-recursive form is a plain
/// empty-directory removal; the recursive form deletes files, descends into
/// subdirectories unconditionally, and removes `dir` itself last. The first
/// failure aborts — whatever was deleted stays deleted.
pub fn remove_dir(dir: &Path, recursive: bool) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    if recursive {
        remove_recursive(dir)?;
        debug!(dir = %dir.display(), "removed directory tree");
        Ok(())
    } else {
        fs::remove_dir(dir).map_err(io_ctx("remove directory", dir))
    }
}

fn remove_recursive(dir: &Path) -> Result<()> {
    let mut failure: Option<FsError> = None;
    walk(dir, |entry| {
        let outcome = if entry.is_dir {
            remove_recursive(&entry.path)
        } else {
            fs::remove_file(&entry.path).map_err(io_ctx("delete file", &entry.path))
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
        None => fs::remove_dir(dir).map_err(io_ctx("remove directory", dir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_target_is_ok() {
        let td = tempdir().unwrap();
        remove_dir(&td.path().join("nope"), true).unwrap();
        remove_dir(&td.path().join("nope"), false).unwrap();
    }

    #[test]
    fn non_recursive_fails_on_populated_directory() {
        let td = tempdir().unwrap();
        let dir = td.path().join("full");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("f"), "x").unwrap();
        assert!(remove_dir(&dir, false).is_err());
        assert!(dir.exists());
    }
}
