//! Advisory per-file locks.
//!
//! Wraps `fs2`'s flock-style primitives in an RAII guard. The lock covers a
//! single file for the duration of one I/O call; nothing in this crate holds
//! a lock across multiple filesystem operations.

use std::fs::File;
use std::io;
use std::ops::Deref;

use fs2::FileExt;
use tracing::trace;

/// RAII guard holding an advisory lock on one open file.
/// The lock is released when the guard is dropped.
pub struct LockGuard {
    file: File,
}

impl LockGuard {
    /// Block until a shared (read) lock is acquired.
    pub fn shared(file: File) -> io::Result<Self> {
        file.lock_shared()?;
        trace!("shared file lock acquired");
        Ok(Self { file })
    }

    /// Block until an exclusive (write) lock is acquired.
    pub fn exclusive(file: File) -> io::Result<Self> {
        file.lock_exclusive()?;
        trace!("exclusive file lock acquired");
        Ok(Self { file })
    }
}

impl Deref for LockGuard {
    type Target = File;

    fn deref(&self) -> &File {
        &self.file
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // Unlock before the descriptor closes; ignore errors, the close
        // releases the lock anyway.
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use tempfile::tempdir;

    #[test]
    fn exclusive_then_shared_after_drop() {
        let td = tempdir().unwrap();
        let path = td.path().join("locked");

        let f1 = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)
            .unwrap();
        let guard = LockGuard::exclusive(f1).unwrap();
        drop(guard);

        let f2 = OpenOptions::new().read(true).open(&path).unwrap();
        LockGuard::shared(f2).unwrap();
    }
}
