//! Single-file I/O and entry-level filesystem operations.

mod content;
mod entry;
mod lock;

pub use content::{append, prepend, read, write};
pub use entry::{copy_file, create_dir, delete_file, rename_file};
pub use lock::LockGuard;
