//! dirkit — local filesystem toolkit.
//!
//! The core is a directory-tree engine: recursive merge copy/move with an
//! overwrite policy, bottom-up pruning of empty directories, unconditional
//! recursive deletion, and marker-resumable paginated listing, all driven by
//! one single-level enumeration primitive with an early-exit filter.
//! Around it sit the supporting utilities the engine calls into: path
//! normalization, locked single-file I/O, coarse ACL translation, and the
//! [`Driver`] contract a higher-level facade consumes.
//!
//! Every operation is synchronous and fully parameterized by its arguments;
//! no state is shared between calls except the filesystem itself. Tree
//! operations are best-effort, not transactional: a failure aborts the
//! remaining work and leaves already-applied changes in place, and
//! re-driving the operation is always safe.

pub mod acl;
pub mod driver;
pub mod errors;
pub mod file_ops;
pub mod meta;
pub mod path;
pub mod tree;

pub use acl::Acl;
pub use driver::{Driver, LocalDriver};
pub use errors::{FsError, Result};
pub use meta::{hash, metadata, mime_type, FileKind, Metadata};
pub use path::normalize;
pub use tree::{
    clean_tree, copy_tree, list_dir, move_tree, remove_dir, walk, Decision, DirEntry, ListingPage,
};
