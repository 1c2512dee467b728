//! Directory-tree engine: enumeration, merge transfer, pruning, recursive
//! deletion and paginated listing.

mod clean;
mod list;
mod remove;
mod transfer;
mod walk;

pub use clean::clean_tree;
pub use list::{list_dir, ListingPage, LIST_MAX_CEILING, LIST_MAX_FLOOR};
pub use remove::remove_dir;
pub use transfer::{copy_tree, move_tree};
pub use walk::{walk, Decision, DirEntry};
