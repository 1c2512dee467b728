//! Storage-backend contract and the local-disk implementation.
//!
//! The facade that maps virtual paths to a backend consumes this trait;
//! remote backends implement the same contract elsewhere. All paths at this
//! seam are virtual: relative to the backend's configured root.

use std::path::{Path, PathBuf};

use crate::acl::{self, Acl};
use crate::errors::Result;
use crate::file_ops;
use crate::meta::{self, Metadata};
use crate::path::normalize;
use crate::tree;
use crate::tree::ListingPage;

/// Contract every storage backend implements.
pub trait Driver {
    fn has(&self, path: &str) -> bool;
    fn metadata(&self, path: &str) -> Result<Metadata>;
    /// Hex-encoded content digest of a regular file.
    fn hash(&self, path: &str) -> Result<String>;
    fn acl(&self, path: &str) -> Option<Acl>;
    fn set_acl(&self, path: &str, acl: Acl) -> Result<()>;
    fn read(&self, path: &str, lock: bool) -> Result<Vec<u8>>;
    fn write(&self, path: &str, data: &[u8], lock: bool) -> Result<u64>;
    fn append(&self, path: &str, data: &[u8], lock: bool) -> Result<u64>;
    fn prepend(&self, path: &str, data: &[u8], lock: bool) -> Result<u64>;
    fn rename(&self, from: &str, to: &str, overwrite: bool) -> Result<()>;
    fn copy(&self, from: &str, to: &str, overwrite: bool) -> Result<u64>;
    fn delete(&self, path: &str) -> Result<()>;
    fn create_dir(&self, path: &str, recursive: bool) -> Result<()>;
    fn copy_tree(&self, from: &str, to: &str, overwrite: bool) -> Result<()>;
    fn move_tree(&self, from: &str, to: &str, overwrite: bool) -> Result<()>;
    fn clean_tree(&self, path: &str, include_self: bool) -> Result<()>;
    fn remove_dir(&self, path: &str, recursive: bool) -> Result<()>;
    fn list(&self, dir: &str, expand: bool, marker: Option<&str>, max: usize)
        -> Result<ListingPage>;
}

/// Local-disk backend rooted at a directory. Virtual paths are resolved
/// against the root; listing and metadata output is reported root-relative
/// again so callers never see the physical prefix.
pub struct LocalDriver {
    root: PathBuf,
    /// Root rendered as the physical string prefix of every resolved path,
    /// trailing separator included. Stripped byte-wise from output.
    prefix: String,
}

impl LocalDriver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut prefix = root.display().to_string();
        if !prefix.ends_with(std::path::MAIN_SEPARATOR) {
            prefix.push(std::path::MAIN_SEPARATOR);
        }
        Self { root, prefix }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, virtual_path: &str) -> PathBuf {
        self.root
            .join(virtual_path.trim_start_matches(['/', '\\']))
    }

    fn strip_prefix<'a>(&self, rendered: &'a str) -> &'a str {
        rendered.strip_prefix(self.prefix.as_str()).unwrap_or(rendered)
    }

    /// Root prefix normalized with `/`, for stripping metadata paths (which
    /// are rendered with `/` regardless of platform).
    fn slash_prefix(&self) -> String {
        let mut p = normalize(&self.root.to_string_lossy(), Some("/"))
            .trim_end_matches('/')
            .to_string();
        p.push('/');
        p
    }
}

impl Driver for LocalDriver {
    fn has(&self, path: &str) -> bool {
        meta::has(&self.resolve(path))
    }

    fn metadata(&self, path: &str) -> Result<Metadata> {
        let mut m = meta::metadata(&self.resolve(path))?;
        let prefix = self.slash_prefix();
        if let Some(rel) = m.path.strip_prefix(prefix.as_str()) {
            m.path = rel.to_string();
        }
        Ok(m)
    }

    fn hash(&self, path: &str) -> Result<String> {
        meta::hash(&self.resolve(path))
    }

    fn acl(&self, path: &str) -> Option<Acl> {
        acl::acl_of(&self.resolve(path))
    }

    fn set_acl(&self, path: &str, acl: Acl) -> Result<()> {
        acl::set_acl(&self.resolve(path), acl)
    }

    fn read(&self, path: &str, lock: bool) -> Result<Vec<u8>> {
        file_ops::read(&self.resolve(path), lock)
    }

    fn write(&self, path: &str, data: &[u8], lock: bool) -> Result<u64> {
        file_ops::write(&self.resolve(path), data, lock)
    }

    fn append(&self, path: &str, data: &[u8], lock: bool) -> Result<u64> {
        file_ops::append(&self.resolve(path), data, lock)
    }

    fn prepend(&self, path: &str, data: &[u8], lock: bool) -> Result<u64> {
        file_ops::prepend(&self.resolve(path), data, lock)
    }

    fn rename(&self, from: &str, to: &str, overwrite: bool) -> Result<()> {
        file_ops::rename_file(&self.resolve(from), &self.resolve(to), overwrite)
    }

    fn copy(&self, from: &str, to: &str, overwrite: bool) -> Result<u64> {
        file_ops::copy_file(&self.resolve(from), &self.resolve(to), overwrite)
    }

    fn delete(&self, path: &str) -> Result<()> {
        file_ops::delete_file(&self.resolve(path))
    }

    fn create_dir(&self, path: &str, recursive: bool) -> Result<()> {
        file_ops::create_dir(&self.resolve(path), recursive)
    }

    fn copy_tree(&self, from: &str, to: &str, overwrite: bool) -> Result<()> {
        tree::copy_tree(&self.resolve(from), &self.resolve(to), overwrite)
    }

    fn move_tree(&self, from: &str, to: &str, overwrite: bool) -> Result<()> {
        tree::move_tree(&self.resolve(from), &self.resolve(to), overwrite)
    }

    fn clean_tree(&self, path: &str, include_self: bool) -> Result<()> {
        tree::clean_tree(&self.resolve(path), include_self)
    }

    fn remove_dir(&self, path: &str, recursive: bool) -> Result<()> {
        tree::remove_dir(&self.resolve(path), recursive)
    }

    fn list(
        &self,
        dir: &str,
        expand: bool,
        marker: Option<&str>,
        max: usize,
    ) -> Result<ListingPage> {
        // Markers round-trip through clients root-relative; re-prefix before
        // matching against physical paths.
        let physical_marker = marker
            .filter(|m| !m.is_empty())
            .map(|m| format!("{}{}", self.prefix, m));
        let mut page = tree::list_dir(
            &self.resolve(dir),
            expand,
            physical_marker.as_deref(),
            max,
        )?;
        for entry in &mut page.contents {
            *entry = self.strip_prefix(entry).to_string();
        }
        Ok(page)
    }
}
