//! Coarse ACL translation over Unix permission bits.
//!
//! The four levels abstract the common cases for served resource files and
//! line up with what mainstream object stores expose. Anything finer-grained
//! belongs to direct `chmod`-style mode handling, not here.

use std::path::Path;

use crate::errors::Result;

/// Coarse access level of a file or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acl {
    /// Inherit the parent directory's level (set-only; never reported).
    Default,
    /// Owner read/write only.
    Private,
    /// World-readable, owner-writable.
    PublicRead,
    /// World-readable and world-writable.
    PublicWrite,
}

/// Derive the coarse ACL of `path` from its permission bits.
///
/// Returns `None` when the bits cannot be read, or when the owner's own
/// access is incomplete (read+write, plus execute for directories) — a state
/// this scheme cannot represent.
#[cfg(unix)]
pub fn acl_of(path: &Path) -> Option<Acl> {
    use std::os::unix::fs::PermissionsExt;

    let meta = std::fs::metadata(path).ok()?;
    let mode = meta.permissions().mode();
    let dir = meta.is_dir();

    if mode & 0o400 == 0 || mode & 0o200 == 0 || (dir && mode & 0o100 == 0) {
        return None;
    }
    // A directory the world cannot traverse is private no matter its
    // read/write bits.
    if dir && mode & 0o001 == 0 {
        return Some(Acl::Private);
    }

    let other_read = mode & 0o004 != 0;
    let other_write = mode & 0o002 != 0;
    Some(match (other_read, other_write) {
        (true, true) => Acl::PublicWrite,
        (true, false) => Acl::PublicRead,
        _ => Acl::Private,
    })
}

#[cfg(not(unix))]
pub fn acl_of(_path: &Path) -> Option<Acl> {
    None
}

/// Apply `acl` to `path`. `Acl::Default` inherits the parent directory's
/// level and fails when that cannot be determined.
#[cfg(unix)]
pub fn set_acl(path: &Path, acl: Acl) -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use crate::errors::io_ctx;

    let dir = path.is_dir();
    let mode = match mode_for(acl, dir) {
        Some(mode) => mode,
        None => {
            let parent = path.parent().unwrap_or_else(|| Path::new("."));
            let inherited = acl_of(parent).ok_or_else(|| {
                io_ctx("resolve parent acl", parent)(std::io::Error::other(
                    "parent access level is undeterminable",
                ))
            })?;
            // Inherited level is never Default, so this resolves.
            mode_for(inherited, dir).unwrap_or(0o600)
        }
    };

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(io_ctx("set acl", path))
}

#[cfg(not(unix))]
pub fn set_acl(_path: &Path, _acl: Acl) -> Result<()> {
    // Permission bits don't translate on this platform; setting is a no-op.
    Ok(())
}

#[cfg(unix)]
fn mode_for(acl: Acl, dir: bool) -> Option<u32> {
    match acl {
        Acl::PublicWrite => Some(if dir { 0o777 } else { 0o666 }),
        Acl::PublicRead => Some(if dir { 0o755 } else { 0o644 }),
        Acl::Private => Some(if dir { 0o700 } else { 0o600 }),
        Acl::Default => None,
    }
}
