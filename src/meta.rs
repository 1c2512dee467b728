//! Entry metadata snapshot, MIME lookup and content digests.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use filetime::FileTime;

use crate::errors::{io_ctx, FsError, Result};
use crate::path::normalize;

/// Kind of a filesystem entry. Symlinks report the link itself, not the
/// target, so callers can tell the two apart when stat-ing explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Dir,
    Symlink,
    Other,
}

/// Point-in-time snapshot of one entry's main attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub kind: FileKind,
    /// Normalized path with `/` separators; directories carry a trailing `/`.
    pub path: String,
    /// Byte size; zero for anything that is not a regular file.
    pub size: u64,
    pub modified: FileTime,
    /// Extension-derived MIME type; only regular files carry one.
    pub mime: Option<&'static str>,
}

/// True when something exists at `path` (following symlinks).
pub fn has(path: &Path) -> bool {
    path.exists()
}

/// Stat `path` and assemble its [`Metadata`].
pub fn metadata(path: &Path) -> Result<Metadata> {
    let lmeta = fs::symlink_metadata(path).map_err(io_ctx("stat", path))?;
    let ftype = lmeta.file_type();
    let kind = if ftype.is_symlink() {
        FileKind::Symlink
    } else if ftype.is_dir() {
        FileKind::Dir
    } else if ftype.is_file() {
        FileKind::File
    } else {
        FileKind::Other
    };

    let mut rendered = normalize(&path.to_string_lossy(), Some("/"))
        .trim_end_matches('/')
        .to_string();
    if kind == FileKind::Dir {
        rendered.push('/');
    }

    Ok(Metadata {
        kind,
        path: rendered,
        size: if kind == FileKind::File { lmeta.len() } else { 0 },
        modified: FileTime::from_last_modification_time(&lmeta),
        mime: if kind == FileKind::File { mime_type(path) } else { None },
    })
}

/// Guess a MIME type from the file extension alone; no content sniffing.
/// Unknown or missing extensions yield `None`.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => return None,
    })
}

/// Hex-encoded BLAKE3 digest of a file's contents. A missing or non-file
/// target reports `NotFound`.
pub fn hash(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }
    let mut file = File::open(path).map_err(io_ctx("open file", path))?;
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut file, &mut hasher).map_err(io_ctx("read file", path))?;
    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_and_dir_metadata() {
        let td = tempdir().unwrap();
        let f = td.path().join("data.bin");
        fs::write(&f, [0u8; 16]).unwrap();

        let fm = metadata(&f).unwrap();
        assert_eq!(fm.kind, FileKind::File);
        assert_eq!(fm.size, 16);
        assert!(!fm.path.ends_with('/'));

        let dm = metadata(td.path()).unwrap();
        assert_eq!(dm.kind, FileKind::Dir);
        assert_eq!(dm.size, 0);
        assert!(dm.path.ends_with('/'));
        assert_eq!(dm.mime, None, "directories carry no MIME type");
    }

    #[test]
    fn mime_follows_the_extension() {
        let td = tempdir().unwrap();
        let f = td.path().join("report.json");
        fs::write(&f, "{}").unwrap();

        assert_eq!(mime_type(&f), Some("application/json"));
        assert_eq!(metadata(&f).unwrap().mime, Some("application/json"));

        assert_eq!(mime_type(Path::new("IMAGE.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type(Path::new("archive.tar")), Some("application/x-tar"));
        assert_eq!(mime_type(Path::new("no-extension")), None);
        assert_eq!(mime_type(Path::new("weird.zzz")), None);
    }

    #[test]
    fn hash_tracks_content() {
        let td = tempdir().unwrap();
        let a = td.path().join("a.bin");
        let b = td.path().join("b.bin");
        fs::write(&a, "same bytes").unwrap();
        fs::write(&b, "same bytes").unwrap();

        let ha = hash(&a).unwrap();
        assert_eq!(ha.len(), 64, "hex-encoded 256-bit digest");
        assert_eq!(ha, hash(&b).unwrap(), "identical content, identical digest");

        fs::write(&b, "different bytes").unwrap();
        assert_ne!(ha, hash(&b).unwrap());
    }

    #[test]
    fn hash_of_missing_file_reports_not_found() {
        let td = tempdir().unwrap();
        let err = hash(&td.path().join("ghost")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_path_errors() {
        let td = tempdir().unwrap();
        assert!(metadata(&td.path().join("gone")).is_err());
        assert!(!has(&td.path().join("gone")));
    }
}
