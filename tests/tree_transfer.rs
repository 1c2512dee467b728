use dirkit::{copy_tree, move_tree};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use walkdir::WalkDir;

/// Build a small source tree:
///   src/a.txt, src/sub/b.txt, src/sub/deep/c.txt
fn build_source(root: &Path) -> std::path::PathBuf {
    let src = root.join("src");
    fs::create_dir_all(src.join("sub/deep")).unwrap();
    fs::write(src.join("a.txt"), "alpha").unwrap();
    fs::write(src.join("sub/b.txt"), "beta").unwrap();
    fs::write(src.join("sub/deep/c.txt"), "gamma").unwrap();
    src
}

/// Every file under `src` must exist with identical bytes at the mirrored
/// relative path under `dst`.
fn assert_mirrored(src: &Path, dst: &Path) {
    for entry in WalkDir::new(src).into_iter().filter_map(Result::ok) {
        let rel = entry.path().strip_prefix(src).unwrap();
        let mirrored = dst.join(rel);
        if entry.file_type().is_file() {
            assert_eq!(
                fs::read(entry.path()).unwrap(),
                fs::read(&mirrored).unwrap(),
                "content mismatch at {}",
                rel.display()
            );
        } else if entry.file_type().is_dir() {
            assert!(mirrored.is_dir(), "missing directory {}", rel.display());
        }
    }
}

#[test]
fn copy_mirrors_tree_and_leaves_source_intact() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");

    copy_tree(&src, &dst, true).unwrap();

    assert_mirrored(&src, &dst);
    assert!(src.join("sub/deep/c.txt").exists(), "source must be unchanged");
}

#[test]
fn copy_without_overwrite_keeps_existing_destination_file() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");
    fs::create_dir_all(dst.join("sub")).unwrap();
    fs::write(dst.join("sub/b.txt"), "pre-existing").unwrap();

    copy_tree(&src, &dst, false).unwrap();

    assert_eq!(fs::read_to_string(dst.join("sub/b.txt")).unwrap(), "pre-existing");
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "alpha");
}

#[test]
fn transfer_onto_itself_is_a_noop() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());

    // Different spelling of the same directory.
    let alias = src.join("sub/..");
    copy_tree(&src, &alias, true).unwrap();
    assert_mirrored(&src, &src);
}

#[test]
fn move_onto_itself_keeps_the_directory() {
    let td = tempdir().unwrap();
    let empty = td.path().join("empty");
    fs::create_dir(&empty).unwrap();

    // Different spelling of the same directory.
    move_tree(&empty, &td.path().join("empty/."), true).unwrap();
    assert!(empty.is_dir(), "self-move must not delete the directory");

    let full = td.path().join("full");
    fs::create_dir(&full).unwrap();
    fs::write(full.join("f.txt"), "stay").unwrap();
    move_tree(&full, &td.path().join("sub/../full"), true).unwrap();
    assert_eq!(fs::read_to_string(full.join("f.txt")).unwrap(), "stay");
}

#[test]
fn missing_source_fails() {
    let td = tempdir().unwrap();
    let err = copy_tree(&td.path().join("nope"), &td.path().join("dst"), true);
    assert!(err.is_err());
}

#[test]
fn move_to_fresh_destination_renames() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");

    move_tree(&src, &dst, true).unwrap();

    assert!(!src.exists(), "rename fast path must consume the source");
    assert_eq!(fs::read_to_string(dst.join("sub/deep/c.txt")).unwrap(), "gamma");
}

#[test]
fn merge_move_preserves_destination_only_files() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("only-here.txt"), "untouchable").unwrap();

    move_tree(&src, &dst, true).unwrap();

    assert_eq!(
        fs::read_to_string(dst.join("only-here.txt")).unwrap(),
        "untouchable",
        "merge must never delete destination-only entries"
    );
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "alpha");
    assert!(!src.exists(), "emptied source tree is pruned after a move");
}

#[test]
fn merge_move_without_overwrite_leaves_skipped_subtree_in_source() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");
    fs::create_dir_all(dst.join("sub")).unwrap();
    fs::write(dst.join("sub/b.txt"), "keep me").unwrap();

    move_tree(&src, &dst, false).unwrap();

    // The conflicting destination file is preserved unchanged.
    assert_eq!(fs::read_to_string(dst.join("sub/b.txt")).unwrap(), "keep me");
    // Non-conflicting entries moved over.
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(dst.join("sub/deep/c.txt")).unwrap(), "gamma");
    // The source retains exactly the subtree whose destination was skipped.
    assert_eq!(fs::read_to_string(src.join("sub/b.txt")).unwrap(), "beta");
    assert!(!src.join("a.txt").exists());
    assert!(!src.join("sub/deep").exists(), "emptied source dirs are pruned");
}

/// Drop write permission on `dir`. Returns false when the mode bits are not
/// actually enforced (privileged user), in which case they are restored and
/// the caller should skip the scenario.
#[cfg(unix)]
fn write_protect(dir: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o555)).unwrap();
    if fs::write(dir.join(".denied"), b"").is_ok() {
        let _ = fs::remove_file(dir.join(".denied"));
        unprotect(dir);
        eprintln!("skipping: permission bits are not enforced for this user");
        return false;
    }
    true
}

/// Restore write permission so the tempdir can be cleaned up.
#[cfg(unix)]
fn unprotect(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o755));
}

#[cfg(unix)]
#[test]
fn failed_copy_aborts_and_keeps_partial_destination() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");
    fs::create_dir_all(dst.join("sub")).unwrap();
    fs::write(dst.join("a.txt"), "already here").unwrap();
    if !write_protect(&dst.join("sub")) {
        return;
    }

    let result = copy_tree(&src, &dst, false);
    unprotect(&dst.join("sub"));

    assert!(result.is_err(), "copying into a read-only subdirectory must fail");
    // Abort, not rollback: entries already at the destination stay there.
    assert!(dst.is_dir());
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "already here");
    // The source is never touched by a failed copy.
    assert_mirrored(&src, &src);
    assert_eq!(fs::read_to_string(src.join("sub/b.txt")).unwrap(), "beta");
}

#[cfg(unix)]
#[test]
fn failed_move_keeps_unmoved_source_entries() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");
    fs::create_dir_all(dst.join("sub")).unwrap();
    fs::write(dst.join("a.txt"), "already here").unwrap();
    if !write_protect(&dst.join("sub")) {
        return;
    }

    let result = move_tree(&src, &dst, false);
    unprotect(&dst.join("sub"));

    assert!(result.is_err(), "moving into a read-only subdirectory must fail");
    // No rollback on either side: the conflicting destination file keeps its
    // bytes and the source keeps everything that was not transferred.
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "already here");
    assert_eq!(fs::read_to_string(src.join("a.txt")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(src.join("sub/b.txt")).unwrap(), "beta");
    assert_eq!(fs::read_to_string(src.join("sub/deep/c.txt")).unwrap(), "gamma");
    assert!(src.is_dir(), "the source root survives an aborted move");
}

#[test]
fn merge_into_existing_destination_directory() {
    let td = tempdir().unwrap();
    let src = build_source(td.path());
    let dst = td.path().join("dst");
    fs::create_dir_all(dst.join("sub")).unwrap();

    // Destination subdirectory exists, so the move must merge rather than
    // rename over it.
    move_tree(&src, &dst, true).unwrap();
    assert_eq!(fs::read_to_string(dst.join("sub/b.txt")).unwrap(), "beta");
    assert_eq!(fs::read_to_string(dst.join("sub/deep/c.txt")).unwrap(), "gamma");
}
