use dupereview::duplicates::{group, EquivalenceMode, GroupKey};
use dupereview::scanner::{Enumerator, ScanError, Walker, WalkerConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn walker() -> Walker {
    Walker::new(WalkerConfig::default())
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let records = walker().enumerate(dir.path()).unwrap();
    let groups = group(&records, Some(EquivalenceMode::ByName));

    assert!(records.is_empty());
    assert!(groups.is_empty());
}

#[test]
fn test_scan_unique_names() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"a");
    write(dir.path(), "b.txt", b"bb");
    write(dir.path(), "c.txt", b"ccc");

    let records = walker().enumerate(dir.path()).unwrap();
    let groups = group(&records, Some(EquivalenceMode::ByName));

    assert_eq!(records.len(), 3);
    assert!(groups.is_empty());
}

#[test]
fn test_scan_same_name_in_subdirectories() {
    let dir = tempdir().unwrap();
    write(dir.path(), "one/report.pdf", b"short");
    write(dir.path(), "two/report.pdf", b"a much longer body");
    write(dir.path(), "notes.txt", b"x");

    let records = walker().enumerate(dir.path()).unwrap();
    let groups = group(&records, Some(EquivalenceMode::ByName));

    assert_eq!(groups.len(), 1);
    let report = groups.get(&GroupKey::name("report.pdf")).unwrap();
    assert_eq!(report.len(), 2);
    // Largest first.
    assert_eq!(report.members()[0].path, dir.path().join("two/report.pdf"));
    assert_eq!(report.members()[0].size, 18);
}

#[test]
fn test_scan_by_name_and_size_splits_by_size() {
    let dir = tempdir().unwrap();
    write(dir.path(), "x/a.txt", b"0123456789");
    write(dir.path(), "y/a.txt", b"0123456789");
    write(dir.path(), "z/a.txt", b"01234");

    let records = walker().enumerate(dir.path()).unwrap();
    let groups = group(&records, Some(EquivalenceMode::ByNameAndSize));

    assert_eq!(groups.len(), 1);
    let (key, members) = groups.get_index(0).unwrap();
    assert_eq!(key.as_str(), "a.txt (10 bytes)");
    assert_eq!(
        members.paths().collect::<Vec<_>>(),
        vec![dir.path().join("x/a.txt"), dir.path().join("y/a.txt")]
    );
}

#[test]
fn test_scan_by_size_ignores_names() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.bin", b"1234");
    write(dir.path(), "b.bin", b"abcd");
    write(dir.path(), "c.bin", b"wxyz");
    write(dir.path(), "d.bin", b"z");

    let records = walker().enumerate(dir.path()).unwrap();
    let groups = group(&records, Some(EquivalenceMode::BySize));

    assert_eq!(groups.len(), 1);
    let (key, members) = groups.get_index(0).unwrap();
    assert_eq!(key.as_str(), "Size: 4 bytes (3 files)");
    assert_eq!(members.len(), 3);
}

#[test]
fn test_scan_keeps_empty_files() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/empty", b"");
    write(dir.path(), "b/empty", b"");

    let records = walker().enumerate(dir.path()).unwrap();
    let groups = group(&records, Some(EquivalenceMode::ByNameAndSize));

    assert_eq!(groups.len(), 1);
    assert!(groups.get(&GroupKey::name_and_size("empty", 0)).is_some());
}

#[test]
fn test_scan_is_deterministic() {
    let dir = tempdir().unwrap();
    for sub in ["c", "a", "b"] {
        write(dir.path(), &format!("{}/dup.txt", sub), b"same");
        write(dir.path(), &format!("{}/other.txt", sub), b"same");
    }

    let first = group(&walker().enumerate(dir.path()).unwrap(), None);
    let second = group(&walker().enumerate(dir.path()).unwrap(), None);

    assert_eq!(first, second);
    assert!(first.was_coerced());
    let keys: Vec<&str> = first.keys().map(GroupKey::as_str).collect();
    assert_eq!(keys, vec!["dup.txt", "other.txt"]);
}

#[test]
fn test_scan_skip_hidden() {
    let dir = tempdir().unwrap();
    write(dir.path(), "visible/a.txt", b"1");
    write(dir.path(), ".hidden/a.txt", b"1");
    write(dir.path(), ".a.txt", b"1");

    let all = Walker::new(WalkerConfig::new(false, false))
        .enumerate(dir.path())
        .unwrap();
    let visible = Walker::new(WalkerConfig::new(false, true))
        .enumerate(dir.path())
        .unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].path, dir.path().join("visible/a.txt"));
}

#[cfg(unix)]
#[test]
fn test_scan_symlinks_only_when_following() {
    let dir = tempdir().unwrap();
    write(dir.path(), "real/a.txt", b"data");
    fs::create_dir(dir.path().join("links")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("real/a.txt"), dir.path().join("links/a.txt"))
        .unwrap();

    let plain = walker().enumerate(dir.path()).unwrap();
    let following = Walker::new(WalkerConfig::new(true, false))
        .enumerate(dir.path())
        .unwrap();

    assert_eq!(plain.len(), 1);
    assert_eq!(following.len(), 2);
    assert_eq!(group(&following, Some(EquivalenceMode::ByName)).len(), 1);
}

#[test]
fn test_scan_missing_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    match walker().enumerate(&missing) {
        Err(ScanError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_scan_file_as_root() {
    let dir = tempdir().unwrap();
    write(dir.path(), "file.txt", b"x");
    let file = dir.path().join("file.txt");

    match walker().enumerate(&file) {
        Err(ScanError::NotADirectory(path)) => assert_eq!(path, file),
        other => panic!("Expected NotADirectory, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_scan_unreadable_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write(dir.path(), "open/a.txt", b"1");
    write(dir.path(), "locked/a.txt", b"1");
    let locked = dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let result = walker().enumerate(dir.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let records = result.unwrap();
    // Root can read everything, so only assert the scan did not fail.
    assert!(!records.is_empty());
    assert!(records.iter().any(|r| r.path == dir.path().join("open/a.txt")));
}
