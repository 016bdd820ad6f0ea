use dupereview::actions::{DeleteError, FileRemover};
use dupereview::duplicates::{DeleteOutcome, EquivalenceMode, GroupKey, Registry, RegistryError};
use dupereview::scanner::{Walker, WalkerConfig};
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

fn registry() -> Registry {
    Registry::new(
        Walker::new(WalkerConfig::default()),
        FileRemover::permanent(),
    )
}

#[test]
fn test_delete_shrinks_group_on_disk() {
    let dir = tempdir().unwrap();
    for sub in ["a", "b", "c"] {
        write(dir.path(), &format!("{}/x.txt", sub), b"same");
    }

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::ByName))
        .unwrap();
    let key = GroupKey::name("x.txt");
    let victim = dir.path().join("b/x.txt");

    let outcome = registry.delete_member(&key, &victim).unwrap();

    assert_eq!(outcome, DeleteOutcome::Shrunk { remaining: 2 });
    assert!(!victim.exists());
    assert!(registry.is_deleted(&victim));
    assert!(registry.has_deleted_member(&key));
    assert_eq!(registry.groups().get(&key).unwrap().len(), 2);
}

#[test]
fn test_delete_resolves_group_and_moves_cursor() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/first.txt", b"1");
    write(dir.path(), "a/second.txt", b"2");
    write(dir.path(), "b/first.txt", b"1");
    write(dir.path(), "b/second.txt", b"2");

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::ByName))
        .unwrap();
    assert_eq!(registry.group_count(), 2);

    registry.select_group(1);
    let outcome = registry
        .delete_member(&GroupKey::name("first.txt"), &dir.path().join("a/first.txt"))
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Resolved);
    assert_eq!(registry.group_count(), 1);
    assert_eq!(registry.cursor(), Some(0));
    assert_eq!(
        registry.current_group().unwrap().0,
        &GroupKey::name("second.txt")
    );
}

#[test]
fn test_delete_last_group_empties_registry() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/only.txt", b"1");
    write(dir.path(), "b/only.txt", b"1");

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::ByNameAndSize))
        .unwrap();
    let key = GroupKey::name_and_size("only.txt", 1);

    registry
        .delete_member(&key, &dir.path().join("a/only.txt"))
        .unwrap();

    assert!(registry.is_empty());
    assert_eq!(registry.cursor(), None);
    assert!(registry.current_group().is_none());
    assert!(dir.path().join("b/only.txt").exists());
}

#[test]
fn test_delete_missing_file_changes_nothing() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/x.txt", b"1");
    write(dir.path(), "b/x.txt", b"1");

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::ByName))
        .unwrap();
    let key = GroupKey::name("x.txt");
    let gone = dir.path().join("a/x.txt");
    fs::remove_file(&gone).unwrap();

    let err = registry.delete_member(&key, &gone).unwrap_err();

    assert!(matches!(
        err,
        RegistryError::DeletionFailed {
            source: DeleteError::NotFound(_),
            ..
        }
    ));
    assert!(!registry.is_deleted(&gone));
    assert_eq!(registry.groups().get(&key).unwrap().len(), 2);
}

#[test]
fn test_delete_unknown_member_leaves_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/x.txt", b"1");
    write(dir.path(), "b/x.txt", b"1");
    write(dir.path(), "lonely.txt", b"1");

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::ByName))
        .unwrap();
    let outsider = dir.path().join("lonely.txt");

    let err = registry
        .delete_member(&GroupKey::name("x.txt"), &outsider)
        .unwrap_err();

    assert!(matches!(err, RegistryError::UnknownMember { .. }));
    assert!(outsider.exists());
}

#[test]
fn test_rescan_sees_external_changes() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/x.txt", b"1");
    write(dir.path(), "b/x.txt", b"1");

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::ByName))
        .unwrap();

    write(dir.path(), "c/y.txt", b"2");
    write(dir.path(), "d/y.txt", b"2");
    fs::remove_file(dir.path().join("b/x.txt")).unwrap();
    registry.rescan().unwrap();

    assert_eq!(registry.group_count(), 1);
    assert_eq!(registry.current_group().unwrap().0, &GroupKey::name("y.txt"));
}

#[test]
fn test_rescan_keeps_deletion_highlight() {
    let dir = tempdir().unwrap();
    for sub in ["a", "b", "c"] {
        write(dir.path(), &format!("{}/x.txt", sub), b"same");
    }

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::ByName))
        .unwrap();
    let key = GroupKey::name("x.txt");
    registry
        .delete_member(&key, &dir.path().join("a/x.txt"))
        .unwrap();

    registry.rescan().unwrap();

    assert!(registry.has_deleted_member(&key));
    assert_eq!(registry.deleted_paths().len(), 1);
}

#[test]
fn test_by_size_highlight_and_selection_survive_rescan_and_scan() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.bin", b"12");
    write(dir.path(), "b.bin", b"34");
    for name in ["c.txt", "d.txt", "e.txt"] {
        write(dir.path(), name, b"hello");
    }

    let mut registry = registry();
    registry
        .scan(dir.path(), Some(EquivalenceMode::BySize))
        .unwrap();
    registry.select_group(1);
    let key = GroupKey::size(5, 3);
    registry
        .delete_member(&key, &dir.path().join("e.txt"))
        .unwrap();

    registry.rescan().unwrap();
    let shrunk = GroupKey::size(5, 2);
    assert_eq!(registry.cursor(), Some(1));
    assert_eq!(registry.current_group().unwrap().0, &shrunk);
    assert!(registry.has_deleted_member(&shrunk));
    assert!(!registry.has_deleted_member(&GroupKey::size(2, 2)));

    registry
        .scan(dir.path(), Some(EquivalenceMode::BySize))
        .unwrap();
    assert!(registry.has_deleted_member(&shrunk));
}

#[test]
fn test_rescan_after_root_removed_fails_and_keeps_state() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "a/x.txt", b"1");
    write(&root, "b/x.txt", b"1");

    let mut registry = registry();
    registry.scan(&root, Some(EquivalenceMode::ByName)).unwrap();
    fs::remove_dir_all(&root).unwrap();

    let err = registry.rescan().unwrap_err();

    assert!(matches!(err, RegistryError::Scan(_)));
    assert_eq!(registry.group_count(), 1);
    assert_eq!(registry.source_directory(), Some(root.as_path()));
}

#[test]
fn test_scan_failure_keeps_registry_unset() {
    let dir = tempdir().unwrap();
    let mut registry = registry();

    let err = registry
        .scan(&dir.path().join("missing"), None)
        .unwrap_err();

    assert!(matches!(err, RegistryError::Scan(_)));
    assert!(registry.source_directory().is_none());
    assert!(matches!(
        registry.rescan(),
        Err(RegistryError::NoDirectorySelected)
    ));
}
