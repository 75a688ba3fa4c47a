//! Integration tests for the watcher primitives
//!
//! These tests run the full scan -> filter -> diff pipeline over temporary
//! directories with real filesystem operations, the way one poll cycle
//! drives it.

use std::fs;
use std::path::PathBuf;
use telesync_watcher::{scan, FilterPolicy, SnapshotStore, WatchRegistry};
use tempfile::TempDir;

fn cycle(store: &SnapshotStore, filter: &FilterPolicy, root: &std::path::Path) -> Vec<PathBuf> {
    let listed = scan(root).expect("scan failed");
    let eligible: Vec<PathBuf> = listed
        .into_iter()
        .filter(|path| filter.is_eligible(path))
        .collect();
    let mut changed = store.diff(&eligible);
    changed.sort();
    changed
}

#[test]
fn test_pipeline_reports_new_files_once() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("b.mp3"), "b").unwrap();

    let store = SnapshotStore::new();
    let filter = FilterPolicy::allow_all();

    let first = cycle(&store, &filter, dir.path());
    assert_eq!(
        first,
        vec![
            dir.path().join("a.txt"),
            dir.path().join("nested").join("b.mp3"),
        ]
    );

    let second = cycle(&store, &filter, dir.path());
    assert!(second.is_empty());
}

#[test]
fn test_pipeline_reports_modifications() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "a").unwrap();

    let store = SnapshotStore::new();
    let filter = FilterPolicy::allow_all();

    cycle(&store, &filter, dir.path());
    fs::write(&path, "a longer body").unwrap();

    assert_eq!(cycle(&store, &filter, dir.path()), vec![path]);
}

#[test]
fn test_denied_paths_never_reach_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let tmp = dir.path().join("c.tmp");
    fs::write(&tmp, "scratch").unwrap();
    fs::write(dir.path().join("keep.txt"), "keep").unwrap();

    let store = SnapshotStore::new();
    let filter = FilterPolicy::new(&[], &[r"\.tmp$".to_string()]).unwrap();

    let first = cycle(&store, &filter, dir.path());
    assert_eq!(first, vec![dir.path().join("keep.txt")]);

    // Even after modification the denied path stays invisible
    fs::write(&tmp, "scratch scratch").unwrap();
    assert!(cycle(&store, &filter, dir.path()).is_empty());
    assert!(store.record(&tmp).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_registry_keys_match_scanned_roots() {
    let dir = TempDir::new().unwrap();
    let registry = WatchRegistry::new();

    let canonical = registry.register(dir.path()).unwrap();
    assert!(registry.contains(&canonical));

    fs::write(canonical.join("a.txt"), "a").unwrap();
    let files = scan(&canonical).unwrap();
    assert_eq!(files, vec![canonical.join("a.txt")]);
}

#[test]
fn test_two_roots_share_one_snapshot_store() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    fs::write(dir_a.path().join("a.txt"), "a").unwrap();
    fs::write(dir_b.path().join("b.txt"), "b").unwrap();

    let store = SnapshotStore::new();
    let filter = FilterPolicy::allow_all();

    assert_eq!(cycle(&store, &filter, dir_a.path()).len(), 1);
    assert_eq!(cycle(&store, &filter, dir_b.path()).len(), 1);
    assert_eq!(store.len(), 2);

    // Steady state holds across both roots
    assert!(cycle(&store, &filter, dir_a.path()).is_empty());
    assert!(cycle(&store, &filter, dir_b.path()).is_empty());
}
