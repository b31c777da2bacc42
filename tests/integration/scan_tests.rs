use dupescan::duplicates::{
    duplicate_groups, ClassificationState, DuplicateFinder, FinderConfig, LargeFileEntry,
    SizeIndex,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn membership(groups: &[dupescan::duplicates::DuplicateGroup]) -> Vec<Vec<PathBuf>> {
    groups.iter().map(|g| g.paths.clone()).collect()
}

#[test]
fn test_small_files_grouped_by_content() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", b"hello1234\0");
    let b = write(dir.path(), "b.txt", b"hello1234\0");
    write(dir.path(), "c.txt", b"hello5678\0");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 10);
    assert!(groups[0].digest.is_none());
    assert_eq!(groups[0].paths, vec![a, b]);
    assert_eq!(summary.total_files, 3);
}

#[test]
fn test_large_files_grouped_after_promotion() {
    let dir = tempdir().unwrap();
    let content = vec![0x5a; 1000];
    let x = write(dir.path(), "x.bin", &content);
    let y = write(dir.path(), "y.bin", &content);

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 1000);
    assert_eq!(groups[0].digest, Some(*blake3::hash(&content).as_bytes()));
    assert_eq!(groups[0].paths, vec![x, y]);
}

#[test]
fn test_third_large_file_joins_existing_group() {
    let dir = tempdir().unwrap();
    let content = vec![7u8; 1000];
    let x = write(dir.path(), "x.bin", &content);
    let y = write(dir.path(), "y.bin", &content);

    let mut index = SizeIndex::new(64);
    index.classify(&x).unwrap();
    assert!(matches!(
        index.state(1000),
        Some(ClassificationState::Largish(entries))
            if matches!(entries.get(&content), Some(LargeFileEntry::Single(_)))
    ));

    index.classify(&y).unwrap();
    assert_eq!(duplicate_groups(&index).count(), 1);

    let z = write(dir.path(), "z.bin", &content);
    index.classify(&z).unwrap();

    let groups: Vec<_> = duplicate_groups(&index).collect();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].paths, vec![x, y, z]);
}

#[test]
fn test_empty_files_form_one_group() {
    let dir = tempdir().unwrap();
    let e1 = write(dir.path(), "one.empty", b"");
    let e2 = write(dir.path(), "nested/two.empty", b"");
    let e3 = write(dir.path(), "nested/deeper/three.empty", b"");
    write(dir.path(), "full.txt", b"not empty");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_empty_files());
    let mut expected = vec![e1, e2, e3];
    expected.sort();
    assert_eq!(groups[0].paths, expected);
    assert_eq!(summary.empty_files, 3);
    assert_eq!(summary.reclaimable_space, 0);
}

#[test]
fn test_single_empty_file_is_not_reported() {
    let dir = tempdir().unwrap();
    write(dir.path(), "lonely.empty", b"");
    write(dir.path(), "other.txt", b"data");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.empty_files, 1);
}

#[test]
fn test_same_size_different_content_never_grouped() {
    let dir = tempdir().unwrap();
    // Below and above the threshold
    write(dir.path(), "s1", b"aaaa");
    write(dir.path(), "s2", b"bbbb");
    write(dir.path(), "l1", &[1u8; 500]);
    write(dir.path(), "l2", &[2u8; 500]);

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_groups_ordered_by_size() {
    let dir = tempdir().unwrap();
    write(dir.path(), "big1", &[9u8; 2000]);
    write(dir.path(), "big2", &[9u8; 2000]);
    write(dir.path(), "small1", b"xy");
    write(dir.path(), "small2", b"xy");
    write(dir.path(), "e1", b"");
    write(dir.path(), "e2", b"");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    let sizes: Vec<u64> = groups.iter().map(|g| g.size).collect();
    assert_eq!(sizes, vec![0, 2, 2000]);
}

#[test]
fn test_rescan_is_identical() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/1", b"one");
    write(dir.path(), "b/1", b"one");
    write(dir.path(), "c/2", &[3u8; 300]);
    write(dir.path(), "d/2", &[3u8; 300]);
    write(dir.path(), "e", b"");
    write(dir.path(), "f", b"");

    let finder = DuplicateFinder::with_defaults();
    let (first, _) = finder.find_duplicates(dir.path()).unwrap();
    let (second, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn test_zero_threshold_digests_everything() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"x");
    write(dir.path(), "b", b"x");

    let config = FinderConfig::default().with_threshold(0);
    let (groups, _) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].digest.is_some());
}

#[test]
fn test_threshold_is_inclusive() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", &[1u8; 64]);
    write(dir.path(), "b", &[1u8; 64]);
    write(dir.path(), "c", &[1u8; 65]);
    write(dir.path(), "d", &[1u8; 65]);

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert!(groups[0].digest.is_none());
    assert!(groups[1].digest.is_some());
}

#[test]
fn test_hidden_files_skipped_when_configured() {
    let dir = tempdir().unwrap();
    write(dir.path(), "visible", b"same");
    write(dir.path(), ".hidden", b"same");
    write(dir.path(), ".git/config", b"same");

    let (all, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(all[0].len(), 3);

    let config = FinderConfig::default()
        .with_walker_config(dupescan::scanner::WalkerConfig::default().with_skip_hidden(true));
    let (visible, summary) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();
    assert!(visible.is_empty());
    assert_eq!(summary.total_files, 1);
}
