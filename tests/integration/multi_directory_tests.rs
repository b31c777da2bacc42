use dupescan::duplicates::DuplicateFinder;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_scan_two_non_overlapping_directories() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("a.txt"), b"dup").unwrap();
    fs::write(dir2.path().join("b.txt"), b"dup").unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[dir1.path().to_path_buf(), dir2.path().to_path_buf()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_scan_overlapping_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("a.txt"), b"content").unwrap();
    fs::write(sub.join("b.txt"), b"content").unwrap();

    // The child is already covered by the parent
    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[sub.clone(), dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_same_directory_twice_counts_once() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only"), b"unique").unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[dir.path().to_path_buf(), dir.path().to_path_buf()])
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_cross_directory_large_duplicates() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let dir3 = tempdir().unwrap();
    let content = vec![b'q'; 4096];
    fs::write(dir1.path().join("1.bin"), &content).unwrap();
    fs::write(dir2.path().join("2.bin"), &content).unwrap();
    fs::write(dir3.path().join("3.bin"), &content).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[
            dir1.path().to_path_buf(),
            dir2.path().to_path_buf(),
            dir3.path().to_path_buf(),
        ])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(summary.duplicate_files, 2);
    assert_eq!(summary.reclaimable_space, 8192);
}

#[test]
fn test_empty_files_across_directories_form_one_group() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("e"), b"").unwrap();
    fs::write(dir2.path().join("e"), b"").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[dir1.path().to_path_buf(), dir2.path().to_path_buf()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_empty_files());
}

#[test]
fn test_argument_order_does_not_change_groups() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("x"), [5u8; 100]).unwrap();
    fs::write(dir2.path().join("y"), [5u8; 100]).unwrap();
    fs::write(dir1.path().join("s"), b"sm").unwrap();
    fs::write(dir2.path().join("t"), b"sm").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (forward, _) = finder
        .find_duplicates_in_paths(&[dir1.path().to_path_buf(), dir2.path().to_path_buf()])
        .unwrap();
    let (backward, _) = finder
        .find_duplicates_in_paths(&[dir2.path().to_path_buf(), dir1.path().to_path_buf()])
        .unwrap();

    assert_eq!(forward, backward);
}
