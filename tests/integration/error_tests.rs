use dupescan::duplicates::{ClassifyError, DuplicateFinder, FinderError, SizeIndex};
use dupescan::error::ExitCode;
use dupescan::scanner::ScanError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_no_directories_is_an_error() {
    let result = DuplicateFinder::with_defaults().find_duplicates_in_paths(&[]);
    assert!(matches!(result, Err(FinderError::NoPaths)));
}

#[test]
fn test_missing_directory_is_skipped() {
    let present = tempdir().unwrap();
    fs::write(present.path().join("a"), b"1").unwrap();
    fs::write(present.path().join("b"), b"1").unwrap();
    let gone = tempdir().unwrap().path().join("vanished");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[gone.clone(), present.path().to_path_buf()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.scan_errors.len(), 1);
    assert!(matches!(&summary.scan_errors[0], ScanError::NotFound(p) if *p == gone));
    assert_eq!(ExitCode::for_scan(&summary), ExitCode::PartialSuccess);
}

#[test]
fn test_classifying_a_missing_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-here");

    let mut index = SizeIndex::new(64);
    let err = index.classify(&missing).unwrap_err();

    assert!(matches!(err, ClassifyError::Stat { .. }));
    assert_eq!(err.path(), missing.as_path());
    assert_eq!(index.file_count(), 0);
}

#[test]
fn test_failed_classification_leaves_index_usable() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, b"same").unwrap();
    fs::write(&b, b"same").unwrap();

    let mut index = SizeIndex::new(64);
    index.classify(&a).unwrap();
    assert!(index.classify(&dir.path().join("nope")).is_err());
    index.classify(&b).unwrap();

    assert_eq!(index.file_count(), 2);
    assert_eq!(dupescan::duplicates::duplicate_groups(&index).count(), 1);
}

#[test]
fn test_from_paths_stops_at_first_failure() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    fs::write(&a, b"data").unwrap();

    let result = SizeIndex::from_paths(64, [a, dir.path().join("missing")]);
    assert!(matches!(result, Err(ClassifyError::Stat { .. })));
}

#[test]
fn test_exit_codes_for_completed_scans() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"1").unwrap();
    fs::write(dir.path().join("b"), b"2").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (_, summary) = finder.find_duplicates(dir.path()).unwrap();
    assert_eq!(ExitCode::for_scan(&summary), ExitCode::NoDuplicates);

    fs::write(dir.path().join("c"), b"1").unwrap();
    let (_, summary) = finder.find_duplicates(dir.path()).unwrap();
    assert_eq!(ExitCode::for_scan(&summary), ExitCode::Success);
}
