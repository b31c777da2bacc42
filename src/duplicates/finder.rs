//! Duplicate finder: walks the roots and folds every file into a
//! [`SizeIndex`].
//!
//! # Overview
//!
//! The finder is the driver around the classification engine:
//! 1. **Walk** each root in argument order (see [`crate::scanner::Walker`])
//! 2. **Classify** every regular file into the size index, one at a time
//! 3. **Extract** groups with more than one member
//!
//! Walk errors (missing roots, unreadable directories) are recorded and the
//! scan continues. A file that cannot be stat'd or read aborts the scan,
//! unless [`FinderConfig::skip_unreadable`] is set.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_threshold(128));
//! let (groups, summary) = finder
//!     .find_duplicates_in_paths(&[PathBuf::from(".")])
//!     .unwrap();
//!
//! println!("Found {} duplicate groups", groups.len());
//! println!("Reclaimable space: {}", summary.reclaimable_display());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::groups::{duplicate_groups, DuplicateGroup};
use super::index::{SizeIndex, DEFAULT_SMALL_FILE_THRESHOLD};
use super::{ClassifyError, FinderError};
use crate::progress::ProgressCallback;
use crate::scanner::{ScanError, Walker, WalkerConfig};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Files at or below this size are grouped by content only.
    pub threshold: u64,
    /// Skip files that cannot be stat'd or read instead of aborting.
    pub skip_unreadable: bool,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("threshold", &self.threshold)
            .field("skip_unreadable", &self.skip_unreadable)
            .field("walker_config", &self.walker_config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SMALL_FILE_THRESHOLD,
            skip_unreadable: false,
            walker_config: WalkerConfig::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the small-file threshold in bytes.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Skip unreadable files with a warning instead of aborting.
    #[must_use]
    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of files classified
    pub total_files: usize,
    /// Total size of all classified files in bytes
    pub total_size: u64,
    /// Number of zero-length files classified
    pub empty_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Number of redundant copies (excluding one original per group)
    pub duplicate_files: usize,
    /// Total space that removing the redundant copies would free
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Roots and directories that could not be walked
    pub scan_errors: Vec<ScanError>,
    /// Files skipped because they could not be classified
    pub skipped_files: Vec<ClassifyError>,
}

impl ScanSummary {
    /// Whether anything was skipped during the scan.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.scan_errors.is_empty() || !self.skipped_files.is_empty()
    }

    /// Format reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Format total size as a human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }

    fn record_groups(&mut self, groups: &[DuplicateGroup]) {
        self.duplicate_groups = groups.len();
        self.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        self.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
    }
}

/// Walks root directories and classifies every file found.
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicates under a single root.
    ///
    /// # Errors
    ///
    /// See [`DuplicateFinder::find_duplicates_in_paths`].
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        self.find_duplicates_in_paths(&[path.to_path_buf()])
    }

    /// Find duplicates across several roots, scanned in the given order.
    ///
    /// A root nested inside (or equal to) an earlier root is skipped, since
    /// its files are already covered.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::NoPaths`] if `roots` is empty, and
    /// [`FinderError::Classify`] if a file cannot be classified while
    /// `skip_unreadable` is off. No partial result is returned in that case.
    pub fn find_duplicates_in_paths(
        &self,
        roots: &[PathBuf],
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        if roots.is_empty() {
            return Err(FinderError::NoPaths);
        }

        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        let result = self.build_index(&effective_roots(roots), &mut summary);
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_end();
        }
        let index = result?;

        let groups: Vec<DuplicateGroup> = duplicate_groups(&index).collect();
        summary.record_groups(&groups);
        summary.scan_duration = start_time.elapsed();

        log::debug!(
            "Scan complete: {} files, {} duplicate groups, {} reclaimable",
            summary.total_files,
            summary.duplicate_groups,
            summary.reclaimable_display()
        );

        Ok((groups, summary))
    }

    /// Fold every file under `roots` into a fresh index.
    fn build_index(
        &self,
        roots: &[PathBuf],
        summary: &mut ScanSummary,
    ) -> Result<SizeIndex, FinderError> {
        let mut index = SizeIndex::new(self.config.threshold);

        for root in roots {
            log::info!("Scanning {}", root.display());
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_root_start(root);
            }

            let walker = Walker::new(root, self.config.walker_config.clone());
            for entry in walker.walk() {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        summary.scan_errors.push(e);
                        continue;
                    }
                };

                match index.classify(&path) {
                    Ok(size) => self.record_file(summary, &path, size),
                    Err(e) if self.config.skip_unreadable => {
                        log::warn!("Skipping unreadable file: {}", e);
                        // Only an earlier copy was dropped; this file is indexed
                        if let Some(size) = e.admitted_size() {
                            self.record_file(summary, &path, size);
                        }
                        summary.skipped_files.push(e);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        Ok(index)
    }

    fn record_file(&self, summary: &mut ScanSummary, path: &Path, size: u64) {
        summary.total_files += 1;
        summary.total_size += size;
        if size == 0 {
            summary.empty_files += 1;
        }
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_file(summary.total_files, path);
        }
    }
}

/// Drop roots that are equal to, or nested under, another root.
///
/// Order is preserved. Paths are compared in canonical form where possible.
fn effective_roots(roots: &[PathBuf]) -> Vec<PathBuf> {
    let canonical: Vec<PathBuf> = roots
        .iter()
        .map(|r| r.canonicalize().unwrap_or_else(|_| r.clone()))
        .collect();

    roots
        .iter()
        .enumerate()
        .filter(|(i, root)| {
            let me = &canonical[*i];
            let covered_by = canonical.iter().enumerate().find(|(j, other)| {
                j != i && me.starts_with(other) && (me != *other || j < i)
            });
            match covered_by {
                Some((j, _)) => {
                    log::info!(
                        "Skipping {}: already covered by {}",
                        root.display(),
                        roots[j].display()
                    );
                    false
                }
                None => true,
            }
        })
        .map(|(_, root)| root.clone())
        .collect()
}
