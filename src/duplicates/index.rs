//! The size index: top-level dispatch of files into classification states.
//!
//! # Overview
//!
//! A [`SizeIndex`] maps every file size seen so far to a
//! [`ClassificationState`]. The variant is fixed by the size alone:
//!
//! | size                  | state       | inner key                 |
//! |-----------------------|-------------|---------------------------|
//! | `0`                   | `Empty`     | none (one set)            |
//! | `1..=threshold`       | `Smallish`  | full content              |
//! | `> threshold`         | `Largish`   | full content, then digest |
//!
//! The index starts out holding the empty-file bucket and only ever grows.
//! Each classification step stats the file, reads it at most once, and
//! updates exactly one size bucket.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{duplicate_groups, SizeIndex};
//! use std::path::Path;
//!
//! let paths = [Path::new("a.txt"), Path::new("b.txt")];
//! let index = SizeIndex::from_paths(64, paths).unwrap();
//! for group in duplicate_groups(&index) {
//!     println!("{:?}", group.paths);
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use super::large::{self, LargeFileEntry};
use super::{small, ClassifyError};
use crate::scanner::Hasher;

/// Files at or below this many bytes are grouped by direct content equality.
pub const DEFAULT_SMALL_FILE_THRESHOLD: u64 = 64;

/// A set of paths; iteration is sorted, which keeps reports deterministic.
pub type PathSet = BTreeSet<PathBuf>;

/// The full raw content of a file, used as a map key.
pub type ContentKey = Vec<u8>;

/// Per-size classification state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationState {
    /// Every zero-length file seen so far.
    Empty(PathSet),
    /// Files at or below the threshold, keyed by full content.
    Smallish(BTreeMap<ContentKey, PathSet>),
    /// Files above the threshold, keyed by full content.
    Largish(BTreeMap<ContentKey, LargeFileEntry>),
}

impl ClassificationState {
    /// The initial state for a size bucket that has not been seen yet.
    #[must_use]
    pub fn fresh(size: u64, threshold: u64) -> Self {
        if size == 0 {
            Self::Empty(PathSet::new())
        } else if size <= threshold {
            Self::Smallish(BTreeMap::new())
        } else {
            Self::Largish(BTreeMap::new())
        }
    }

    /// Number of distinct paths held in this state.
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::Empty(paths) => paths.len(),
            Self::Smallish(by_content) => by_content.values().map(BTreeSet::len).sum(),
            Self::Largish(by_content) => by_content.values().map(LargeFileEntry::file_count).sum(),
        }
    }
}

/// Insert `path` into the set stored under `key`, creating the set if needed.
///
/// Returns `false` if the path was already a member.
pub(crate) fn add_to_group<K: Ord>(
    groups: &mut BTreeMap<K, PathSet>,
    key: K,
    path: PathBuf,
) -> bool {
    groups.entry(key).or_default().insert(path)
}

/// Mapping from file size to classification state.
#[derive(Debug, Clone)]
pub struct SizeIndex {
    buckets: BTreeMap<u64, ClassificationState>,
    threshold: u64,
    hasher: Hasher,
}

impl Default for SizeIndex {
    fn default() -> Self {
        Self::new(DEFAULT_SMALL_FILE_THRESHOLD)
    }
}

impl SizeIndex {
    /// Create an index holding only the (empty) zero-size bucket.
    #[must_use]
    pub fn new(threshold: u64) -> Self {
        let mut buckets = BTreeMap::new();
        buckets.insert(0, ClassificationState::Empty(PathSet::new()));
        Self {
            buckets,
            threshold,
            hasher: Hasher::new(),
        }
    }

    /// Build an index by folding every path in order.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be classified.
    pub fn from_paths<I, P>(threshold: u64, paths: I) -> Result<Self, ClassifyError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .try_fold(Self::new(threshold), |index, path| {
                index.with_file(path.as_ref())
            })
    }

    /// The small-file threshold in bytes.
    #[must_use]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// The state for one size, if any file of that size has been seen.
    /// Size 0 is always present.
    #[must_use]
    pub fn state(&self, size: u64) -> Option<&ClassificationState> {
        self.buckets.get(&size)
    }

    /// All size buckets in ascending size order.
    pub fn buckets(&self) -> impl Iterator<Item = (u64, &ClassificationState)> + '_ {
        self.buckets.iter().map(|(size, state)| (*size, state))
    }

    /// Total number of distinct paths held by the index.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.buckets.values().map(ClassificationState::file_count).sum()
    }

    /// Fold one file into the index, returning the updated index.
    ///
    /// # Errors
    ///
    /// See [`SizeIndex::classify`].
    pub fn with_file(mut self, path: &Path) -> Result<Self, ClassifyError> {
        self.classify(path)?;
        Ok(self)
    }

    /// Classify one file in place and return its size.
    ///
    /// The file is stat'd, and unless it is empty its content is read once
    /// in full. A file that cannot be stat'd or read leaves the index exactly
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Stat`] or [`ClassifyError::Read`] if the file
    /// itself cannot be examined. Returns [`ClassifyError::EarlierCopy`] if
    /// an earlier file with the same content cannot be digested; `path` is
    /// then in the index in place of that file.
    pub fn classify(&mut self, path: &Path) -> Result<u64, ClassifyError> {
        let size = fs::metadata(path)
            .map_err(|source| ClassifyError::Stat {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        // Read before touching the map so a failed read leaves no new bucket
        let content = if size == 0 {
            ContentKey::new()
        } else {
            read_content(path)?
        };

        let threshold = self.threshold;
        let state = self
            .buckets
            .entry(size)
            .or_insert_with(|| ClassificationState::fresh(size, threshold));

        match state {
            ClassificationState::Empty(paths) => {
                paths.insert(path.to_path_buf());
            }
            ClassificationState::Smallish(by_content) => {
                small::add_small_file(by_content, path, content);
            }
            ClassificationState::Largish(by_content) => {
                large::add_large_file(by_content, path, content, &self.hasher)
                    .map_err(|source| ClassifyError::EarlierCopy { size, source })?;
            }
        }

        log::trace!("Classified {} ({} bytes)", path.display(), size);
        Ok(size)
    }
}

fn read_content(path: &Path) -> Result<ContentKey, ClassifyError> {
    fs::read(path).map_err(|source| ClassifyError::Read {
        path: path.to_path_buf(),
        source,
    })
}
