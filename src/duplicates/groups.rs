//! Extraction of duplicate groups from a completed [`SizeIndex`].
//!
//! # Overview
//!
//! Only sets with more than one member are duplicates. For each size bucket,
//! in ascending size order:
//!
//! - `Empty`: the single set of zero-length files;
//! - `Smallish`: every content set, in content-byte order;
//! - `Largish`: the digest sets inside `Various` entries, in content then
//!   digest order. `Single` entries hold one file and are skipped.
//!
//! Members of a group are sorted by path. The emission order is therefore a
//! function of the scanned files alone, independent of visiting order.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::{duplicate_groups, SizeIndex};
//!
//! let index = SizeIndex::new(64);
//! assert_eq!(duplicate_groups(&index).count(), 0);
//! ```

use std::path::PathBuf;

use super::index::{ClassificationState, PathSet, SizeIndex};
use super::large::LargeFileEntry;
use crate::scanner::{hash_to_hex, Hash};

/// A confirmed group of two or more identical files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// File size in bytes (shared by every member)
    pub size: u64,
    /// BLAKE3 digest, present only for groups above the small-file threshold
    pub digest: Option<Hash>,
    /// Member paths, sorted
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    fn from_set(size: u64, digest: Option<Hash>, paths: &PathSet) -> Self {
        Self {
            size,
            digest,
            paths: paths.iter().cloned().collect(),
        }
    }

    /// Whether this is the group of zero-length files.
    #[must_use]
    pub fn is_empty_files(&self) -> bool {
        self.size == 0
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (all members but one).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Bytes that removing the redundant copies would free.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as hexadecimal, if any.
    #[must_use]
    pub fn digest_hex(&self) -> Option<String> {
        self.digest.as_ref().map(hash_to_hex)
    }
}

/// Yield every group with more than one member, in deterministic order.
pub fn duplicate_groups(index: &SizeIndex) -> impl Iterator<Item = DuplicateGroup> + '_ {
    index
        .buckets()
        .flat_map(|(size, state)| groups_in_bucket(size, state))
        .filter(|group| group.len() > 1)
}

fn groups_in_bucket(size: u64, state: &ClassificationState) -> Vec<DuplicateGroup> {
    match state {
        ClassificationState::Empty(paths) => vec![DuplicateGroup::from_set(size, None, paths)],
        ClassificationState::Smallish(by_content) => by_content
            .values()
            .map(|paths| DuplicateGroup::from_set(size, None, paths))
            .collect(),
        ClassificationState::Largish(by_content) => by_content
            .values()
            .filter_map(|entry| match entry {
                LargeFileEntry::Single(_) => None,
                LargeFileEntry::Various(by_digest) => Some(by_digest),
            })
            .flat_map(|by_digest| {
                by_digest.iter().map(move |(digest, paths)| {
                    DuplicateGroup::from_set(size, Some(*digest), paths)
                })
            })
            .collect(),
    }
}
