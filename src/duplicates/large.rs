//! Grouping for files above the small-file threshold.
//!
//! # Overview
//!
//! Large files use a two-tier key. The first tier is the full raw content,
//! exactly as for small files. While only one file has been seen with a
//! given content the entry is a [`LargeFileEntry::Single`] and no digest
//! exists. The first collision promotes the entry to
//! [`LargeFileEntry::Various`], which tracks members by BLAKE3 digest:
//!
//! - the earlier file is digested by streaming it from disk again;
//! - the new file is digested from the bytes already read for this step.
//!
//! Every later file with the same content is digested from memory and added
//! under its digest. The content key already guarantees equality, so in the
//! normal case all members land under one digest. If the earlier file was
//! modified on disk between its first read and the promotion, its digest
//! differs and it ends up alone under its own digest. If the earlier file
//! cannot be read at all, it is dropped and the new file becomes the
//! `Single` entry in its place.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::index::{add_to_group, ContentKey, PathSet};
use crate::scanner::{hash_to_hex, Hash, HashError, Hasher};

/// State of one content key inside a large-file size bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LargeFileEntry {
    /// Exactly one file has this content; no digest computed yet.
    Single(PathBuf),
    /// Two or more files have this content, grouped by digest.
    Various(BTreeMap<Hash, PathSet>),
}

impl LargeFileEntry {
    /// Number of distinct paths held by this entry.
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Various(by_digest) => by_digest.values().map(PathSet::len).sum(),
        }
    }
}

/// Add a large file whose full content has already been read.
///
/// # Errors
///
/// Returns the [`HashError`] of the earlier file if it cannot be digested
/// during promotion. The new file has already replaced it as the `Single`
/// entry when this happens.
pub(crate) fn add_large_file(
    by_content: &mut BTreeMap<ContentKey, LargeFileEntry>,
    path: &Path,
    content: ContentKey,
    hasher: &Hasher,
) -> Result<(), HashError> {
    match by_content.entry(content) {
        Entry::Vacant(slot) => {
            slot.insert(LargeFileEntry::Single(path.to_path_buf()));
        }
        Entry::Occupied(mut slot) => {
            let digest = hasher.hash_bytes(slot.key());
            match slot.get_mut() {
                LargeFileEntry::Single(previous) if previous.as_path() == path => {}
                LargeFileEntry::Single(previous) => {
                    let previous_digest = match hasher.full_hash(previous) {
                        Ok(found) => found,
                        Err(e) => {
                            slot.insert(LargeFileEntry::Single(path.to_path_buf()));
                            return Err(e);
                        }
                    };
                    log::debug!(
                        "Content collision: promoting {} and {} to digest tier",
                        previous.display(),
                        path.display()
                    );
                    if previous_digest != digest {
                        log::warn!(
                            "{} changed since it was first read (digest {})",
                            previous.display(),
                            hash_to_hex(&previous_digest)
                        );
                    }

                    let mut by_digest = BTreeMap::new();
                    add_to_group(&mut by_digest, previous_digest, previous.clone());
                    add_to_group(&mut by_digest, digest, path.to_path_buf());
                    slot.insert(LargeFileEntry::Various(by_digest));
                }
                LargeFileEntry::Various(by_digest) => {
                    add_to_group(by_digest, digest, path.to_path_buf());
                }
            }
        }
    }
    Ok(())
}
