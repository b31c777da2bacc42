//! Duplicate detection module.
//!
//! Files are classified one at a time into a [`SizeIndex`], using
//! progressively more expensive discriminators:
//!
//! 1. **Size** - the top-level key; files of different sizes never meet.
//! 2. **Content** - the full raw bytes, used directly as a map key.
//! 3. **Digest** - BLAKE3 of the content, only for files above the
//!    small-file threshold, and only once two of them share the same bytes.
//!
//! Once every file has been folded in, [`duplicate_groups`] walks the index
//! and yields the groups with more than one member.

pub mod finder;
pub mod groups;
pub mod index;
pub mod large;
pub mod small;

use std::path::{Path, PathBuf};

pub use finder::{DuplicateFinder, FinderConfig, ScanSummary};
pub use groups::{duplicate_groups, DuplicateGroup};
pub use index::{
    ClassificationState, ContentKey, PathSet, SizeIndex, DEFAULT_SMALL_FILE_THRESHOLD,
};
pub use large::LargeFileEntry;

use crate::scanner::HashError;

/// Errors raised while classifying a single file.
///
/// These abort the scan unless the finder is configured to skip unreadable
/// files.
#[derive(thiserror::Error, Debug)]
pub enum ClassifyError {
    /// The file's metadata could not be read.
    #[error("Failed to stat {path}: {source}")]
    Stat {
        /// File being classified
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file's content could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File being classified
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An earlier file with the same content could not be digested when a
    /// later copy arrived. The earlier file was dropped from the index and
    /// the file being classified took its place.
    #[error("Dropped earlier copy, {source}")]
    EarlierCopy {
        /// Size of the file that took its place
        size: u64,
        /// Why the earlier file could not be digested
        #[source]
        source: HashError,
    },
}

impl ClassifyError {
    /// The path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Stat { path, .. } | Self::Read { path, .. } => path,
            Self::EarlierCopy { source, .. } => match source {
                HashError::NotFound(path)
                | HashError::PermissionDenied(path)
                | HashError::Io { path, .. } => path,
            },
        }
    }

    /// Size of the file being classified, if it was added to the index
    /// despite this error.
    #[must_use]
    pub fn admitted_size(&self) -> Option<u64> {
        match self {
            Self::EarlierCopy { size, .. } => Some(*size),
            Self::Stat { .. } | Self::Read { .. } => None,
        }
    }
}

/// Errors that end a duplicate scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// No root directories were given.
    #[error("No directories given to scan")]
    NoPaths,

    /// A file could not be classified.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
