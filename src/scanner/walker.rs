//! Directory walker built on walkdir.
//!
//! # Overview
//!
//! [`Walker`] enumerates the regular files under one root, depth-first, with
//! the children of every directory sorted by file name so that repeated
//! walks of an unchanged tree produce the same sequence.
//!
//! Directories that cannot be read (and roots that do not exist) are not
//! fatal: they are logged, yielded as [`ScanError`] items, and the walk moves
//! on to the next entry. Symbolic links are never followed and never
//! yielded.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} files", files.len());
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{ScanError, WalkerConfig};

/// Sequential directory walker yielding regular-file paths.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the tree, yielding regular files and non-fatal errors in
    /// traversal order.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let skip_hidden = self.config.skip_hidden;

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && entry.depth() > 0 && is_hidden(entry)))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        Some(Ok(entry.into_path()))
                    } else {
                        if entry.file_type().is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        None
                    }
                }
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Convert a walkdir error into a [`ScanError`], logging it as a skip.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        let err = match error.into_io_error() {
            Some(io) if io.kind() == ErrorKind::PermissionDenied => {
                ScanError::PermissionDenied(path)
            }
            Some(io) if io.kind() == ErrorKind::NotFound => ScanError::NotFound(path),
            Some(io) => ScanError::Io { path, source: io },
            None => ScanError::Io {
                source: std::io::Error::other("filesystem loop detected"),
                path,
            },
        };

        log::warn!("Skipping {}", err);
        err
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}
