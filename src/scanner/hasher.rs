//! BLAKE3 file digests with streaming support.
//!
//! # Overview
//!
//! The digest is the second-tier key for files above the small-file
//! threshold. It is only computed once two files of the same size have been
//! seen with identical raw content, so most files are never digested.
//!
//! Two entry points exist because the classification step already holds the
//! new file's bytes in memory, while the promoted `previous` file has to be
//! streamed from disk again:
//!
//! - [`Hasher::hash_bytes`] digests bytes that were already read.
//! - [`Hasher::full_hash`] streams a file through a fixed-size buffer.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::{Hash, HashError};

/// Default read buffer for streaming digests (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Computes BLAKE3 digests of file contents.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Digest bytes that are already in memory.
    #[must_use]
    pub fn hash_bytes(&self, bytes: &[u8]) -> Hash {
        *blake3::hash(bytes).as_bytes()
    }

    /// Stream a file from disk and digest its full content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(map_io_error(path, e)),
            };
            hasher.update(&buffer[..read]);
        }

        log::trace!("Digested {}", path.display());
        Ok(*hasher.finalize().as_bytes())
    }
}

fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
