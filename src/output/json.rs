//! JSON report for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "size": 1000,
//!       "digest": "af1349b9...",
//!       "empty": false,
//!       "files": ["/data/x.bin", "/data/y.bin"]
//!     },
//!     {
//!       "size": 3,
//!       "digest": null,
//!       "empty": false,
//!       "files": ["/data/a.txt", "/data/b.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 12,
//!     "total_size": 4096,
//!     "empty_files": 0,
//!     "duplicate_groups": 2,
//!     "duplicate_files": 2,
//!     "reclaimable_space": 1003,
//!     "scan_duration_ms": 4,
//!     "skipped_directories": 0,
//!     "skipped_files": 0,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   }
//! }
//! ```
//!
//! `digest` is `null` for groups at or below the small-file threshold.
//! Paths are reported as the walker produced them.

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// File size in bytes
    pub size: u64,
    /// BLAKE3 digest as 64 hex characters, or null below the threshold
    pub digest: Option<String>,
    /// Whether this is the group of zero-length files
    pub empty: bool,
    /// Member paths, sorted
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            size: group.size,
            digest: group.digest_hex(),
            empty: group.is_empty_files(),
            files: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub total_files: usize,
    pub total_size: u64,
    pub empty_files: usize,
    pub duplicate_groups: usize,
    /// Copies beyond the first of each group
    pub duplicate_files: usize,
    pub reclaimable_space: u64,
    pub scan_duration_ms: u64,
    /// Roots or directories that could not be walked
    pub skipped_directories: usize,
    /// Files skipped with `--skip-unreadable`
    pub skipped_files: usize,
    pub exit_code: i32,
    /// Machine-readable exit code name (e.g. "DS000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a scan summary and the run's exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            total_files: summary.total_files,
            total_size: summary.total_size,
            empty_files: summary.empty_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            skipped_directories: summary.scan_errors.len(),
            skipped_files: summary.skipped_files.len(),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub groups: Vec<JsonGroup>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the document from the groups, summary and exit code of a scan.
    ///
    /// # Example
    ///
    /// ```
    /// use dupescan::duplicates::{DuplicateGroup, ScanSummary};
    /// use dupescan::error::ExitCode;
    /// use dupescan::output::JsonOutput;
    /// use std::path::PathBuf;
    ///
    /// let groups = vec![DuplicateGroup {
    ///     size: 3,
    ///     digest: None,
    ///     paths: vec![PathBuf::from("/a"), PathBuf::from("/b")],
    /// }];
    ///
    /// let output = JsonOutput::new(&groups, &ScanSummary::default(), ExitCode::Success);
    /// assert_eq!(output.groups.len(), 1);
    /// assert!(output.groups[0].digest.is_none());
    /// ```
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            groups: groups.iter().map(JsonGroup::from).collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the document followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur while writing the JSON report.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error while writing JSON: {0}")]
    Io(#[from] std::io::Error),
}
