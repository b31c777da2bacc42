//! Exit codes and structured error reporting.

use serde::Serialize;

use crate::duplicates::ScanSummary;

/// Exit codes for the dupescan binary.
///
/// - 0: Success (duplicates found)
/// - 1: General error (fatal failure, including unreadable files)
/// - 2: No duplicates found (also clap's code for usage errors)
/// - 3: Partial success (some directories or files were skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and duplicates were found.
    Success = 0,
    /// General error: The scan could not complete.
    GeneralError = 1,
    /// No duplicates: Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Partial success: Scan completed but skipped some paths.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Pick the exit code for a completed scan.
    #[must_use]
    pub fn for_scan(summary: &ScanSummary) -> Self {
        if summary.is_partial() {
            Self::PartialSuccess
        } else if summary.duplicate_groups > 0 {
            Self::Success
        } else {
            Self::NoDuplicates
        }
    }

    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NoDuplicates => "DS002",
            Self::PartialSuccess => "DS003",
        }
    }
}

/// Structured error information for `--json-errors`.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
