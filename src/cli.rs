//! Command-line interface definitions for dupescan.
//!
//! # Example
//!
//! ```bash
//! # Report duplicate groups under two trees
//! dupescan ~/Downloads ~/Documents
//!
//! # Raise the small-file threshold and emit JSON
//! dupescan --threshold 4KiB --output json ~/Downloads
//!
//! # Verbose mode for debugging
//! dupescan -v ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find groups of duplicate files under one or more directories.
///
/// Files are compared by size, then by full content; content collisions
/// among larger files are tracked by BLAKE3 digest. Nothing is modified.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Small-file threshold (e.g. 64, 1KiB); files at or below it are
    /// compared by content only
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(short, long, value_name = "SIZE", value_parser = parse_size)]
    pub threshold: Option<u64>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Skip files that cannot be read instead of aborting the scan
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Directories to scan, in order
    #[arg(value_name = "DIR", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Output format for scan results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One header line per group followed by its paths
    #[default]
    Text,
    /// JSON document with groups and summary
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// (case-insensitive). Numbers without suffix are bytes.
///
/// # Examples
///
/// ```
/// use dupescan::cli::parse_size;
///
/// assert_eq!(parse_size("64").unwrap(), 64);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1.5MB").unwrap(), 1_500_000);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, has no valid leading number,
/// or ends in an unknown suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| format!("Invalid number: '{number}'"))?;

    let multiplier: u64 = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1 << 10,
        "MB" | "M" => 1_000_000,
        "MIB" => 1 << 20,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1 << 30,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1 << 40,
        other => return Err(format!("Unknown size suffix: '{other}'")),
    };

    Ok((value * multiplier as f64) as u64)
}
