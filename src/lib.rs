//! dupescan - duplicate file finder
//!
//! Walks directory trees and groups files with identical content. Files are
//! bucketed by size; small files are compared by their bytes directly and
//! larger ones by BLAKE3 digest once a second candidate appears. The scan is
//! read-only.

pub mod app;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

pub use app::run_app;
