//! Report formatters for scan results.
//!
//! - Text: group headers followed by member paths, for people
//! - JSON: groups plus summary, for scripts
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::TextReport;
//! use std::path::Path;
//!
//! let (groups, _summary) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//!
//! TextReport::new(&groups).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::TextReport;
