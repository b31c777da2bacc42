//! Progress reporting using indicatif.
//!
//! The scan is a single sequential pass, so progress is a spinner with a
//! running file count rather than a bar with a known total.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the classification pass.
///
/// Implement this trait to observe a scan as it runs.
pub trait ProgressCallback: Send + Sync {
    /// Called before a root directory is walked.
    fn on_root_start(&self, _root: &Path) {}

    /// Called after each file has been classified.
    ///
    /// # Arguments
    ///
    /// * `count` - Files classified so far (1-based)
    /// * `path` - The file just classified
    fn on_file(&self, count: usize, path: &Path);

    /// Called once when the pass ends, successfully or not.
    fn on_scan_end(&self);
}

/// Spinner on stderr showing how many files have been classified.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Create a spinner; a quiet spinner draws nothing.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        if quiet {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} {pos} files {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl ProgressCallback for Progress {
    fn on_root_start(&self, root: &Path) {
        self.bar.set_message(format!("scanning {}", root.display()));
    }

    fn on_file(&self, count: usize, _path: &Path) {
        self.bar.set_position(count as u64);
    }

    fn on_scan_end(&self) {
        self.bar.finish_and_clear();
    }
}
