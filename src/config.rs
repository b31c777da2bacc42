//! Layered run configuration.
//!
//! Settings are merged from three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. Environment variables prefixed with `DUPESCAN_` (e.g.
//!    `DUPESCAN_THRESHOLD=128`, `DUPESCAN_OUTPUT=json`)
//! 3. Command-line flags
//!
//! No configuration file is read.

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{FinderConfig, DEFAULT_SMALL_FILE_THRESHOLD};
use crate::scanner::WalkerConfig;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DUPESCAN_";

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Small-file threshold in bytes.
    pub threshold: u64,
    /// Skip unreadable files instead of aborting.
    pub skip_unreadable: bool,
    /// Skip hidden files and directories.
    pub skip_hidden: bool,
    /// Report format.
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SMALL_FILE_THRESHOLD,
            skip_unreadable: false,
            skip_hidden: false,
            output: OutputFormat::Text,
        }
    }
}

/// Values given explicitly on the command line. Unset fields leave the
/// lower layers in effect.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_unreadable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            threshold: cli.threshold,
            // Flags can only switch these on
            skip_unreadable: cli.skip_unreadable.then_some(true),
            skip_hidden: cli.skip_hidden.then_some(true),
            output: cli.output,
        }
    }
}

impl Settings {
    /// The merged provider stack.
    #[must_use]
    pub fn figment(overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Resolve settings from defaults, environment and `overrides`.
    ///
    /// # Errors
    ///
    /// Fails if an environment variable holds a value of the wrong type.
    pub fn load(overrides: &Overrides) -> Result<Self, figment::Error> {
        Self::figment(overrides).extract()
    }

    /// Finder configuration for these settings.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_threshold(self.threshold)
            .with_skip_unreadable(self.skip_unreadable)
            .with_walker_config(WalkerConfig::default().with_skip_hidden(self.skip_hidden))
    }
}
