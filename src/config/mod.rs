//! Layered JSON configuration: built-in defaults plus a per-user override.

mod merge;
mod ops;

pub use ops::ConfigLoadError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resolved settings for one run. Every field falls back to a built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Candidate terminal applications, in preference order.
    pub terminals: Vec<String>,
    /// Candidate editor applications, in preference order.
    pub editors: Vec<String>,
    /// Extra launch arguments keyed by application name.
    pub app_args: BTreeMap<String, Vec<String>>,
    /// Log sink settings.
    pub logging: LoggingConfig,
    /// Interaction behaviour.
    pub behavior: BehaviorConfig,
}

/// Settings for the rotating log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a log file at all.
    pub enabled: bool,
    /// `DEBUG`, `INFO`, `WARNING` or `ERROR`.
    pub level: String,
    /// Log file path; a leading `~` is expanded to the home directory.
    pub file: String,
    /// Rotate once the file would grow past this many bytes (0 disables rotation).
    pub max_bytes: u64,
    /// Number of rotated files to keep.
    pub backup_count: u32,
}

/// Knobs for the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Offer an editor after the terminal has been launched.
    pub auto_open_editor: bool,
    /// Persist and reuse the last terminal/editor pair per project.
    pub remember_choices: bool,
    /// Ask for terminal and editor in one combined step.
    pub combined_dialog: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminals: ["Ghostty", "Kitty", "Warp", "Wave"]
                .into_iter()
                .map(String::from)
                .collect(),
            editors: vec!["VSCodium".to_string()],
            app_args: BTreeMap::new(),
            logging: LoggingConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "INFO".to_string(),
            file: "~/.config/open-dev-env/open-dev-env.log".to_string(),
            max_bytes: 1024 * 1024,
            backup_count: 3,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            auto_open_editor: true,
            remember_choices: true,
            combined_dialog: false,
        }
    }
}

impl Config {
    /// Extra arguments configured for `app`, empty when none are set.
    #[must_use]
    pub fn args_for(&self, app: &str) -> &[String] {
        self.app_args.get(app).map_or(&[], Vec::as_slice)
    }
}
