//! Error types shared across the crate.

use std::path::PathBuf;

/// Failures that end processing of a single project.
///
/// None of these stop the remaining projects from being processed.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The path does not exist, is not a directory, or cannot be resolved.
    #[error("invalid project path {path}: {reason}")]
    InvalidPath {
        /// The path as given on the command line.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
    /// None of the configured terminals is installed.
    #[error("none of the configured terminals are installed ({})", configured.join(", "))]
    NoTerminalsAvailable {
        /// The configured candidate names.
        configured: Vec<String>,
    },
    /// The application could not be started.
    #[error("failed to launch {app} for {}: {reason}", path.display())]
    LaunchFailed {
        /// Application name.
        app: String,
        /// Project directory.
        path: PathBuf,
        /// Underlying error, rendered.
        reason: String,
    },
    /// The choice prompt itself failed.
    #[error("could not show the prompt: {0}")]
    PromptFailed(String),
}

/// Failures reading or writing the choice history. Never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Reading, writing or creating the history file failed.
    #[error("history I/O error at {}: {source}", path.display())]
    Io {
        /// History file location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The history file is not valid JSON of the expected shape.
    #[error("history file {} is malformed: {source}", path.display())]
    Json {
        /// History file location.
        path: PathBuf,
        /// Underlying (de)serialization error.
        source: serde_json::Error,
    },
}
