//! Per-project memory of the last terminal and editor used.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::HistoryError;
use crate::fs_atomic;

/// Last terminal/editor pair used for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Terminal application name.
    pub terminal: String,
    /// Editor application name, `None` when no editor was opened.
    #[serde(default)]
    pub editor: Option<String>,
    /// Local time of the launch, written as ISO-8601 without offset.
    ///
    /// Timestamps carrying an offset are accepted and converted to local time.
    #[serde(deserialize_with = "deserialize_last_used")]
    pub last_used: NaiveDateTime,
}

fn deserialize_last_used<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid ISO-8601 timestamp {raw:?}"))
    })
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .or_else(|_| raw.parse::<NaiveDateTime>())
        .ok()
}

/// Project path string to its last choice.
pub type History = BTreeMap<String, HistoryEntry>;

/// What was chosen for a project last time.
///
/// Both fields are `None` when remembering is disabled or the project is new.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastChoice {
    /// Terminal used last time.
    pub terminal: Option<String>,
    /// Editor used last time.
    pub editor: Option<String>,
}

impl LastChoice {
    /// The project was opened before and the user explicitly went without an editor.
    #[must_use]
    pub const fn declined_editor(&self) -> bool {
        self.terminal.is_some() && self.editor.is_none()
    }
}

/// JSON file remembering the last choice per project.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    enabled: bool,
}

impl HistoryStore {
    /// Store at `path`. When `enabled` is false every operation is a no-op.
    #[must_use]
    pub const fn new(path: PathBuf, enabled: bool) -> Self {
        Self { path, enabled }
    }

    /// Per-user history file location.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Config::dir()?.join("history.json"))
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether choices are persisted at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Read the whole history. Missing or malformed files read as empty.
    #[must_use]
    pub fn load(&self) -> History {
        match self.try_load() {
            Ok(history) => history,
            Err(e) => {
                log::warn!("{e}; starting with empty history");
                History::new()
            }
        }
    }

    fn try_load(&self) -> Result<History, HistoryError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(History::new()),
            Err(source) => {
                return Err(HistoryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let entries: Map<String, Value> =
            serde_json::from_str(&content).map_err(|source| HistoryError::Json {
                path: self.path.clone(),
                source,
            })?;
        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    log::warn!("skipping unreadable history entry for {key}: {e}");
                    None
                }
            })
            .collect())
    }

    /// Upsert the entry for `project` with the current time and rewrite the file.
    pub fn record(
        &self,
        project: &Path,
        terminal: &str,
        editor: Option<&str>,
    ) -> Result<(), HistoryError> {
        if !self.enabled {
            return Ok(());
        }
        let mut history = self.load();
        history.insert(
            project.to_string_lossy().into_owned(),
            HistoryEntry {
                terminal: terminal.to_string(),
                editor: editor.map(String::from),
                last_used: Local::now().naive_local(),
            },
        );
        self.save(&history)?;
        log::debug!(
            "remembered {terminal} / {} for {}",
            editor.unwrap_or("no editor"),
            project.display()
        );
        Ok(())
    }

    fn save(&self, history: &History) -> Result<(), HistoryError> {
        let io_err = |source| HistoryError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(history).map_err(|source| HistoryError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs_atomic::write(&self.path, content.as_bytes()).map_err(io_err)
    }

    /// Terminal and editor used for `project` last time.
    #[must_use]
    pub fn last_choice(&self, project: &Path) -> LastChoice {
        if !self.enabled {
            return LastChoice::default();
        }
        self.load()
            .remove(&*project.to_string_lossy())
            .map(|entry| LastChoice {
                terminal: Some(entry.terminal),
                editor: entry.editor,
            })
            .unwrap_or_default()
    }
}
