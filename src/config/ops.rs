use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::merge::{merge_one_level, migrate_legacy_editor};
use super::Config;
use crate::fs_atomic;

/// Why an override document could not be applied.
///
/// Always recoverable: the caller falls back to the built-in defaults.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// The file exists but could not be read.
    #[error("failed to read config from {}: {source}", path.display())]
    Read {
        /// Config file location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid JSON.
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        /// Config file location.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The file is JSON but not a JSON object.
    #[error("config at {} is not a JSON object", path.display())]
    NotAnObject {
        /// Config file location.
        path: PathBuf,
    },
    /// The per-user config location could not be determined.
    #[error("could not locate the config file: {reason}")]
    Location {
        /// What went wrong.
        reason: String,
    },
    /// The merged document does not have the expected field types.
    #[error("config at {} has invalid values: {source}", path.display())]
    Shape {
        /// Config file location.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

impl Config {
    /// Per-user directory holding the config, history and log files.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("open-dev-env"))
    }

    /// Default location of the configuration file.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.json"))
    }

    /// Load `path` on top of the defaults.
    ///
    /// A missing file yields the defaults unchanged.
    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content, path)
    }

    fn from_json_str(content: &str, path: &Path) -> Result<Self, ConfigLoadError> {
        let shape_err = |source| ConfigLoadError::Shape {
            path: path.to_path_buf(),
            source,
        };
        let overrides: Value =
            serde_json::from_str(content).map_err(|source| ConfigLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let Value::Object(mut overrides) = overrides else {
            return Err(ConfigLoadError::NotAnObject {
                path: path.to_path_buf(),
            });
        };
        migrate_legacy_editor(&mut overrides);

        let mut merged = match serde_json::to_value(Self::default()).map_err(shape_err)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merge_one_level(&mut merged, overrides);
        serde_json::from_value(Value::Object(merged)).map_err(shape_err)
    }

    /// Resolve the configuration for this run.
    ///
    /// Uses `path` when given, otherwise the per-user location. Any load
    /// failure yields the defaults together with the error, so it can be
    /// logged once logging is up.
    #[must_use]
    pub fn resolve(path: Option<&Path>) -> (Self, Option<ConfigLoadError>) {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::path() {
                Ok(p) => p,
                Err(e) => {
                    let err = ConfigLoadError::Location {
                        reason: e.to_string(),
                    };
                    return (Self::default(), Some(err));
                }
            },
        };
        match Self::load_from(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Pretty-printed JSON document for this configuration.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write the built-in defaults to `path`, creating parent directories.
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        let mut content = Self::default().to_pretty_json()?;
        content.push('\n');
        fs_atomic::write(path, content.as_bytes())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_nested_override_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"logging": {"level": "DEBUG"}}"#);
        let config = Config::load_from(&path).unwrap();
        let defaults = Config::default();
        assert_eq!(config.logging.level, "DEBUG");
        assert_eq!(config.logging.enabled, defaults.logging.enabled);
        assert_eq!(config.logging.file, defaults.logging.file);
        assert_eq!(config.logging.max_bytes, defaults.logging.max_bytes);
        assert_eq!(config.logging.backup_count, defaults.logging.backup_count);
        assert_eq!(config.terminals, defaults.terminals);
        assert_eq!(config.behavior, defaults.behavior);
    }

    #[test]
    fn test_list_override_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"terminals": ["Kitty"]}"#);
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.terminals, vec!["Kitty".to_string()]);
        assert_eq!(config.editors, Config::default().editors);
    }

    #[test]
    fn test_legacy_editor_migrated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"editor": "Foo"}"#);
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editors, vec!["Foo".to_string()]);
    }

    #[test]
    fn test_legacy_empty_editor_migrated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"editor": ""}"#);
        let config = Config::load_from(&path).unwrap();
        assert!(config.editors.is_empty());
    }

    #[test]
    fn test_app_args_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"app_args": {"Kitty": ["--single-instance"]}}"#);
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.args_for("Kitty"), ["--single-instance".to_string()]);
        assert!(config.args_for("Warp").is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "{not json");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[1, 2]");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigLoadError::NotAnObject { .. }));
    }

    #[test]
    fn test_wrong_types_are_shape_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"terminals": 3}"#);
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Shape { .. }));
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "{not json");
        let (config, err) = Config::resolve(Some(&path));
        assert_eq!(config, Config::default());
        assert!(matches!(err, Some(ConfigLoadError::Parse { .. })));
    }

    #[test]
    fn test_resolve_reports_no_error_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, err) = Config::resolve(Some(&dir.path().join("absent.json")));
        assert_eq!(config, Config::default());
        assert!(err.is_none());
    }

    #[test]
    fn test_resolve_applies_valid_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"behavior": {"combined_dialog": true}}"#);
        let (config, err) = Config::resolve(Some(&path));
        assert!(config.behavior.combined_dialog);
        assert!(err.is_none());
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        Config::write_default(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_write_default_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        assert!(Config::write_default(&blocker.join("config.json")).is_err());
    }
}
