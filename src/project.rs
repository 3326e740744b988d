//! Project directory validation.

use std::path::{Path, PathBuf};

use crate::error::LaunchError;

/// A validated project directory.
///
/// Only constructed through [`Project::resolve`], so the path is always
/// absolute, symlink-free and an existing directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    path: PathBuf,
    name: String,
}

impl Project {
    /// Expand `~`, make absolute, follow symlinks and check for a directory.
    pub fn resolve(raw: &str) -> Result<Self, LaunchError> {
        let invalid = |reason: String| LaunchError::InvalidPath {
            path: raw.to_string(),
            reason,
        };
        if raw.trim().is_empty() {
            return Err(invalid("empty path".to_string()));
        }
        let expanded = expand_tilde(raw);
        let resolved = std::fs::canonicalize(&expanded).map_err(|e| invalid(e.to_string()))?;
        if !resolved.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }
        let name = resolved
            .file_name()
            .map_or_else(|| resolved.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            path: resolved,
            name,
        })
    }

    /// Absolute, canonical directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, used in prompts.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Replace a leading `~` or `~/` with the home directory.
pub fn expand_tilde(raw: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (raw, home) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("my-app");
        std::fs::create_dir(&project_dir).unwrap();

        let project = Project::resolve(project_dir.to_str().unwrap()).unwrap();
        assert!(project.path().is_absolute());
        assert_eq!(project.name(), "my-app");
        assert_eq!(project.path(), std::fs::canonicalize(&project_dir).unwrap());
    }

    #[test]
    fn test_dot_segments_are_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("a");
        std::fs::create_dir(&project_dir).unwrap();
        let raw = format!("{}/a/../a/.", dir.path().display());
        let project = Project::resolve(&raw).unwrap();
        assert_eq!(project.name(), "a");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_followed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real");
        std::fs::create_dir(&target).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let project = Project::resolve(link.to_str().unwrap()).unwrap();
        assert_eq!(project.name(), "real");
        assert_eq!(project.path(), std::fs::canonicalize(&target).unwrap());
    }

    #[test]
    fn test_missing_path_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = Project::resolve(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidPath { .. }));
    }

    #[test]
    fn test_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = Project::resolve(file.to_str().unwrap()).unwrap_err();
        assert!(
            matches!(err, LaunchError::InvalidPath { ref reason, .. } if reason == "not a directory")
        );
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(Project::resolve("  ").is_err());
    }

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else { return };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/code"), home.join("code"));
        assert_eq!(expand_tilde("/abs/~x"), PathBuf::from("/abs/~x"));
        assert_eq!(expand_tilde("~other"), PathBuf::from("~other"));
    }
}
