use std::path::{Path, PathBuf};

use super::AppProbe;
use crate::opener::augmented_path;

/// Looks for applications as macOS bundles and as executables on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    bundle_dirs: Vec<PathBuf>,
    search_path: String,
}

impl SystemProbe {
    /// Probe the standard bundle directories and the augmented `PATH`.
    #[must_use]
    pub fn new() -> Self {
        let mut bundle_dirs = vec![
            PathBuf::from("/Applications"),
            PathBuf::from("/System/Applications"),
        ];
        if let Some(home) = dirs::home_dir() {
            bundle_dirs.push(home.join("Applications"));
        }
        Self {
            bundle_dirs,
            search_path: augmented_path(),
        }
    }

    /// Probe only the given bundle directories and search path.
    #[must_use]
    pub const fn with_locations(bundle_dirs: Vec<PathBuf>, search_path: String) -> Self {
        Self {
            bundle_dirs,
            search_path,
        }
    }

    fn bundle_exists(&self, name: &str) -> bool {
        let bundle = format!("{name}.app");
        self.bundle_dirs
            .iter()
            .any(|dir| dir.join(&bundle).exists())
    }

    fn on_path(&self, binary: &str) -> bool {
        which::which_in(binary, Some(&self.search_path), Path::new(".")).is_ok()
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl AppProbe for SystemProbe {
    fn exists(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let found = self.bundle_exists(name)
            || self.on_path(name)
            || self.on_path(&name.to_ascii_lowercase());
        log::debug!("probe {name}: {}", if found { "installed" } else { "missing" });
        found
    }
}
