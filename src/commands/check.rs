use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

use open_dev_env::{
    apps::{self, AppProbe, SystemProbe},
    config::Config,
    history::HistoryStore,
};

/// Print what a real run would use, without launching anything.
pub fn cmd_check(config: &Config, custom: Option<&Path>) -> Result<()> {
    let config_path = match custom {
        Some(p) => p.to_path_buf(),
        None => Config::path()?,
    };
    let history_path = HistoryStore::default_path()?;
    let report = render_report(config, &config_path, &history_path, &SystemProbe::new())?;
    print!("{report}");
    Ok(())
}

fn render_report(
    config: &Config,
    config_path: &Path,
    history_path: &Path,
    probe: &dyn AppProbe,
) -> Result<String> {
    let mut out = String::new();
    let status = if config_path.exists() {
        "found"
    } else {
        "not found, using defaults"
    };
    writeln!(out, "Config file:  {} ({status})", config_path.display())?;
    let remembering = if config.behavior.remember_choices {
        "on"
    } else {
        "off"
    };
    writeln!(
        out,
        "History file: {} (remember choices: {remembering})",
        history_path.display()
    )?;
    let mode = if config.behavior.combined_dialog {
        "combined"
    } else {
        "separate"
    };
    writeln!(out, "Dialog mode:  {mode}")?;
    writeln!(out, "\nResolved configuration:\n{}", config.to_pretty_json()?)?;

    for (label, candidates) in [("Terminals", &config.terminals), ("Editors", &config.editors)] {
        let installed = apps::available(candidates, probe);
        writeln!(out, "\n{label}:")?;
        if candidates.is_empty() {
            writeln!(out, "  (none configured)")?;
        }
        for name in candidates {
            let mark = if installed.contains(name) { "ok     " } else { "missing" };
            writeln!(out, "  [{mark}] {name}")?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_marks_missing_apps() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let probe = |name: &str| name == "Kitty" || name == "VSCodium";
        let report = render_report(
            &config,
            &dir.path().join("config.json"),
            &dir.path().join("history.json"),
            &probe,
        )
        .unwrap();

        assert!(report.contains("(not found, using defaults)"));
        assert!(report.contains("remember choices: on"));
        assert!(report.contains("Dialog mode:  separate"));
        assert!(report.contains("  [missing] Ghostty\n"));
        assert!(report.contains("  [ok     ] Kitty\n"));
        assert!(report.contains("  [ok     ] VSCodium\n"));
        assert!(report.contains("\"combined_dialog\": false"));
    }

    #[test]
    fn test_report_with_no_editors() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            editors: Vec::new(),
            ..Config::default()
        };
        let probe = |_: &str| true;
        let report = render_report(
            &config,
            &dir.path().join("config.json"),
            &dir.path().join("history.json"),
            &probe,
        )
        .unwrap();
        assert!(report.contains("Editors:\n  (none configured)\n"));
    }
}
