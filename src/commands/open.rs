use anyhow::Result;
use open_dev_env::{
    apps::SystemProbe,
    config::Config,
    history::HistoryStore,
    opener::SystemLauncher,
    prompt::{Chooser, ConsoleChooser, DialogChooser},
    Orchestrator, Outcome,
};

pub fn cmd_open(config: &Config, paths: &[String], console: bool) -> Result<()> {
    let history = HistoryStore::new(
        HistoryStore::default_path()?,
        config.behavior.remember_choices,
    );
    let chooser: Box<dyn Chooser> = if cfg!(target_os = "macos") && !console {
        Box::new(DialogChooser)
    } else {
        Box::new(ConsoleChooser::stdio())
    };
    let probe = SystemProbe::new();
    let launcher = SystemLauncher;

    let orchestrator = Orchestrator::new(config, chooser.as_ref(), &launcher, &probe, &history);
    let outcomes = orchestrator.open_all(paths);

    let opened = outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::Opened { .. }))
        .count();
    log::info!("processed {} project(s), opened {opened}", outcomes.len());
    Ok(())
}
