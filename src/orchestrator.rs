//! The open sequence: validate, select, launch, remember.

use crate::apps::AppProbe;
use crate::config::Config;
use crate::error::LaunchError;
use crate::history::HistoryStore;
use crate::opener::Launcher;
use crate::project::Project;
use crate::prompt::{report_error, Chooser};
use crate::selection::{self, EditorDecision, SelectionContext, SelectionStrategy};

/// How processing one project ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The terminal is running; the editor may or may not be.
    Opened {
        /// Terminal that was launched.
        terminal: String,
        /// Editor that was chosen, if any.
        editor: Option<String>,
        /// The chosen editor failed to start.
        editor_failed: bool,
    },
    /// The user backed out before anything was launched.
    Cancelled,
    /// Nothing was launched; the error was reported to the user.
    Failed(String),
}

/// Runs the whole open sequence for one project at a time.
pub struct Orchestrator<'a> {
    config: &'a Config,
    chooser: &'a dyn Chooser,
    launcher: &'a dyn Launcher,
    probe: &'a dyn AppProbe,
    history: &'a HistoryStore,
    strategy: Box<dyn SelectionStrategy>,
}

impl<'a> Orchestrator<'a> {
    /// Wire up the collaborators; the selection mode follows `config`.
    pub fn new(
        config: &'a Config,
        chooser: &'a dyn Chooser,
        launcher: &'a dyn Launcher,
        probe: &'a dyn AppProbe,
        history: &'a HistoryStore,
    ) -> Self {
        Self {
            config,
            chooser,
            launcher,
            probe,
            history,
            strategy: selection::strategy_for(&config.behavior),
        }
    }

    /// Open every path in order. A failure on one never stops the others.
    pub fn open_all<S: AsRef<str>>(&self, raw_paths: &[S]) -> Vec<Outcome> {
        raw_paths
            .iter()
            .map(|raw| self.open_project(raw.as_ref()))
            .collect()
    }

    /// Validate, select, launch and remember for a single project.
    ///
    /// Failures are reported through the chooser's error dialog and returned
    /// as [`Outcome::Failed`].
    pub fn open_project(&self, raw_path: &str) -> Outcome {
        match self.try_open(raw_path) {
            Ok(outcome) => outcome,
            Err(e) => {
                report_error(self.chooser, &e.to_string());
                Outcome::Failed(e.to_string())
            }
        }
    }

    fn try_open(&self, raw_path: &str) -> Result<Outcome, LaunchError> {
        let project = Project::resolve(raw_path)?;
        log::info!("opening {}", project.path().display());

        let last = self.history.last_choice(project.path());
        let ctx = SelectionContext::new(&project, self.config, self.probe, last);
        log::debug!(
            "available terminals {:?}, editors {:?}",
            ctx.terminals,
            ctx.editors
        );

        let Some(selection) = self.strategy.select(&ctx, self.chooser)? else {
            log::info!("cancelled {}", project.name());
            return Ok(Outcome::Cancelled);
        };

        self.launch(&selection.terminal, &project)?;

        let editor = match selection.editor {
            EditorDecision::Chosen(editor) => editor,
            EditorDecision::Deferred => match selection::select_editor(&ctx, self.chooser) {
                Ok(editor) => editor,
                Err(e) => {
                    // The terminal is already up; keep going without an editor.
                    report_error(self.chooser, &e.to_string());
                    None
                }
            },
        };

        let editor_failed = match &editor {
            Some(app) => match self.launch(app, &project) {
                Ok(()) => false,
                Err(e) => {
                    report_error(self.chooser, &e.to_string());
                    true
                }
            },
            None => false,
        };

        if let Err(e) = self
            .history
            .record(project.path(), &selection.terminal, editor.as_deref())
        {
            log::warn!("could not save choice history: {e}");
        }

        Ok(Outcome::Opened {
            terminal: selection.terminal,
            editor,
            editor_failed,
        })
    }

    fn launch(&self, app: &str, project: &Project) -> Result<(), LaunchError> {
        let args = self.config.args_for(app);
        self.launcher
            .launch(app, project.path(), args)
            .map_err(|e| LaunchError::LaunchFailed {
                app: app.to_string(),
                path: project.path().to_path_buf(),
                reason: format!("{e:#}"),
            })?;
        log::info!("launched {app} for {}", project.name());
        Ok(())
    }
}
