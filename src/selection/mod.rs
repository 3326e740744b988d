//! Deciding which terminal and editor to open a project with.
//!
//! Two interaction modes share the same defaulting rules:
//! [`SeparateStrategy`] asks for the terminal first and leaves the editor
//! question until the terminal is running, while [`CombinedStrategy`] asks
//! both questions up front as one step.

mod combined;
mod separate;

pub use combined::CombinedStrategy;
pub use separate::SeparateStrategy;

use crate::apps::{self, AppProbe};
use crate::config::{BehaviorConfig, Config};
use crate::error::LaunchError;
use crate::history::LastChoice;
use crate::project::Project;
use crate::prompt::Chooser;

/// Picker entry meaning "don't open an editor".
pub const NO_EDITOR: &str = "none";

/// Everything a strategy needs to decide for one project.
#[derive(Debug, Clone)]
pub struct SelectionContext<'a> {
    /// The project being opened.
    pub project: &'a Project,
    /// Configured terminal candidates, before filtering.
    pub configured_terminals: &'a [String],
    /// Installed terminals in configured order.
    pub terminals: Vec<String>,
    /// Installed editors in configured order.
    pub editors: Vec<String>,
    /// What was used for this project last time.
    pub last: LastChoice,
    /// Interaction settings.
    pub behavior: BehaviorConfig,
}

impl<'a> SelectionContext<'a> {
    /// Snapshot availability for `project` under `config`.
    pub fn new(
        project: &'a Project,
        config: &'a Config,
        probe: &dyn AppProbe,
        last: LastChoice,
    ) -> Self {
        Self {
            project,
            configured_terminals: &config.terminals,
            terminals: apps::available(&config.terminals, probe),
            editors: apps::available(&config.editors, probe),
            last,
            behavior: config.behavior,
        }
    }

    /// Terminal to preselect: last used if still installed, else the first installed.
    #[must_use]
    pub fn default_terminal(&self) -> Option<&str> {
        self.last
            .terminal
            .as_deref()
            .filter(|t| self.terminals.iter().any(|a| a == t))
            .or_else(|| self.terminals.first().map(String::as_str))
    }

    /// Editor picker entry to preselect.
    ///
    /// The last used editor if still installed; [`NO_EDITOR`] when the user
    /// explicitly went without one last time; otherwise the first installed.
    #[must_use]
    pub fn default_editor_option(&self) -> &str {
        if let Some(last) = self
            .last
            .editor
            .as_deref()
            .filter(|e| self.editors.iter().any(|a| a == e))
        {
            return last;
        }
        if self.last.declined_editor() {
            return NO_EDITOR;
        }
        self.editors.first().map_or(NO_EDITOR, String::as_str)
    }

    /// Whether any editor question should be asked at all.
    #[must_use]
    pub fn wants_editor_prompt(&self) -> bool {
        self.behavior.auto_open_editor && !self.editors.is_empty()
    }

    /// `none` followed by the installed editors.
    #[must_use]
    pub fn editor_options(&self) -> Vec<String> {
        std::iter::once(NO_EDITOR.to_string())
            .chain(self.editors.iter().cloned())
            .collect()
    }
}

/// How the editor question was handled by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorDecision {
    /// Ask after the terminal has been launched.
    Deferred,
    /// Already decided; `None` means no editor.
    Chosen(Option<String>),
}

/// Outcome of a completed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Terminal to launch.
    pub terminal: String,
    /// Editor decision.
    pub editor: EditorDecision,
}

/// One interaction mode for picking a terminal and editor.
pub trait SelectionStrategy {
    /// `Ok(None)` when the user cancelled.
    fn select(
        &self,
        ctx: &SelectionContext<'_>,
        chooser: &dyn Chooser,
    ) -> Result<Option<Selection>, LaunchError>;
}

/// Strategy matching `behavior.combined_dialog`.
#[must_use]
pub fn strategy_for(behavior: &BehaviorConfig) -> Box<dyn SelectionStrategy> {
    if behavior.combined_dialog {
        Box::new(CombinedStrategy)
    } else {
        Box::new(SeparateStrategy)
    }
}

fn prompt_failed(e: &anyhow::Error) -> LaunchError {
    LaunchError::PromptFailed(format!("{e:#}"))
}

/// Accept `picked` only if it is one of `options`.
fn validated(picked: Option<String>, options: &[String]) -> Option<String> {
    let picked = picked?;
    if options.contains(&picked) {
        Some(picked)
    } else {
        log::warn!("ignoring unexpected selection {picked:?}");
        None
    }
}

/// Ask for the terminal. `Ok(None)` when cancelled.
pub(crate) fn ask_terminal(
    ctx: &SelectionContext<'_>,
    chooser: &dyn Chooser,
) -> Result<Option<String>, LaunchError> {
    let Some(default) = ctx.default_terminal() else {
        return Err(LaunchError::NoTerminalsAvailable {
            configured: ctx.configured_terminals.to_vec(),
        });
    };
    let prompt = format!("Open '{}' in which terminal?", ctx.project.name());
    let picked = chooser
        .choose(&prompt, &ctx.terminals, default)
        .map_err(|e| prompt_failed(&e))?;
    Ok(validated(picked, &ctx.terminals))
}

/// Ask the editor picker question with a `none` entry.
///
/// The outer `Option` is `None` when cancelled; the inner one is `None` for "no editor".
fn ask_editor_picker(
    ctx: &SelectionContext<'_>,
    chooser: &dyn Chooser,
) -> Result<Option<Option<String>>, LaunchError> {
    let options = ctx.editor_options();
    let prompt = format!("Open '{}' in which editor?", ctx.project.name());
    let picked = chooser
        .choose(&prompt, &options, ctx.default_editor_option())
        .map_err(|e| prompt_failed(&e))?;
    Ok(validated(picked, &options).map(|p| (p != NO_EDITOR).then_some(p)))
}

/// Editor step run after the terminal is up. `Ok(None)` means no editor.
///
/// Skipped silently when editors are turned off or none is installed. A
/// single installed editor gets a yes/no question, several get a picker.
pub fn select_editor(
    ctx: &SelectionContext<'_>,
    chooser: &dyn Chooser,
) -> Result<Option<String>, LaunchError> {
    if !ctx.wants_editor_prompt() {
        log::debug!("no editor prompt for {}", ctx.project.name());
        return Ok(None);
    }
    if let [only] = ctx.editors.as_slice() {
        let prompt = format!("Open '{}' in {only} too?", ctx.project.name());
        let open = chooser
            .confirm(&prompt, !ctx.last.declined_editor())
            .map_err(|e| prompt_failed(&e))?;
        return Ok(open.then(|| only.clone()));
    }
    Ok(ask_editor_picker(ctx, chooser)?.flatten())
}
