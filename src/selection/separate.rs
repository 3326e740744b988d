use super::{ask_terminal, EditorDecision, Selection, SelectionContext, SelectionStrategy};
use crate::error::LaunchError;
use crate::prompt::Chooser;

/// Terminal now, editor after the terminal has launched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparateStrategy;

impl SelectionStrategy for SeparateStrategy {
    fn select(
        &self,
        ctx: &SelectionContext<'_>,
        chooser: &dyn Chooser,
    ) -> Result<Option<Selection>, LaunchError> {
        Ok(ask_terminal(ctx, chooser)?.map(|terminal| Selection {
            terminal,
            editor: EditorDecision::Deferred,
        }))
    }
}
