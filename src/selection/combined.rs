use super::{
    ask_editor_picker, ask_terminal, EditorDecision, Selection, SelectionContext,
    SelectionStrategy,
};
use crate::error::LaunchError;
use crate::prompt::Chooser;

/// Terminal and editor asked back to back; cancelling either abandons both.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedStrategy;

impl SelectionStrategy for CombinedStrategy {
    fn select(
        &self,
        ctx: &SelectionContext<'_>,
        chooser: &dyn Chooser,
    ) -> Result<Option<Selection>, LaunchError> {
        let Some(terminal) = ask_terminal(ctx, chooser)? else {
            return Ok(None);
        };
        let editor = if ctx.wants_editor_prompt() {
            match ask_editor_picker(ctx, chooser)? {
                Some(editor) => editor,
                None => return Ok(None),
            }
        } else {
            None
        };
        Ok(Some(Selection {
            terminal,
            editor: EditorDecision::Chosen(editor),
        }))
    }
}
