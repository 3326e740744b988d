//! Interactive choice and error reporting collaborators.

mod console;
mod dialog;

pub use console::ConsoleChooser;
pub use dialog::DialogChooser;

use anyhow::Result;

/// Presents choices to the user and reports errors.
///
/// Every call blocks until the user answers.
pub trait Chooser {
    /// Pick one of `options`, with `default` preselected. `None` means cancelled.
    fn choose(&self, prompt: &str, options: &[String], default: &str) -> Result<Option<String>>;

    /// Yes/no question. Cancelling counts as "no".
    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<bool>;

    /// Tell the user something went wrong.
    fn show_error(&self, message: &str) -> Result<()>;
}

/// Show `message` through `chooser`, falling back to stderr if that fails.
pub fn report_error(chooser: &dyn Chooser, message: &str) {
    log::error!("{message}");
    if let Err(e) = chooser.show_error(message) {
        log::warn!("error dialog failed: {e:#}");
        eprintln!("Error: {message}");
    }
}
