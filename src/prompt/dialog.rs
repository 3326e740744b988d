use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

use super::Chooser;

const CANCEL_MARKER: &str = "__OPEN_DEV_ENV_CANCEL__";
const TITLE: &str = "open-dev-env";

/// Native macOS dialogs driven through `osascript`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogChooser;

/// Quote `s` as an AppleScript string literal.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn choose_script(prompt: &str, options: &[String], default: &str) -> String {
    let list = options
        .iter()
        .map(|o| quote(o))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "set appList to {{{list}}}\n\
         set choice to choose from list appList with title {title} with prompt {prompt} default items {{{default}}}\n\
         if choice is false then\n\
         \treturn \"{CANCEL_MARKER}\"\n\
         end if\n\
         return item 1 of choice",
        title = quote(TITLE),
        prompt = quote(prompt),
        default = quote(default),
    )
}

fn confirm_script(prompt: &str, default_yes: bool) -> String {
    let default_button = if default_yes { "Yes" } else { "No" };
    format!(
        "display dialog {prompt} with title {title} buttons {{\"No\", \"Yes\"}} default button \"{default_button}\" with icon note\n\
         return button returned of result",
        prompt = quote(prompt),
        title = quote(TITLE),
    )
}

fn error_script(message: &str) -> String {
    format!(
        "display dialog {message} with title {title} buttons {{\"OK\"}} default button \"OK\" with icon stop",
        message = quote(message),
        title = quote(TITLE),
    )
}

/// Run `script` and return its trimmed stdout. `None` when the user cancelled.
fn run_osascript(script: &str) -> Result<Option<String>> {
    let output = Command::new("osascript")
        .args(["-e", script])
        .stdin(Stdio::null())
        .output()
        .context("Failed to run osascript")?;
    if output.status.success() {
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        return Ok((text != CANCEL_MARKER).then_some(text));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    // -128 is AppleScript's "User canceled."
    if stderr.contains("-128") {
        return Ok(None);
    }
    bail!("osascript failed: {}", stderr.trim())
}

impl Chooser for DialogChooser {
    fn choose(&self, prompt: &str, options: &[String], default: &str) -> Result<Option<String>> {
        if options.is_empty() {
            return Ok(None);
        }
        run_osascript(&choose_script(prompt, options, default))
    }

    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<bool> {
        Ok(run_osascript(&confirm_script(prompt, default_yes))?.as_deref() == Some("Yes"))
    }

    fn show_error(&self, message: &str) -> Result<()> {
        run_osascript(&error_script(message)).map(|_| ())
    }
}
