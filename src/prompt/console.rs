use anyhow::Result;
use std::cell::RefCell;
use std::io::{BufRead, BufReader, Write};

use super::Chooser;

/// Numbered menus on stderr, answers read line by line.
pub struct ConsoleChooser {
    input: RefCell<Box<dyn BufRead>>,
    output: RefCell<Box<dyn Write>>,
}

#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Picked(usize),
    Cancel,
    Invalid,
}

impl ConsoleChooser {
    /// Read from stdin, write to stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stderr())
    }

    /// Read answers from `input` and write menus to `output`.
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: RefCell::new(Box::new(input)),
            output: RefCell::new(Box::new(output)),
        }
    }

    /// `None` at end of input.
    fn read_answer(&self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.borrow_mut().read_line(&mut line)?;
        Ok((read > 0).then(|| line.trim().to_string()))
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self.output.borrow_mut();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn render_menu(prompt: &str, options: &[String], default_idx: usize) -> String {
    use std::fmt::Write as _;

    let mut menu = format!("\n{prompt}\n");
    for (i, name) in options.iter().enumerate() {
        let _ = writeln!(menu, "  {}. {name}", i + 1);
    }
    menu.push_str("  0. Cancel\n");
    let _ = write!(menu, "Choice [{}]: ", default_idx + 1);
    menu
}

fn parse_answer(answer: &str, options: &[String], default_idx: usize) -> Answer {
    if answer.is_empty() {
        return Answer::Picked(default_idx);
    }
    if answer == "0" || answer.eq_ignore_ascii_case("q") {
        return Answer::Cancel;
    }
    if let Ok(n) = answer.parse::<usize>() {
        return if (1..=options.len()).contains(&n) {
            Answer::Picked(n - 1)
        } else {
            Answer::Invalid
        };
    }
    options
        .iter()
        .position(|o| o.eq_ignore_ascii_case(answer))
        .map_or(Answer::Invalid, Answer::Picked)
}

fn parse_confirm(answer: &str, default_yes: bool) -> bool {
    match answer.to_ascii_lowercase().as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        _ => false,
    }
}

impl Chooser for ConsoleChooser {
    fn choose(&self, prompt: &str, options: &[String], default: &str) -> Result<Option<String>> {
        if options.is_empty() {
            return Ok(None);
        }
        let default_idx = options.iter().position(|o| o == default).unwrap_or(0);
        self.write(&render_menu(prompt, options, default_idx))?;

        let Some(answer) = self.read_answer()? else {
            return Ok(None);
        };
        match parse_answer(&answer, options, default_idx) {
            Answer::Picked(i) => Ok(Some(options[i].clone())),
            Answer::Cancel => Ok(None),
            Answer::Invalid => {
                self.write("Invalid choice, cancelling.\n")?;
                Ok(None)
            }
        }
    }

    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        self.write(&format!("\n{prompt} {hint}: "))?;
        Ok(self
            .read_answer()?
            .is_some_and(|answer| parse_confirm(&answer, default_yes)))
    }

    fn show_error(&self, message: &str) -> Result<()> {
        self.write(&format!("Error: {message}\n"))
    }
}
