//! Scripted collaborators for unit tests.

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::opener::Launcher;
use crate::prompt::Chooser;

#[derive(Debug, Clone)]
pub enum Reply {
    Choose(Option<String>),
    Confirm(bool),
    Fail,
}

impl Reply {
    pub fn pick(name: &str) -> Self {
        Self::Choose(Some(name.to_string()))
    }

    pub const fn cancel() -> Self {
        Self::Choose(None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asked {
    Choose {
        prompt: String,
        options: Vec<String>,
        default: String,
    },
    Confirm {
        prompt: String,
        default_yes: bool,
    },
    Error(String),
}

#[derive(Debug, Default)]
pub struct FakeChooser {
    replies: RefCell<VecDeque<Reply>>,
    asked: RefCell<Vec<Asked>>,
    fail_errors: bool,
}

impl FakeChooser {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            ..Self::default()
        }
    }

    /// A chooser whose error dialog itself fails.
    pub fn with_broken_error_dialog() -> Self {
        Self {
            fail_errors: true,
            ..Self::default()
        }
    }

    pub fn asked(&self) -> Vec<Asked> {
        self.asked.borrow().clone()
    }

    pub fn questions(&self) -> usize {
        self.asked
            .borrow()
            .iter()
            .filter(|a| !matches!(a, Asked::Error(_)))
            .count()
    }

    pub fn errors(&self) -> Vec<String> {
        self.asked
            .borrow()
            .iter()
            .filter_map(|a| match a {
                Asked::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    fn next(&self) -> Reply {
        self.replies
            .borrow_mut()
            .pop_front()
            .expect("chooser asked more questions than scripted")
    }
}

impl Chooser for FakeChooser {
    fn choose(&self, prompt: &str, options: &[String], default: &str) -> Result<Option<String>> {
        self.asked.borrow_mut().push(Asked::Choose {
            prompt: prompt.to_string(),
            options: options.to_vec(),
            default: default.to_string(),
        });
        match self.next() {
            Reply::Choose(v) => Ok(v),
            Reply::Fail => Err(anyhow!("dialog broke")),
            Reply::Confirm(_) => panic!("expected a confirm, got a choose"),
        }
    }

    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<bool> {
        self.asked.borrow_mut().push(Asked::Confirm {
            prompt: prompt.to_string(),
            default_yes,
        });
        match self.next() {
            Reply::Confirm(v) => Ok(v),
            Reply::Fail => Err(anyhow!("dialog broke")),
            Reply::Choose(_) => panic!("expected a choose, got a confirm"),
        }
    }

    fn show_error(&self, message: &str) -> Result<()> {
        self.asked
            .borrow_mut()
            .push(Asked::Error(message.to_string()));
        if self.fail_errors {
            return Err(anyhow!("error dialog broke"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub app: String,
    pub path: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FakeLauncher {
    failing: Vec<String>,
    launched: RefCell<Vec<Launch>>,
}

impl FakeLauncher {
    pub fn failing(apps: &[&str]) -> Self {
        Self {
            failing: apps.iter().map(|a| (*a).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn launched(&self) -> Vec<Launch> {
        self.launched.borrow().clone()
    }

    pub fn apps(&self) -> Vec<String> {
        self.launched.borrow().iter().map(|l| l.app.clone()).collect()
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, app: &str, path: &Path, args: &[String]) -> Result<()> {
        self.launched.borrow_mut().push(Launch {
            app: app.to_string(),
            path: path.to_path_buf(),
            args: args.to_vec(),
        });
        if self.failing.iter().any(|f| f == app) {
            return Err(anyhow!("{app} is broken"));
        }
        Ok(())
    }
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Probe that reports exactly `installed` as present.
pub fn installed(list: &[&str]) -> impl Fn(&str) -> bool {
    let installed = names(list);
    move |name: &str| installed.iter().any(|i| i == name)
}
