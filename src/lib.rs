//! Open a project directory in a chosen terminal and, optionally, an editor,
//! remembering the choice per project.

pub mod apps;
pub mod config;
pub mod error;
pub mod fs_atomic;
pub mod history;
pub mod logging;
pub mod opener;
pub mod orchestrator;
pub mod project;
pub mod prompt;
pub mod selection;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use orchestrator::{Orchestrator, Outcome};
pub use project::Project;
