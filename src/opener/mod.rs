//! Starting applications against a project directory.

mod shell;

pub use shell::augmented_path;

use anyhow::Result;
use std::ffi::OsString;
use std::path::Path;

/// Starts an application against a project directory.
pub trait Launcher {
    /// Launch `app` on `path`, passing `args` through to the application.
    fn launch(&self, app: &str, path: &Path, args: &[String]) -> Result<()>;
}

/// Launches applications through the operating system.
///
/// On macOS this is `open -a <App> <path> [--args …]`, which resolves bundle
/// names the same way Finder does. Elsewhere, as a development fallback only,
/// the lower-cased application name is spawned as a program with the extra
/// arguments followed by the path.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, app: &str, path: &Path, args: &[String]) -> Result<()> {
        log::debug!("launching {app} on {} with {args:?}", path.display());
        platform_launch(app, path, args)
    }
}

#[cfg(target_os = "macos")]
fn platform_launch(app: &str, path: &Path, args: &[String]) -> Result<()> {
    shell::run_to_completion("open", &open_args(app, path, args))
}

#[cfg(not(target_os = "macos"))]
fn platform_launch(app: &str, path: &Path, args: &[String]) -> Result<()> {
    let (program, argv) = direct_argv(app, path, args);
    shell::spawn_detached(&program, &argv)
}

/// Arguments for macOS `open`.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn open_args(app: &str, path: &Path, args: &[String]) -> Vec<OsString> {
    let mut argv: Vec<OsString> = vec!["-a".into(), app.into(), path.into()];
    if !args.is_empty() {
        argv.push("--args".into());
        argv.extend(args.iter().map(OsString::from));
    }
    argv
}

/// Program and arguments for spawning the application directly.
///
/// Development fallback for running the tool off macOS; other platforms are
/// not supported targets and get no per-desktop launch handling.
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn direct_argv(app: &str, path: &Path, args: &[String]) -> (String, Vec<OsString>) {
    let mut argv: Vec<OsString> = args.iter().map(OsString::from).collect();
    argv.push(path.into());
    (app.to_ascii_lowercase(), argv)
}
