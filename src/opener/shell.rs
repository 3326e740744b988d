use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::process::{Command, Stdio};

/// `PATH` with the usual Homebrew and `/usr/local` prefixes prepended, since
/// apps started from Finder or Automator get a minimal environment.
pub fn augmented_path() -> String {
    let current = std::env::var("PATH").unwrap_or_default();
    let extras = ["/usr/local/bin", "/opt/homebrew/bin", "/opt/homebrew/sbin"];
    let mut parts: Vec<&str> = extras.to_vec();
    for p in current.split(':').filter(|s| !s.is_empty()) {
        if !parts.contains(&p) {
            parts.push(p);
        }
    }
    parts.join(":")
}

/// Run `program` to completion and fail unless it exits successfully.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(super) fn run_to_completion(program: &str, args: &[OsString]) -> Result<()> {
    let output = Command::new(program)
        .args(args)
        .env("PATH", augmented_path())
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {program}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{program} exited with status {:?}: {}",
            output.status.code(),
            stderr.trim()
        );
    }
    Ok(())
}

/// Start `program` detached from our stdio and return immediately.
#[cfg_attr(target_os = "macos", allow(dead_code))]
pub(super) fn spawn_detached(program: &str, args: &[OsString]) -> Result<()> {
    Command::new(program)
        .args(args)
        .env("PATH", augmented_path())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to spawn {program}"))?;
    Ok(())
}
