use std::path::Path;
use std::process::ExitCode;

use open_dev_env::config::Config;

/// Write the built-in defaults to `custom` (or the per-user location).
pub fn cmd_create_config(custom: Option<&Path>) -> ExitCode {
    let path = match custom {
        Some(p) => p.to_path_buf(),
        None => match Config::path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {e:#}");
                return ExitCode::FAILURE;
            }
        },
    };
    match Config::write_default(&path) {
        Ok(()) => {
            println!("Wrote default config to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
