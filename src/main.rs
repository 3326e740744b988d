//! `open-dev-env` command-line entry point.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use open_dev_env::{config::Config, logging};

#[derive(Parser)]
#[command(
    name = "open-dev-env",
    version,
    about = "Open project directories in a terminal and editor of your choice"
)]
struct Cli {
    /// Project directories to open
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// Log debug output and mirror it to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the resolved configuration and installed apps without launching anything
    #[arg(short, long)]
    test: bool,

    /// Do not write a log file
    #[arg(long)]
    no_log: bool,

    /// Use this configuration file instead of the per-user one
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the default configuration file and exit
    #[arg(long)]
    create_config: bool,

    /// Ask in the terminal instead of showing native dialogs
    #[arg(long)]
    console: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.create_config {
        return Ok(commands::config::cmd_create_config(cli.config.as_deref()));
    }

    let (config, load_error) = Config::resolve(cli.config.as_deref());
    let echoed = logging::init(&config.logging, cli.verbose, cli.no_log);
    if let Some(e) = load_error {
        log::warn!("{e}; using default configuration");
        if !echoed {
            eprintln!("Warning: {e}; using default configuration");
        }
    }

    let result = run(&cli, &config);
    if let Err(e) = &result {
        log::error!("unexpected failure: {e:#}");
    }
    result
}

fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    if cli.test {
        commands::check::cmd_check(config, cli.config.as_deref())?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.paths.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::FAILURE);
    }

    commands::open::cmd_open(config, &cli.paths, cli.console)?;
    Ok(ExitCode::SUCCESS)
}
