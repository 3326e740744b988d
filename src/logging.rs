//! Leveled logging through the `log` facade.
//!
//! Records go to a size-rotated log file and, in verbose mode, are mirrored to
//! stderr. Warnings and errors always reach stderr when the file is disabled.

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::LoggingConfig;
use crate::project::expand_tilde;

/// Map a config level name onto a filter. Unknown names mean `INFO`.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => LevelFilter::Trace,
        "DEBUG" => LevelFilter::Debug,
        "WARNING" | "WARN" => LevelFilter::Warn,
        "ERROR" | "CRITICAL" => LevelFilter::Error,
        "OFF" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Append-only file that rolls over to numbered backups when it grows too big.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backup_count: u32,
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Open (or create) `path` for appending, creating parent directories.
    pub fn open(path: &Path, max_bytes: u64, backup_count: u32) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log dir {}", parent.display()))?;
        }
        let file = open_append(path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path: path.to_path_buf(),
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    fn backup_path(&self, n: u32) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> Result<()> {
        self.file.flush()?;
        if self.backup_count == 0 {
            self.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            self.written = 0;
            return Ok(());
        }
        let oldest = self.backup_path(self.backup_count);
        if oldest.exists() {
            std::fs::remove_file(&oldest)?;
        }
        for n in (1..self.backup_count).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                std::fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        std::fs::rename(&self.path, self.backup_path(1))?;
        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }

    /// Append `line`, rotating first if it would push the file past the limit.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let len = line.len() as u64 + 1;
        if self.max_bytes > 0 && self.written > 0 && self.written + len > self.max_bytes {
            self.rotate()?;
        }
        writeln!(self.file, "{line}")?;
        self.written += len;
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// `log::Log` implementation behind [`init`].
pub struct Logger {
    level: LevelFilter,
    file: Option<Mutex<RotatingFile>>,
    mirror_to_stderr: bool,
}

impl Logger {
    /// Whether a warning logged through this logger also shows up on stderr.
    #[must_use]
    pub fn echoes_warnings(&self) -> bool {
        log::Level::Warn <= self.level && (self.mirror_to_stderr || self.file.is_none())
    }

    fn format(record: &Record<'_>) -> String {
        format!(
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        if let Some(file) = &self.file {
            // A failing log file must never take the launch down with it.
            let _ = file.lock().write_line(&line);
        }
        let is_problem = record.level() <= log::Level::Warn;
        if self.mirror_to_stderr || (self.file.is_none() && is_problem) {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().file.flush();
        }
    }
}

/// Build the logger for `config`.
///
/// `verbose` forces `DEBUG` and mirrors to stderr; `disable_file` skips the
/// log file. A log file that cannot be opened degrades to stderr only.
#[must_use]
pub fn build(config: &LoggingConfig, verbose: bool, disable_file: bool) -> Logger {
    let configured = parse_level(&config.level);
    let file = if config.enabled && !disable_file {
        let path = expand_tilde(&config.file);
        match RotatingFile::open(&path, config.max_bytes, config.backup_count) {
            Ok(file) => Some(Mutex::new(file)),
            Err(e) => {
                eprintln!("Warning: {e:#}; logging to stderr only");
                None
            }
        }
    } else {
        None
    };
    let level = if verbose {
        LevelFilter::Debug.max(configured)
    } else if file.is_none() {
        configured.min(LevelFilter::Warn)
    } else {
        configured
    };
    Logger {
        level,
        file,
        mirror_to_stderr: verbose,
    }
}

/// Install the process-wide logger. Only the first call has any effect.
///
/// Returns [`Logger::echoes_warnings`] for the installed logger.
pub fn init(config: &LoggingConfig, verbose: bool, disable_file: bool) -> bool {
    let logger = build(config, verbose, disable_file);
    let level = logger.level;
    let echoes = logger.echoes_warnings();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
        echoes
    } else {
        false
    }
}
