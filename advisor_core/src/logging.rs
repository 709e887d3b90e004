//! Logging Module
//!
//! `tracing` setup shared by the advisor binaries:
//! - daily-rolling log file under a configurable directory
//! - human-readable stderr output
//! - `RUST_LOG` override, otherwise `<program>=<level>,advisor_core=<level>`
//! - pruning of old log files
//!
//! The library itself never installs a subscriber; binaries call
//! [`init_logging`] once at startup.
//!
//! ```no_run
//! use advisor_core::logging::{init_logging, LogConfig};
//! use tracing::Level;
//!
//! init_logging("fps_advisor", LogConfig::new().with_level(Level::DEBUG)).expect("logging");
//! tracing::info!(game = "Starfield", "Prediction requested");
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Defaults to the system temp directory.
    pub log_dir: PathBuf,
    /// Newest log files kept after pruning.
    pub max_files: usize,
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: std::env::temp_dir(),
            max_files: 5,
            level: Level::INFO,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.log_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_max_files(mut self, count: usize) -> Self {
        self.max_files = count;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

/// Install the global subscriber. Call once per process.
///
/// Log file name: `{program_name}.log.<date>`.
pub fn init_logging(program_name: &str, config: LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", config.log_dir))?;

    let log_file_name = format!("{}.log", program_name);
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, &log_file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{program}={level},advisor_core={level}",
            program = program_name,
            level = config.level
        ))
    });

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(
        program = program_name,
        log_dir = ?config.log_dir,
        log_file = log_file_name,
        max_files = config.max_files,
        level = ?config.level,
        "Logging system initialized"
    );

    cleanup_old_logs(&config.log_dir, program_name, config.max_files)?;

    Ok(())
}

/// Parse a level name from configuration ("warn", "DEBUG", ...).
pub fn parse_level(name: &str) -> Option<Level> {
    name.trim().parse().ok()
}

/// Keep the newest `max_files` logs of `program_name`, delete the rest.
fn cleanup_old_logs(log_dir: &Path, program_name: &str, max_files: usize) -> Result<()> {
    use std::fs;

    let entries =
        fs::read_dir(log_dir).with_context(|| format!("Failed to read log directory: {:?}", log_dir))?;

    let prefix = format!("{}.log", program_name);
    let mut log_files: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();

    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with(&prefix))
            .unwrap_or(false);
        if !matches {
            continue;
        }
        if let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) {
            log_files.push((path, modified));
        }
    }

    if log_files.len() > max_files {
        log_files.sort_by(|a, b| b.1.cmp(&a.1));

        for (path, _) in log_files.iter().skip(max_files) {
            if let Err(e) = fs::remove_file(path) {
                tracing::warn!(path = ?path, error = %e, "Failed to remove old log file");
            } else {
                tracing::debug!(path = ?path, "Removed old log file");
            }
        }
    }

    Ok(())
}

/// Record the outcome of one CLI command.
pub fn log_command_end(command: &str, duration: Duration, success: bool) {
    if success {
        tracing::info!(
            command = command,
            duration_ms = duration.as_secs_f64() * 1000.0,
            "Command completed"
        );
    } else {
        tracing::error!(
            command = command,
            duration_ms = duration.as_secs_f64() * 1000.0,
            "Command failed"
        );
    }
}
