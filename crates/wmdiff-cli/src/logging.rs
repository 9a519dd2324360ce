//! Process-wide tracing subscriber

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `debug` when verbose, `info` otherwise
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Log file name for a run started at `started`
#[must_use]
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("wmdiff_{}.log", started.format("%Y%m%d_%H%M%S"))
}

/// Install the global subscriber: console output plus an optional log file
///
/// Returns the path of the log file when `log_dir` is given.
///
/// # Errors
/// Returns an error if the log file cannot be created or a global
/// subscriber is already installed.
pub fn setup_logging(verbose: bool, log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let mut log_path = None;
    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let path = dir.join(log_file_name(Local::now()));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            log_path = Some(path);
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(file_layer)
        .with(env_filter(verbose))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(path) = &log_path {
        tracing::info!("Logging to {}", path.display());
    }
    Ok(log_path)
}
