//! Tracing subscriber setup.
//!
//! One-shot commands log to stderr. The TUI owns the terminal, so it logs to a
//! file under the user's data directory instead.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Gets the cross-platform TUI log file path.
///
/// Returns `{data_dir}/lextrek/lextrek.log`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn default_log_file() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join("lextrek").join("lextrek.log"))
}

/// Builds the filter from `RUST_LOG`, falling back to `default_level`.
fn build_filter(default_level: &str) -> Result<EnvFilter> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {filter}"))
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create log directory: {}", parent.display())
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log file cannot be opened,
/// or a subscriber is already installed.
pub fn init_logging(target: &LogTarget, default_level: &str) -> Result<()> {
    let filter = build_filter(default_level)?;

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .context("Failed to init logging")?,
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to init logging")?;
        }
    }

    Ok(())
}
