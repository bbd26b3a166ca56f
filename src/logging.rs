//! Tracing subscriber setup
//!
//! The library only emits `tracing` events. The binary decides where they go:
//! a file when `--log` is given, stderr in headless mode, and nowhere while
//! the TUI owns the terminal.

use crate::config::LOG_ENV;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Pick a target from the `--log` flag and whether the UI will run.
    pub fn select(log_file: Option<PathBuf>, headless: bool) -> Self {
        match (log_file, headless) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Off,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Filter from `KEYGRID_LOG`, defaulting to `info`.
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber for `target`.
pub fn init(target: &LogTarget) -> Result<(), LoggingError> {
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter())
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
            .map_err(|_| LoggingError::AlreadyInstalled),
        LogTarget::File(path) => {
            let file = File::create(path).map_err(|source| LoggingError::Open {
                path: path.clone(),
                source,
            })?;
            tracing_subscriber::registry()
                .with(filter())
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .map_err(|_| LoggingError::AlreadyInstalled)
        }
    }
}
