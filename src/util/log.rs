// src/util/log.rs

//! File-based logging for the TUI.
//!
//! stdout belongs to the terminal UI, so `tracing` output goes to
//! `<log_dir>/student-portal.log`, truncated on every start.
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use chrono::Local;
use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::error::{PortalError, Result};

pub const LOG_FILE: &str = "student-portal.log";

/// Local wall-clock timestamps, `2024-05-01 13:37:00.123`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Maps a config string to a level; anything unrecognized means INFO.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// Creates the log directory and file; returns the file path.
pub fn open_log_file(log_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE);
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Installs the global subscriber. Call once, before the terminal is taken over.
pub fn init(log_dir: &Path, level: &str) -> Result<PathBuf> {
    let (path, file) = open_log_file(log_dir)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(LocalTimer)
        .with_target(false)
        .with_max_level(parse_level(level))
        .try_init()
        .map_err(|e| PortalError::ConfigError(format!("logger already initialized: {}", e)))?;

    Ok(path)
}
