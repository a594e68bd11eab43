//! File logging
//!
//! The terminal belongs to ratatui, so tracing output goes to
//! `~/.config/gradebook-tui/gradebook-tui.log`. The filter comes from
//! `GRADEBOOK_LOG` (defaults to `info`).

use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GRADEBOOK_LOG";

pub fn init() -> Result<()> {
    let path = Config::app_dir()?.join("gradebook-tui.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("failed to set tracing subscriber: {e}"))?;

    Ok(())
}
