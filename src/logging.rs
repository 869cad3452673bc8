// Diagnostic logging
//
// The terminal belongs to the TUI, so log output only goes to a file and only
// when POINTFIELD_LOG names one. The filter comes from RUST_LOG (default "info").

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable naming the log file
pub const LOG_PATH_ENV: &str = "POINTFIELD_LOG";

/// Log file requested through the environment, if any
pub fn log_path_from_env() -> Option<PathBuf> {
    env::var_os(LOG_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Install the file subscriber when a log path is configured
///
/// Returns the path being written to, `None` when logging stays off.
pub fn init() -> Result<Option<PathBuf>> {
    let Some(path) = log_path_from_env() else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "Logging started");
    Ok(Some(path))
}
