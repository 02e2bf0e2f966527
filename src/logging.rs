//! Tracing setup.
//!
//! The terminal belongs to the UI, so log output goes to
//! `<log dir>/wendash.log`. The filter comes from `RUST_LOG`, defaulting to
//! `wendash=info`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{DashError, DashResult};

pub const LOG_FILE_NAME: &str = "wendash.log";
const DEFAULT_FILTER: &str = "wendash=info";

/// Create the log directory and open the log file for appending.
pub fn open_log_file(dir: &Path) -> DashResult<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Install the global subscriber writing to a file in `dir`.
///
/// Returns the log file path. Fails if the file cannot be opened or a
/// subscriber is already installed; callers treat either as non-fatal.
pub fn init_file_logging(dir: &Path) -> DashResult<PathBuf> {
    let (file, path) = open_log_file(dir)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| DashError::Config(format!("logging already initialised: {}", e)))?;

    Ok(path)
}
