//! Log output for the terminal game. The screen belongs to the UI, so
//! events go to a file instead of stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Filter from `RUST_LOG` when set, otherwise from the configured level.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(env.as_deref(), level)
}

/// Parse `env` directives if present, otherwise `level`.
pub fn filter_from(env: Option<&str>, level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = env.unwrap_or(level);
    EnvFilter::try_new(directives).map_err(|e| LoggingError::Filter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber, truncating the log file.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.file)
        .map_err(|e| LoggingError::FileOpen {
            path: config.file.clone(),
            source: e,
        })?;
    let filter = build_filter(&config.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}
