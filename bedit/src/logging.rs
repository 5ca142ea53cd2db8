//! # Logging
//!
//! The terminal is the editor's screen, so log events go to a file or
//! nowhere.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::EditorConfig;
use crate::HostError;

/// Install the global subscriber when a log file is configured
///
/// Keep the returned guard alive until exit; dropping it flushes pending
/// events. `RUST_LOG` overrides the configured level.
pub fn init(config: &EditorConfig) -> Result<Option<WorkerGuard>, HostError> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(None);
    };

    let appender = file_appender(path)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level)?)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| HostError::Logging(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(Some(guard))
}

/// `RUST_LOG` when set, otherwise `level`
pub fn env_filter(level: &str) -> Result<EnvFilter, HostError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| HostError::Logging(format!("invalid log level {:?}: {}", level, e))),
    }
}

/// Non-rotating appender for `path`
pub fn file_appender(path: &Path) -> Result<RollingFileAppender, HostError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| HostError::Logging(format!("{} has no file name", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .map_err(|e| HostError::Logging(format!("{}: {}", path.display(), e)))
}
