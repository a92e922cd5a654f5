//! Tracing subscriber setup for embedding applications.
//!
//! Installs an `EnvFilter` (default `info`), a compact stderr layer and,
//! when a directory is supplied, a daily-rolling plain-text file layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! let logs_dir = PageScriptPaths::logs_dir().ok();
//! let _guard = logging::init_logging(logs_dir.as_deref())?;
//! // ... guard dropped at shutdown, buffered file logs flushed
//! ```

use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use pagescript_core::error::{PageScriptError, Result};

const LOG_FILE_PREFIX: &str = "pagescript.log";

/// Keeps the non-blocking file writer alive. Drop it last.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    pub fn has_file_output(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Installs the global tracing subscriber.
///
/// Returns a config error if a global subscriber is already installed.
pub fn init_logging(logs_dir: Option<&Path>) -> Result<LoggingGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let (file_layer, file_guard) = match logs_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PageScriptError::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(
        file_output = file_guard.is_some(),
        "[Logging] pagescript logging initialized"
    );

    Ok(LoggingGuard {
        file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_once_then_rejects_second_install() {
        let temp_dir = TempDir::new().unwrap();
        let logs_dir = temp_dir.path().join("logs");

        let guard = init_logging(Some(&logs_dir)).unwrap();
        assert!(guard.has_file_output());
        assert!(logs_dir.is_dir());

        let second = init_logging(None);
        assert!(matches!(second, Err(PageScriptError::Config(_))));
    }
}
