//! Path management for pagescript settings and logs.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pagescript/        # Config directory (platform config dir)
//! ├── settings.json            # Settings namespace (SavedScripts, CustomScripts)
//! └── logs/                    # Application logs
//!     └── pagescript.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "pagescript";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for pagescript.
pub struct PageScriptPaths;

impl PageScriptPaths {
    /// Returns the pagescript configuration directory
    /// (e.g. `~/.config/pagescript/` on Linux).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of the settings namespace file.
    pub fn settings_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("settings.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
