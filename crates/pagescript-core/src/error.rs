//! Error types for pagescript.

use thiserror::Error;

/// A shared error type for the whole workspace.
///
/// Persistence failures are reported through this type but are never shown
/// to the end user: loads degrade to empty values and background writes log
/// and discard their errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageScriptError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "migration", ...
        message: String,
    },

    /// Binary blob could not be encoded or decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Index outside of an enumerated collection
    #[error("Index {index} out of range for collection of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Action not allowed in the current session state
    #[error("Cannot {action} while session is {state}")]
    InvalidState { state: String, action: &'static str },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PageScriptError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    /// Creates an OutOfRange error
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(state: impl std::fmt::Display, action: &'static str) -> Self {
        Self::InvalidState {
            state: state.to_string(),
            action,
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an OutOfRange error
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PageScriptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PageScriptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for PageScriptError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<version_migrate::MigrationError> for PageScriptError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::Serialization {
                    format: "migration".to_string(),
                    message: err.to_string(),
                }
            }
            MigrationError::IoError { .. } => Self::Io {
                message: err.to_string(),
            },
            _ => Self::Migration(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, PageScriptError>`.
pub type Result<T> = std::result::Result<T, PageScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = PageScriptError::out_of_range(3, 1);
        assert!(err.is_out_of_range());
        assert_eq!(
            err.to_string(),
            "Index 3 out of range for collection of length 1"
        );
    }

    #[test]
    fn test_invalid_state_message() {
        let err = PageScriptError::invalid_state("Completed", "complete");
        assert!(err.is_invalid_state());
        assert_eq!(err.to_string(), "Cannot complete while session is Completed");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PageScriptError = json_err.into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PageScriptError = io_err.into();
        assert!(matches!(err, PageScriptError::Io { .. }));
    }
}
