//! Error types for fullscreen-host
//!
//! A missing platform capability is never an error: the platform traits report
//! it as `None` and callers degrade to a no-op. [`FullscreenError`] covers the
//! platform actively refusing a call; [`ConfigError`] covers malformed
//! configuration.

use thiserror::Error;

/// Main error type for full-screen operations
#[derive(Debug, Error)]
pub enum FullscreenError {
    /// The platform exposed the capability but refused the call
    #[error("platform rejected {operation}: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

impl FullscreenError {
    /// Create a rejection error for a platform operation
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A declaration in CSS text could not be parsed
    #[error("invalid declaration at line {line}, column {column}")]
    InvalidDeclaration { line: u32, column: u32 },
    /// A declaration had a property name but no value
    #[error("property `{0}` has an empty value")]
    EmptyValue(String),
    /// JSON input was malformed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A JSON value had the wrong shape
    #[error("invalid value for `{key}`: expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
    /// An event name that is not a full-screen notification
    #[error("unknown full-screen event `{0}`")]
    UnknownEvent(String),
    /// No change notification left to observe
    #[error("at least one full-screen change event is required")]
    NoChangeEvents,
}

/// Convenience Result type for fullscreen-host operations
pub type Result<T> = std::result::Result<T, FullscreenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = FullscreenError::rejected("requestFullscreen", "not allowed");
        assert_eq!(
            err.to_string(),
            "platform rejected requestFullscreen: not allowed"
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::EmptyValue("width".into()).to_string(),
            "property `width` has an empty value"
        );
        assert_eq!(
            ConfigError::UnknownEvent("resize".into()).to_string(),
            "unknown full-screen event `resize`"
        );
    }
}
