//! Error types for the fallible edges of the crate.
//!
//! The swipe state machine itself never fails: stale commits, duplicate
//! commits and malformed gestures all degrade to no-ops. Errors only come
//! from configuration, deck generation and the threaded runtime.

use thiserror::Error;

/// Errors raised outside the core state machine.
#[derive(Error, Debug)]
pub enum SwipeError {
    /// A deck was requested with zero cards.
    #[error("a deck needs at least one card")]
    EmptyDeck,

    /// A configuration value is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable constraint that was violated.
        reason: &'static str,
    },

    /// Configuration text could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Terminal or other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A worker thread could not be started.
    #[error("failed to spawn {0} thread")]
    Spawn(&'static str),
}

impl SwipeError {
    /// Creates an `InvalidConfig` error.
    pub const fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { field, reason }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SwipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = SwipeError::invalid("commit_threshold", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: commit_threshold must be positive"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: SwipeError = parse.into();
        assert!(matches!(err, SwipeError::ConfigParse(_)));
    }
}
