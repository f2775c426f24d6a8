//! Error types for cookie-relay shared types.

use thiserror::Error;

/// Errors raised while reading the persisted plugin record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A known key held a value of the wrong JSON type.
    #[error("config key '{key}' must be a {expected}, found {found}")]
    InvalidField {
        /// The offending key.
        key: String,
        /// Expected JSON type.
        expected: &'static str,
        /// JSON type actually stored.
        found: &'static str,
    },
}
