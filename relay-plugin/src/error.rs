//! Error types for relay-plugin.
//!
//! Every sync failure is already rendered to the user by the time it is
//! returned; the returned value is for callers that want to log or test the
//! outcome and may be ignored.

use relay_core::state::Failure;
use relay_types::ConfigError;
use thiserror::Error;

use crate::host::HostError;
use crate::settings::SettingsError;

/// Errors from reading or writing the persisted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    /// Host config store failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Stored record has the wrong shape.
    #[error("invalid stored config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Outcome of a failed sync attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Nothing was pasted.
    #[error("input is empty")]
    EmptyInput,

    /// The input holds no usable credential.
    #[error("invalid credential format")]
    InvalidCredential,

    /// The device link rejected the credential.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Another attempt is still in flight.
    #[error("sync already in progress")]
    Busy,
}

impl SyncError {
    /// Map a state machine failure, attaching the send error detail if any.
    pub fn from_failure(failure: Failure, detail: Option<String>) -> Self {
        match failure {
            Failure::EmptyInput => SyncError::EmptyInput,
            Failure::InvalidCredential => SyncError::InvalidCredential,
            Failure::SendFailed => SyncError::SendFailed(detail.unwrap_or_default()),
        }
    }
}

/// Errors from installing the plugin into a host.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Settings were rejected.
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// Host refused a registration.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}
