//! Plugin settings.
//!
//! Settings are loaded from a TOML file; every field has a default, so an
//! empty file is a valid configuration.

use relay_core::DEFAULT_RESET_DELAY;
use relay_types::SAVED_COOKIE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Package name of the companion app the credential is forwarded to.
pub const DEFAULT_TARGET_APP: &str = "com.musicu.companion";

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`RelaySettings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds an unusable value.
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// How overlapping sync triggers are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Every trigger starts an independent attempt; the last render wins and
    /// the reset timer renders Default unconditionally.
    Unguarded,
    /// A trigger while an attempt is in flight is refused, and a reset timer
    /// that was overtaken by a newer render does nothing.
    #[default]
    SingleFlight,
}

/// Root settings for the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelaySettings {
    /// Package name of the companion app (default: `com.musicu.companion`).
    #[serde(default = "default_target_app")]
    pub target_app: String,
    /// Config key holding the pasted input (default: `savedCookie`).
    #[serde(default = "default_config_key")]
    pub config_key: String,
    /// Seconds before a success falls back to the default status (default: 3).
    #[serde(default = "default_reset_delay_secs")]
    pub reset_delay_secs: u64,
    /// Overlapping trigger handling (default: `single_flight`).
    #[serde(default)]
    pub trigger_policy: TriggerPolicy,
}

// Default value functions
fn default_target_app() -> String {
    DEFAULT_TARGET_APP.to_string()
}

fn default_config_key() -> String {
    SAVED_COOKIE_KEY.to_string()
}

fn default_reset_delay_secs() -> u64 {
    DEFAULT_RESET_DELAY.as_secs()
}

/// Dot-separated, non-empty segments of ASCII letters, digits and `_`.
fn is_package_name(name: &str) -> bool {
    name.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            target_app: default_target_app(),
            config_key: default_config_key(),
            reset_delay_secs: default_reset_delay_secs(),
            trigger_policy: TriggerPolicy::default(),
        }
    }
}

impl RelaySettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_app.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "target_app must not be empty".to_string(),
            ));
        }
        if !is_package_name(&self.target_app) {
            return Err(SettingsError::Invalid(format!(
                "target_app must be a package name (letters, digits, '.', '_'), got {:?}",
                self.target_app
            )));
        }
        if self.config_key.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "config_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay before a success falls back to the default status.
    pub fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.reset_delay_secs)
    }

    /// Set the companion app package name.
    pub fn with_target_app(mut self, target_app: &str) -> Self {
        self.target_app = target_app.to_string();
        self
    }

    /// Set the trigger policy.
    pub fn with_trigger_policy(mut self, policy: TriggerPolicy) -> Self {
        self.trigger_policy = policy;
        self
    }

    /// Set the reset delay in seconds.
    pub fn with_reset_delay_secs(mut self, secs: u64) -> Self {
        self.reset_delay_secs = secs;
        self
    }
}
