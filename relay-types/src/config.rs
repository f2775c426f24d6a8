//! The persisted plugin record.
//!
//! The host stores plugin configuration as an untyped JSON object. This
//! module reads the one key cookie-relay owns into a typed record and writes
//! it back without touching any other keys.

use serde_json::Value;
use std::fmt;

use crate::error::ConfigError;

/// Untyped configuration object as handed over by the host.
pub type ConfigMap = serde_json::Map<String, Value>;

/// Key under which the last pasted input is persisted.
pub const SAVED_COOKIE_KEY: &str = "savedCookie";

/// Typed view of the plugin's persisted configuration.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    /// Last input the user pasted, stored verbatim.
    pub saved_cookie: Option<String>,
}

impl PluginConfig {
    /// Create a record holding the given input.
    pub fn with_saved_cookie(value: impl Into<String>) -> Self {
        Self {
            saved_cookie: Some(value.into()),
        }
    }

    /// Read the record from a host config object.
    ///
    /// A missing key or an explicit `null` yields an empty record. Any other
    /// non-string value is rejected.
    pub fn from_map(map: &ConfigMap, key: &str) -> Result<Self, ConfigError> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::String(value)) => Ok(Self::with_saved_cookie(value.as_str())),
            Some(other) => Err(ConfigError::InvalidField {
                key: key.to_string(),
                expected: "string",
                found: json_kind(other),
            }),
        }
    }

    /// Merge this record into a host config object, leaving other keys intact.
    pub fn merge_into(&self, map: &mut ConfigMap, key: &str) {
        match &self.saved_cookie {
            Some(value) => {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
            None => {
                map.remove(key);
            }
        }
    }
}

impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field(
                "saved_cookie",
                &self
                    .saved_cookie
                    .as_ref()
                    .map(|v| format!("[{} chars REDACTED]", v.len())),
            )
            .finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
