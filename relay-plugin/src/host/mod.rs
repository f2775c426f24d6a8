//! Host runtime abstraction for cookie-relay.
//!
//! The plugin never talks to the platform directly. Everything it needs from
//! the host is one of four capabilities:
//! - [`ConfigStore`] reads and writes the plugin's persisted config object
//! - [`UiSink`] replaces the settings panel's node list
//! - [`CallbackRegistry`] hands out ids for native callbacks
//! - [`DeviceLink`] delivers a payload to an app on the paired device
//!
//! # Example
//!
//! ```ignore
//! let host = MockHost::new();
//! host.write_config(ConfigMap::new())?;
//! host.send_message("com.example.app", "MUSIC_U=abc").await?;
//! ```

mod mock;

pub use mock::{MockHost, SentMessage};

use async_trait::async_trait;
use relay_types::{CallbackId, ConfigMap, UiNode};
use std::sync::Arc;
use thiserror::Error;

/// Host errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Config store could not be read.
    #[error("config read failed: {0}")]
    ConfigRead(String),

    /// Config store could not be written.
    #[error("config write failed: {0}")]
    ConfigWrite(String),

    /// UI update was rejected.
    #[error("ui update failed: {0}")]
    UiUpdate(String),

    /// Callback could not be registered.
    #[error("callback registration failed: {0}")]
    CallbackRegistration(String),

    /// No paired device is reachable.
    #[error("device unreachable: {0}")]
    DeviceUnreachable(String),

    /// The device link rejected the message.
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Argument passed to a native callback.
///
/// Text inputs pass the new field value; buttons pass `None`.
pub type CallbackArgs = Option<String>;

/// A native callback the host invokes on user interaction.
pub type NativeCallback = Arc<dyn Fn(CallbackArgs) + Send + Sync>;

/// Plugin-scoped persistent configuration.
pub trait ConfigStore: Send + Sync {
    /// Read the whole config object.
    fn read_config(&self) -> Result<ConfigMap, HostError>;

    /// Replace the whole config object.
    fn write_config(&self, config: ConfigMap) -> Result<(), HostError>;
}

/// Settings panel renderer.
pub trait UiSink: Send + Sync {
    /// Replace the panel's node list.
    ///
    /// The host merges by full list, so partial updates are never sent.
    fn update_settings_ui(&self, nodes: Vec<UiNode>) -> Result<(), HostError>;
}

/// Registry for native callbacks referenced by UI nodes.
pub trait CallbackRegistry: Send + Sync {
    /// Register a callback and return its stable id.
    fn register_callback(&self, callback: NativeCallback) -> Result<CallbackId, HostError>;
}

/// Device interconnect to the companion app.
#[async_trait]
pub trait DeviceLink: Send + Sync {
    /// Deliver `payload` to the app with package name `target_app`.
    async fn send_message(&self, target_app: &str, payload: &str) -> Result<(), HostError>;
}

/// Everything the plugin needs from its host.
pub trait Host: ConfigStore + UiSink + CallbackRegistry + DeviceLink + 'static {}

impl<T> Host for T where T: ConfigStore + UiSink + CallbackRegistry + DeviceLink + 'static {}
