//! # relay-plugin
//!
//! Host-facing side of cookie-relay.
//!
//! This is the crate a host embedding links against. It owns the pasted
//! input, persists it through the host config store, renders the settings
//! panel and forwards the normalized credential over the device link.
//!
//! ## Features
//!
//! - **Host Abstraction**: config store, UI sink, callback registry and device
//!   link are traits; [`MockHost`] implements all of them for tests
//! - **Pure State Machine**: uses relay-core for extraction and sync logic
//! - **Single-flight Trigger**: overlapping sync triggers are refused unless
//!   the settings select the unguarded policy
//!
//! ## Example
//!
//! ```ignore
//! use relay_plugin::{CookieRelay, MockHost, RelaySettings};
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = MockHost::new();
//!     let relay = CookieRelay::install(host.clone(), RelaySettings::default())?;
//!     relay.on_load()?;
//!
//!     relay.on_change("MUSIC_U=abc; Path=/")?;
//!     relay.trigger_sync().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod host;
pub mod relay;
pub mod settings;

pub use error::{PersistError, PluginError, SyncError};
pub use host::{
    CallbackArgs, CallbackRegistry, ConfigStore, DeviceLink, Host, HostError, MockHost,
    NativeCallback, SentMessage, UiSink,
};
pub use relay::CookieRelay;
pub use settings::{RelaySettings, SettingsError, TriggerPolicy};
