//! # relay-types
//!
//! Shared types for cookie-relay.
//!
//! This crate provides the types exchanged with the host runtime:
//! - [`UiNode`], [`NodeContent`], [`CallbackId`] - Settings UI descriptors
//! - [`PluginConfig`], [`ConfigMap`] - The persisted plugin record
//! - [`ConfigError`] - Validation errors at the config boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod ui;

pub use config::{ConfigMap, PluginConfig, SAVED_COOKIE_KEY};
pub use error::ConfigError;
pub use ui::{CallbackId, NodeContent, UiNode};
