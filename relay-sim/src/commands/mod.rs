//! CLI command implementations.

pub mod clear;
pub mod paste;
pub mod status;
pub mod sync;

use anyhow::{Context, Result};
use relay_plugin::{CookieRelay, RelaySettings};
use std::path::Path;

use crate::host::SimHost;

/// Install the plugin into a fresh simulator host and run its load hook.
///
/// A config that fails to load is reported by the plugin and treated as empty.
pub fn open(
    data_dir: &Path,
    settings: RelaySettings,
    offline: bool,
) -> Result<CookieRelay<SimHost>> {
    let host = SimHost::new(data_dir).with_offline(offline);
    let relay = CookieRelay::install(host, settings).context("Failed to install plugin")?;

    if let Err(e) = relay.on_load() {
        tracing::warn!("Starting with empty input: {}", e);
    }
    Ok(relay)
}
