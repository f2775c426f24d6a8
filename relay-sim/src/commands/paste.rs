//! Paste a value into the input field.

use anyhow::{Context, Result};
use relay_plugin::{CookieRelay, Host};

/// Run the paste command.
pub fn run<H: Host>(relay: &CookieRelay<H>, value: &str) -> Result<()> {
    relay.on_change(value).context("Failed to save input")?;

    println!("Saved input ({} chars)", value.chars().count());
    Ok(())
}
