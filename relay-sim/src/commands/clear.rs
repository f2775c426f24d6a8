//! Clear the saved input.

use anyhow::{Context, Result};
use relay_plugin::{CookieRelay, Host};

/// Run the clear command.
pub fn run<H: Host>(relay: &CookieRelay<H>) -> Result<()> {
    relay.on_change("").context("Failed to clear input")?;

    println!("Cleared saved input");
    Ok(())
}
