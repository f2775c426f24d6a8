//! Show the simulator state.

use anyhow::Result;
use relay_core::extract;
use relay_plugin::{CookieRelay, Host};
use std::path::Path;

use crate::host::{outbox_path, CONFIG_FILE};

/// Run the status command.
pub fn run<H: Host>(data_dir: &Path, relay: &CookieRelay<H>) -> Result<()> {
    let settings = relay.settings();
    let raw = relay.raw_input();

    println!("=== relay-sim status ===");
    println!();

    println!("Settings:");
    println!("  Target app:   {}", settings.target_app);
    println!("  Config key:   {}", settings.config_key);
    println!("  Reset delay:  {}s", settings.reset_delay_secs);
    println!("  Policy:       {:?}", settings.trigger_policy);
    println!();

    println!("Input:");
    println!("  Config file:  {}", data_dir.join(CONFIG_FILE).display());
    if raw.is_empty() {
        println!("  Saved input:  NONE");
        println!();
        println!("Run 'relay-sim paste <value>' to save a credential.");
        return Ok(());
    }
    println!("  Saved input:  {} chars", raw.chars().count());
    match extract(&raw) {
        Some(credential) => println!(
            "  Credential:   {}=<{} chars>",
            relay_core::COOKIE_NAME,
            credential.value().len()
        ),
        None => println!("  Credential:   NOT RECOGNIZED"),
    }
    println!();

    let outbox = outbox_path(data_dir, &settings.target_app);
    println!("Device:");
    if outbox.exists() {
        println!("  Last delivery: {}", outbox.display());
    } else {
        println!("  Last delivery: NEVER");
    }

    Ok(())
}
