//! Send the saved input to the simulated device.

use anyhow::Result;
use relay_plugin::{CookieRelay, Host};

/// Run the sync command.
///
/// With `wait`, stays alive until a success has fallen back to the default
/// status so the full render sequence is printed.
pub async fn run<H: Host>(relay: &CookieRelay<H>, wait: bool) -> Result<()> {
    let target = relay.settings().target_app.clone();

    match relay.trigger_sync().await {
        Ok(()) => {
            println!("Delivered to {}", target);
            if wait {
                // Reset timer fires after the delay; give it a moment to render
                let delay = relay.settings().reset_delay();
                tokio::time::sleep(delay + std::time::Duration::from_millis(100)).await;
            }
            Ok(())
        }
        Err(e) => anyhow::bail!("Sync failed: {}", e),
    }
}
