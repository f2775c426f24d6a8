//! # relay-sim
//!
//! Development host for the cookie-relay plugin.
//!
//! Runs the plugin against a local data directory: the config object is a
//! JSON file, the settings panel is printed to the terminal and the device
//! link writes payloads into an outbox directory.
//!
//! ## Commands
//!
//! - `paste`: Save a value into the input field
//! - `sync`: Send the saved input to the simulated device
//! - `status`: Show settings, saved input and last delivery
//! - `clear`: Clear the saved input
//!
//! ## Example
//!
//! ```bash
//! relay-sim paste "a=1; MUSIC_U=XYZ; Path=/"
//! relay-sim sync --wait
//! relay-sim sync --offline
//! RUST_LOG=debug relay-sim status
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay_plugin::RelaySettings;
use std::path::{Path, PathBuf};

mod commands;
mod host;

use commands::{clear, paste, status, sync};

/// Settings file picked up from the data directory when `--settings` is absent.
const SETTINGS_FILE: &str = "settings.toml";

/// Development host for the cookie-relay plugin.
#[derive(Parser, Debug)]
#[command(name = "relay-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory for the config file and outbox
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Plugin settings file (TOML)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Save a value into the input field
    Paste {
        /// Cookie header or bare token
        value: String,
    },

    /// Send the saved input to the simulated device
    Sync {
        /// Fail the send as if no device were paired
        #[arg(long)]
        offline: bool,

        /// Wait for the success status to reset before exiting
        #[arg(long)]
        wait: bool,
    },

    /// Show settings, saved input and last delivery
    Status,

    /// Clear the saved input
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;

    let settings = load_settings(cli.settings.as_deref(), &data_dir)?;
    tracing::debug!(?settings, "Settings loaded");

    match cli.command {
        Commands::Paste { value } => {
            let relay = commands::open(&data_dir, settings, false)?;
            paste::run(&relay, &value)?;
        }
        Commands::Sync { offline, wait } => {
            let relay = commands::open(&data_dir, settings, offline)?;
            sync::run(&relay, wait).await?;
        }
        Commands::Status => {
            let relay = commands::open(&data_dir, settings, false)?;
            status::run(&data_dir, &relay)?;
        }
        Commands::Clear => {
            let relay = commands::open(&data_dir, settings, false)?;
            clear::run(&relay)?;
        }
    }

    Ok(())
}

/// Load settings from an explicit path, the data directory, or defaults.
fn load_settings(explicit: Option<&Path>, data_dir: &Path) -> Result<RelaySettings> {
    if let Some(path) = explicit {
        return RelaySettings::load(path).context("Failed to load settings");
    }

    let fallback = data_dir.join(SETTINGS_FILE);
    if fallback.exists() {
        RelaySettings::load(&fallback).context("Failed to load settings")
    } else {
        Ok(RelaySettings::default())
    }
}

/// Get the default data directory for relay-sim.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "cookie-relay", "relay-sim")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
