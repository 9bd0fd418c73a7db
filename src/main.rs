//! Galactic Gladiator - a turn-based arena RPG
//!
//! This is the main entry point: it wires settings, save storage and the
//! backstory client into the console front end.

mod console;
mod save;
mod settings;
mod state;

use std::io;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gladiator_integration::NarrativeClient;

use crate::console::Console;
use crate::save::FileStorage;
use crate::settings::GameSettings;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    info!("Starting Galactic Gladiator");

    let settings = GameSettings::load();

    let narrative = match NarrativeClient::new(settings.narrative.to_config()) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Backstory generation unavailable: {}", e);
            None
        }
    };

    let storage = save::storage_or_memory(FileStorage::new());

    let stdin = io::stdin();
    let mut console = Console::new(
        stdin.lock(),
        io::stdout(),
        settings,
        storage,
        narrative,
        StdRng::from_entropy(),
    );
    console.run()?;

    info!("Galactic Gladiator shut down cleanly");
    Ok(())
}
