//! Standalone host harness for the Waypoint Exposer.
//!
//! Stands in for the game server that would normally load the plugin.
//! It is the composition root: it owns the waypoint store and the world
//! flag, hands them to the plugin, and raises host events read from
//! stdin.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `waypoint-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the store and world flag
//! 4. Load the plugin (starts the endpoint on base port + 3)
//! 5. Initialize the plugin (subscribes to save events)
//! 6. Feed host events from stdin until EOF
//! 7. Wait for Ctrl-C, then tear the plugin down

mod config;
mod error;
mod feed;

use std::path::Path;
use std::sync::Arc;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;
use waypoint_exposer::state::AppState;
use waypoint_exposer::{ModLifecycle, SaveEventBus, WaypointExposer, WorldFlag, WorldStatus};
use waypoint_store::WaypointStore;

use crate::config::{HarnessConfig, LoggingConfig};
use crate::error::HostError;
use crate::feed::{HostHarness, run_feed};

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "waypoint-config.yaml";

/// Application entry point for the host harness.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or stdin fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let mut config = load_config()?;

    // 2. Initialize structured logging, then apply env overrides.
    init_logging(&config.logging);
    config.apply_overrides(|key| std::env::var(key).ok());
    info!(
        control_panel_port = ?config.host.control_panel_port,
        world_ready = config.host.world_ready,
        "waypoint-host starting"
    );

    // 3. Shared state owned by the host.
    let store = Arc::new(WaypointStore::new());
    let world = Arc::new(WorldFlag::new(config.host.world_ready));
    let world_status: Arc<dyn WorldStatus> = Arc::clone(&world) as _;
    let state = Arc::new(AppState::new(Arc::clone(&store), world_status));

    // 4. Load the plugin.
    let mut plugin = WaypointExposer::start(&config.host, state).await;
    match plugin.listen_addr() {
        Some(addr) => info!(%addr, "Waypoint endpoint available"),
        None => info!("Waypoint endpoint disabled"),
    }

    // 5. Subscribe it to save events.
    let mut bus = SaveEventBus::new();
    plugin.initialize(&mut bus);
    let host = HostHarness::new(bus, world);

    // 6-7. Feed events, then run until interrupted.
    let stdin = BufReader::new(tokio::io::stdin());
    let result = run_feed(&host, stdin, tokio::signal::ctrl_c()).await;

    plugin.teardown().await;
    info!(waypoints = store.len(), "waypoint-host shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load the harness configuration from `waypoint-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<HarnessConfig, HostError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(HarnessConfig::from_file(config_path)?)
    } else {
        Ok(HarnessConfig::default())
    }
}
