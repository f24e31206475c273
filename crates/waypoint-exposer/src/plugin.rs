//! The plugin object the host loads.
//!
//! [`WaypointExposer`] starts the HTTP endpoint when constructed,
//! subscribes to player-data saves in [`ModLifecycle::initialize`], and
//! stops the endpoint in [`ModLifecycle::teardown`]. It is also the
//! host's console server, but discards all console output.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{debug, info, warn};
use waypoint_store::WaypointStore;

use crate::host::{ConsoleLogKind, ConsoleSink, HostConfig, ModLifecycle, SaveEventSource};
use crate::server::RunningServer;
use crate::startup::spawn_exposer;
use crate::state::AppState;

/// Waypoint exposer plugin instance.
#[derive(Debug)]
pub struct WaypointExposer {
    state: Arc<AppState>,
    server: Option<RunningServer>,
}

impl WaypointExposer {
    /// Load the plugin: derive the port from `config` and start serving
    /// `state` if the port is usable.
    ///
    /// Never fails. If the endpoint cannot start, the plugin still loads
    /// and still tracks waypoints; it just has nothing listening.
    pub async fn start(config: &dyn HostConfig, state: Arc<AppState>) -> Self {
        let server = spawn_exposer(config.base_port(), Arc::clone(&state)).await;
        Self { state, server }
    }

    /// Address of the running endpoint, if any.
    pub fn listen_addr(&self) -> Option<SocketAddr> {
        self.server
            .as_ref()
            .filter(|server| server.is_running())
            .map(RunningServer::local_addr)
    }

    /// Whether the endpoint is currently serving.
    pub fn is_listening(&self) -> bool {
        self.listen_addr().is_some()
    }

    /// The store this plugin feeds and serves.
    pub fn store(&self) -> &Arc<WaypointStore> {
        &self.state.store
    }
}

impl ModLifecycle for WaypointExposer {
    fn initialize(&mut self, events: &mut dyn SaveEventSource) {
        let store = Arc::clone(&self.state.store);
        events.on_player_data_saved(Box::new(move |event| {
            store.replace_for_player(event.player_id, event.to_waypoints());
            debug!(
                player_id = %event.player_id,
                waypoints = event.waypoints.len(),
                "Player waypoints saved"
            );
        }));
        info!("Subscribed to player data saves");
    }

    async fn teardown(&mut self) {
        let Some(mut server) = self.server.take() else {
            debug!("Teardown with no running webserver");
            return;
        };

        if let Err(e) = server.shutdown().await {
            warn!(error = %e, "Caught error when stopping webserver");
        }
    }
}

impl ConsoleSink for WaypointExposer {
    fn send_line(&self, _line: &str) {}

    fn send_log(&self, _message: &str, _trace: &str, _kind: ConsoleLogKind) {}
}
