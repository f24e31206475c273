//! Waypoint server startup helper for embedding in a host process.
//!
//! Provides [`spawn_exposer`] which turns the host's base port into a
//! running server, or into a logged "not started" outcome. Nothing here
//! returns an error: an unusable port or a failed bind leaves the
//! endpoint disabled and the host keeps running.
//!
//! # Usage
//!
//! ```rust,ignore
//! use waypoint_exposer::startup::spawn_exposer;
//!
//! let server = spawn_exposer(Some(8080), state).await;
//! // Some(server) listens on 0.0.0.0:8083.
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::server::{RunningServer, ServerConfig, listen_port_for, start_server};
use crate::state::AppState;

/// Start the waypoint server on `base_port + 3` if the base port is usable.
///
/// Returns `None` when no base port is configured, when it is outside
/// 1-65533 (or the derived port does not fit), or when binding fails.
/// Each case is logged once.
pub async fn spawn_exposer(base_port: Option<i64>, state: Arc<AppState>) -> Option<RunningServer> {
    let Some(base_port) = base_port else {
        info!("Webserver not started (no control panel port configured)");
        return None;
    };

    let Some(port) = listen_port_for(base_port) else {
        info!(base_port, "Webserver not started (control panel port not within 1-65533)");
        return None;
    };

    match start_server(&ServerConfig::all_interfaces(port), state).await {
        Ok(server) => {
            info!(port, "Started webserver for waypoints");
            Some(server)
        }
        Err(e) => {
            error!(error = %e, port, "Webserver for waypoints failed to start");
            None
        }
    }
}
