//! Shared application state for the waypoint endpoint.
//!
//! [`AppState`] bundles the waypoint store with the host's world status.
//! Both are owned elsewhere (the composition root) and shared here by
//! [`Arc`], so the save-event handler and every request handler see the
//! same store instance.

use std::sync::Arc;

use waypoint_store::WaypointStore;

use crate::host::WorldStatus;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// All known waypoints, rebuilt from host save events.
    pub store: Arc<WaypointStore>,
    /// Whether the host world is loaded.
    pub world: Arc<dyn WorldStatus>,
}

impl AppState {
    /// Create application state over an existing store and world status.
    pub fn new(store: Arc<WaypointStore>, world: Arc<dyn WorldStatus>) -> Self {
        Self { store, world }
    }
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState")
            .field("waypoints", &self.store.len())
            .field("world_ready", &self.world.is_world_ready())
            .finish()
    }
}
