//! Waypoint HTTP endpoint and host plugin for game servers.
//!
//! This crate exposes every player's map waypoints as a JSON document
//! over plain HTTP so external tools (map overlays, dashboards) can poll
//! them. It provides:
//!
//! - **The endpoint**: an Axum server on the host's base port + 3. Any
//!   method on any path returns the waypoint document, or 503 while the
//!   host world is not loaded. CORS headers allow browser clients.
//! - **Host capabilities** ([`host`]): traits for the host's config,
//!   world status, save-event subscription and console, plus in-process
//!   implementations.
//! - **The plugin** ([`WaypointExposer`]): starts the endpoint, feeds
//!   the store from save events, and stops the endpoint on teardown.
//!
//! # Architecture
//!
//! The store is a [`WaypointStore`](waypoint_store::WaypointStore)
//! owned by the composition root and shared by [`Arc`](std::sync::Arc).
//! Save events replace one player's entries under the store's lock;
//! request handlers take a snapshot under the same lock, so a reader
//! never sees a half-applied save.

pub mod cors;
pub mod error;
pub mod handlers;
pub mod host;
pub mod plugin;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use error::ExposerError;
pub use host::{
    ConsoleLogKind, ConsoleSink, HostConfig, ModLifecycle, SaveEventBus, SaveEventSource,
    SaveHandler, StaticHostConfig, WorldFlag, WorldStatus,
};
pub use plugin::WaypointExposer;
pub use router::build_router;
pub use server::{RunningServer, ServerConfig, ServerError, listen_port_for, start_server};
pub use startup::spawn_exposer;
pub use state::AppState;
