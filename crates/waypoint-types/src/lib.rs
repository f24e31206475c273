//! Shared type definitions for the Waypoint Exposer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for host entity and player identifiers
//! - [`structs`] -- Stored waypoints, world positions, and host save events

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{EntityId, PlayerId};
pub use structs::{HostWaypoint, PlayerDataSaved, Waypoint, WorldPosition};
