//! In-memory waypoint store for the Waypoint Exposer.
//!
//! The store holds every known player's waypoints in one ordered list.
//! It is rebuilt purely from host save events: each save replaces the
//! saving player's entries wholesale and leaves everyone else's alone.
//! Nothing is persisted; a restart starts empty.
//!
//! [`WaypointStore`] is constructed once by the composition root and
//! shared by [`Arc`](std::sync::Arc) between the save-event handler and
//! the HTTP layer.

pub mod store;

pub use store::WaypointStore;
