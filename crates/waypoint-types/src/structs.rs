//! Waypoint records and the host's save-event payload.
//!
//! [`Waypoint`] is the record the store keeps. [`HostWaypoint`] and
//! [`PlayerDataSaved`] mirror what the host delivers when it saves a
//! player's data; the owner is carried by the event, not by each record.

use serde::{Deserialize, Serialize};

use crate::ids::{EntityId, PlayerId};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Integer block coordinates in the host's world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPosition {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl WorldPosition {
    /// Build a position from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

// ---------------------------------------------------------------------------
// Stored waypoint
// ---------------------------------------------------------------------------

/// A named map marker as held by the waypoint store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Entity the marker is attached to.
    pub id: EntityId,
    /// Display label chosen by the player.
    pub name: String,
    /// Player who owns the marker.
    pub owner_player_id: PlayerId,
    /// Marker location.
    pub position: WorldPosition,
}

impl Waypoint {
    /// Copy a host record into a stored waypoint owned by `owner`.
    pub fn from_host(owner: PlayerId, record: &HostWaypoint) -> Self {
        Self {
            id: record.entity_id,
            name: record.name.clone(),
            owner_player_id: owner,
            position: record.pos,
        }
    }
}

// ---------------------------------------------------------------------------
// Host records
// ---------------------------------------------------------------------------

/// One waypoint as it appears in the host's player data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostWaypoint {
    /// Entity the marker is attached to.
    pub entity_id: EntityId,
    /// Display label.
    pub name: String,
    /// Marker location.
    pub pos: WorldPosition,
}

/// Payload of the host's "player data saved" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDataSaved {
    /// Player whose data was saved.
    pub player_id: PlayerId,
    /// The player's complete current waypoint list, in host order.
    #[serde(default)]
    pub waypoints: Vec<HostWaypoint>,
}

impl PlayerDataSaved {
    /// Translate every host record into a stored waypoint owned by this
    /// event's player, preserving order.
    pub fn to_waypoints(&self) -> Vec<Waypoint> {
        self.waypoints
            .iter()
            .map(|record| Waypoint::from_host(self.player_id, record))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_host_copies_fields_verbatim() {
        let record = HostWaypoint {
            entity_id: EntityId::new(1),
            name: String::from("Base"),
            pos: WorldPosition::new(10, 20, 30),
        };
        let wp = Waypoint::from_host(PlayerId::new(7), &record);

        assert_eq!(wp.id, EntityId::new(1));
        assert_eq!(wp.name, "Base");
        assert_eq!(wp.owner_player_id, PlayerId::new(7));
        assert_eq!(wp.position, WorldPosition::new(10, 20, 30));
    }

    #[test]
    fn save_event_parses_from_host_json() {
        let json = r#"{
            "player_id": 7,
            "waypoints": [
                {"entity_id": 1, "name": "Base", "pos": {"x": 10, "y": 20, "z": 30}},
                {"entity_id": 2, "name": "Mine", "pos": {"x": -5, "y": 40, "z": 0}}
            ]
        }"#;
        let event: PlayerDataSaved = serde_json::from_str(json).unwrap();

        let waypoints = event.to_waypoints();
        assert_eq!(waypoints.len(), 2);
        assert!(waypoints.iter().all(|wp| wp.owner_player_id == PlayerId::new(7)));
        assert_eq!(waypoints.get(1).map(|wp| wp.name.as_str()), Some("Mine"));
    }

    #[test]
    fn missing_waypoint_list_means_empty() {
        let event: PlayerDataSaved = serde_json::from_str(r#"{"player_id": 3}"#).unwrap();
        assert!(event.to_waypoints().is_empty());
    }
}
