//! The per-player waypoint store.
//!
//! Both operations take a single [`RwLock`] so a reader never sees a
//! replace half-applied. The lock is never held across an `.await`.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;
use waypoint_types::{PlayerId, Waypoint};

/// Authoritative list of all players' waypoints.
#[derive(Debug, Default)]
pub struct WaypointStore {
    waypoints: RwLock<Vec<Waypoint>>,
}

impl WaypointStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            waypoints: RwLock::new(Vec::new()),
        }
    }

    /// Replace every waypoint owned by `owner` with `waypoints`.
    ///
    /// Entries owned by other players are untouched. The new entries are
    /// appended after the surviving ones, in the order given, and always
    /// carry `owner` regardless of what the input records say.
    pub fn replace_for_player<I>(&self, owner: PlayerId, waypoints: I)
    where
        I: IntoIterator<Item = Waypoint>,
    {
        let mut list = self.write();
        let before = list.len();
        list.retain(|wp| wp.owner_player_id != owner);
        let removed = before.saturating_sub(list.len());

        let kept = list.len();
        list.extend(waypoints.into_iter().map(|wp| Waypoint {
            owner_player_id: owner,
            ..wp
        }));
        let added = list.len().saturating_sub(kept);

        trace!(player_id = %owner, removed, added, "Replaced player waypoints");
    }

    /// Snapshot of the current contents in insertion order.
    pub fn enumerate(&self) -> Vec<Waypoint> {
        self.read().clone()
    }

    /// Number of waypoints held across all players.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no player has any waypoint stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of waypoints currently owned by `owner`.
    pub fn count_for_player(&self, owner: PlayerId) -> usize {
        self.read()
            .iter()
            .filter(|wp| wp.owner_player_id == owner)
            .count()
    }

    // Every write leaves the list consistent, so a poisoned lock still
    // guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Waypoint>> {
        self.waypoints.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Waypoint>> {
        self.waypoints.write().unwrap_or_else(PoisonError::into_inner)
    }
}
