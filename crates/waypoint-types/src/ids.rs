//! Type-safe identifier wrappers around the host's integer ids.
//!
//! The host game engine identifies entities and players with plain
//! 32-bit integers. Wrapping them keeps an entity id from being passed
//! where a player id is expected, which matters because the store
//! filters on the owner and the two are otherwise indistinguishable.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an `i32` host id with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Wrap a raw host id.
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Return the inner host id.
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of the game entity a waypoint marker is attached to.
    EntityId
}

define_id! {
    /// Identifier of the player who owns a set of waypoints.
    PlayerId
}
