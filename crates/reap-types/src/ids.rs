//! Typed identifiers.
//!
//! Actors carry UUID v7 identities. Blocks, items, and worlds are addressed
//! by namespaced string keys (`namespace:path`), matching how hosts expose
//! their registries. Each key gets its own newtype so a block identity can
//! never be passed where an item identity is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Generates a newtype wrapper around a namespaced registry key.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a key from its `namespace:path` form.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

define_id! {
    /// Unique identifier for an acting entity (usually a player).
    ActorId
}

define_key! {
    /// Registry identity of a block, e.g. `minecraft:wheat`.
    BlockId
}

define_key! {
    /// Registry identity of an item, e.g. `minecraft:wheat_seeds`.
    ItemId
}

define_key! {
    /// Identity of the world (dimension) an interaction happens in.
    WorldKey
}

impl BlockId {
    /// The empty cell.
    pub fn air() -> Self {
        Self::new("minecraft:air")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_ids_are_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
        assert_ne!(ActorId::new().into_inner(), Uuid::nil());
    }

    #[test]
    fn keys_serialize_as_plain_strings() {
        let id = BlockId::new("minecraft:wheat");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"minecraft:wheat\""));
        let restored: Result<BlockId, _> = serde_json::from_str("\"minecraft:carrots\"");
        assert_eq!(restored.ok(), Some(BlockId::new("minecraft:carrots")));
    }

    #[test]
    fn key_compares_with_str() {
        let id = ItemId::from("minecraft:carrot");
        assert!(id == *"minecraft:carrot");
        assert_eq!(id.to_string(), "minecraft:carrot");
    }
}
