//! Stable identifiers for catalog entries and combat sessions

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

catalog_id!(
    /// Key of an item in the item catalog (e.g. `item_weapon_001`)
    ItemId
);
catalog_id!(
    /// Key of a skill (e.g. `power_shot`)
    SkillId
);
catalog_id!(
    /// Key of an enemy template (e.g. `enemy_003`)
    EnemyId
);
catalog_id!(
    /// Key of an arena (e.g. `arena_002`)
    ArenaId
);
catalog_id!(
    /// Key of a crafting or modification recipe
    RecipeId
);

/// Unique identifier for a single combat encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a session ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_id_from_str() {
        let id: ItemId = "item_weapon_001".into();
        assert_eq!(id.as_str(), "item_weapon_001");
        assert_eq!(id, ItemId::new("item_weapon_001"));
        assert_eq!(id.to_string(), "item_weapon_001");
    }

    #[test]
    fn test_catalog_ids_order_lexically() {
        let mut ids = vec![EnemyId::new("enemy_003"), EnemyId::new("enemy_001"), EnemyId::new("enemy_002")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "enemy_001");
        assert_eq!(ids[2].as_str(), "enemy_003");
    }

    #[test]
    fn test_session_ids_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
    }
}
