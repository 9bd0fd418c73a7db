//! Persistence port
//!
//! The game saves a single JSON record under a fixed key. Where that record
//! lives is up to the [`SaveStorage`] implementation; the binary writes files,
//! tests keep it in memory.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::Player;

/// The only save slot
pub const SAVE_KEY: &str = "galactic-gladiator-save";
/// Bumped when the record layout changes
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt save data: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Key/value store for serialized saves
pub trait SaveStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;
    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError>;
    fn delete(&mut self, key: &str) -> Result<(), SaveError>;
}

/// In-process storage
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// What actually gets written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub player: Player,
}

impl SaveRecord {
    pub fn new(player: Player) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            player,
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a record, rejecting versions from the future
    pub fn from_json(data: &str) -> Result<Self, SaveError> {
        let record: SaveRecord = serde_json::from_str(data)?;
        if record.version > SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion {
                found: record.version,
                supported: SAVE_VERSION,
            });
        }
        Ok(record)
    }
}
