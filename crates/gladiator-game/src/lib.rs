//! Gladiator Game - Combat, progression and hub logic
//!
//! Provides the data catalog, the turn-based combat engine, the progression
//! engine, hub collaborators and the `Game` controller tying them together.

pub mod catalog;
pub mod combat;
mod content;
pub mod game;
pub mod hub;
pub mod player;
pub mod storage;

pub use catalog::{Catalog, Recipe, SkillTree, TreeOwner};
pub use game::{CombatOutcome, Game, GameError};
pub use hub::HubError;
pub use player::{
    create_player, CharacterDraft, CreationError, Gender, Player, PlayerClass, PointAllocation,
    Race, WinRewards,
};
pub use storage::{MemoryStorage, SaveError, SaveRecord, SaveStorage, SAVE_KEY};

// Combat system re-exports
pub use combat::{
    ActionError, Arena, CombatSession, Combatant, DamageEvent, DamageType, Enemy, EnemyTemplate,
    EquipmentSet, Item, ItemCategory, ItemRarity, ItemSlot, PlayerAction, Skill, StatusEffect,
    StatusKind, TurnPhase, TurnReport,
};
