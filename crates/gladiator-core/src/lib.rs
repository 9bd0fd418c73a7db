//! Gladiator Core - Shared types for the Galactic Gladiator engine
//!
//! This crate provides the foundational types used throughout the game:
//! - The five-attribute `Stats` block and `StatKind` selector
//! - String-keyed catalog identifiers (items, skills, enemies, arenas, recipes)
//! - `SessionId` for tagging combat encounters

pub mod ids;
pub mod stats;

pub use ids::{ArenaId, EnemyId, ItemId, RecipeId, SessionId, SkillId};
pub use stats::{StatKind, Stats, UnknownStat};
