//! The player aggregate and its lifecycle
//!
//! `Player` is the single long-lived mutable root of the game. Combat works on
//! a snapshot (`Combatant`) and the outcome is folded back here by the
//! progression engine.

pub mod creation;
pub mod origin;
pub mod progression;

use gladiator_core::{ItemId, SkillId, Stats};
use serde::{Deserialize, Serialize};

use crate::combat::damage_type::Resistances;
use crate::combat::equipment::{
    effective_max_health, effective_max_mana, effective_resistances, effective_stats,
    shift_resource, EquipmentSet,
};
use crate::combat::item::Item;
use crate::combat::status::StatusManager;

pub use creation::{create_player, CharacterDraft, CreationError, PointAllocation};
pub use origin::{origin_stats, Gender, PlayerClass, Race};
pub use progression::{
    apply_xp, fold_back, new_game_plus, resolve_loss, resolve_win, xp_to_next_level, WinRewards,
    MAX_LEVEL,
};

/// Every stat starts here before race, class and free points
pub const BASE_STAT: i32 = 5;

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub gender: Gender,
    pub race: Race,
    pub class: PlayerClass,
    pub backstory: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub gold: u32,
    /// Base stats; equipment bonuses are added on demand
    pub stats: Stats,
    pub current_health: i32,
    pub current_mana: i32,
    pub equipment: EquipmentSet,
    /// Materials are discrete entries, never stacked
    pub inventory: Vec<Item>,
    pub skills: Vec<SkillId>,
    pub skill_points: u32,
    #[serde(default)]
    pub statuses: StatusManager,
    #[serde(default)]
    pub ng_plus: u32,
}

impl Player {
    pub fn effective_stats(&self) -> Stats {
        effective_stats(&self.stats, &self.equipment)
    }

    pub fn resistances(&self) -> Resistances {
        effective_resistances(&self.equipment)
    }

    pub fn max_health(&self) -> i32 {
        effective_max_health(&self.stats, &self.equipment)
    }

    pub fn max_mana(&self) -> i32 {
        effective_max_mana(&self.stats, &self.equipment)
    }

    /// Run a change that may alter max health or mana, then shift current
    /// values by the same delta (health never below 1, mana never below 0).
    pub fn adjust<R>(&mut self, change: impl FnOnce(&mut Self) -> R) -> R {
        let old_health = self.max_health();
        let old_mana = self.max_mana();
        let result = change(self);
        self.current_health = shift_resource(self.current_health, old_health, self.max_health(), 1);
        self.current_mana = shift_resource(self.current_mana, old_mana, self.max_mana(), 0);
        result
    }

    /// Fill health and mana to their maxima
    pub fn restore(&mut self) {
        self.current_health = self.max_health();
        self.current_mana = self.max_mana();
    }

    pub fn knows_skill(&self, id: &SkillId) -> bool {
        self.skills.contains(id)
    }

    /// Number of inventory entries with this id
    pub fn count_item(&self, id: &ItemId) -> usize {
        self.inventory.iter().filter(|item| &item.id == id).count()
    }

    /// Remove up to `count` entries with this id, front first. Returns how many were removed.
    pub fn remove_items(&mut self, id: &ItemId, count: usize) -> usize {
        let mut removed = 0;
        self.inventory.retain(|item| {
            if removed < count && &item.id == id {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Luck used for reward rolls
    pub fn luck(&self) -> i32 {
        self.effective_stats().luck
    }
}
