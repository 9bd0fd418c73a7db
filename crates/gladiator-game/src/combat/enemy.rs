//! Enemy templates and encounter instances
//!
//! Templates live in the catalog and are never mutated. Each encounter spawns
//! a fresh `Enemy`, scaled for the player's New Game+ cycle.

use gladiator_core::{EnemyId, ItemId, Stats};
use serde::{Deserialize, Serialize};

use super::damage_type::Resistances;
use super::equipment::HEALTH_PER_CONSTITUTION;
use super::item::WeaponDamage;
use super::status::StatusEffect;

/// Scaling added per New Game+ cycle
pub const NG_PLUS_SCALE_STEP: f64 = 0.75;

/// Difficulty multiplier for the given New Game+ cycle
pub fn ng_plus_scale(ng_plus: u32) -> f64 {
    1.0 + ng_plus as f64 * NG_PLUS_SCALE_STEP
}

/// One possible drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: ItemId,
    pub drop_chance: f64,
    /// Inclusive (min, max) copies granted on success
    pub quantity: (u32, u32),
}

impl LootEntry {
    pub fn new(item: &str, drop_chance: f64, min: u32, max: u32) -> Self {
        Self {
            item: ItemId::new(item),
            drop_chance,
            quantity: (min, max),
        }
    }
}

/// Inclusive gold range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldDrop {
    pub min: u32,
    pub max: u32,
}

impl GoldDrop {
    fn scaled(self, factor: f64) -> Self {
        Self {
            min: (self.min as f64 * factor).floor() as u32,
            max: (self.max as f64 * factor).floor() as u32,
        }
    }
}

/// Catalog entry for an enemy type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub level: u32,
    pub stats: Stats,
    pub damage: WeaponDamage,
    pub resistances: Resistances,
    pub loot: Vec<LootEntry>,
    pub gold: GoldDrop,
    pub xp_value: u32,
    /// Innate status inflicted on hit (fixed 30% chance)
    pub on_hit_status: Option<StatusEffect>,
}

impl EnemyTemplate {
    /// Instantiate for an encounter, scaling stats, damage, health, gold and XP
    pub fn spawn(&self, ng_plus: u32) -> Enemy {
        let scale = ng_plus_scale(ng_plus);
        let stats = self.stats.scaled(scale);
        let max_health =
            ((self.stats.constitution * HEALTH_PER_CONSTITUTION) as f64 * scale).floor() as i32;

        Enemy {
            template: self.id.clone(),
            name: self.name.clone(),
            level: self.level,
            stats,
            damage: WeaponDamage {
                damage_type: self.damage.damage_type,
                amount: (self.damage.amount as f64 * scale).floor() as i32,
            },
            resistances: self.resistances,
            max_health,
            current_health: max_health,
            loot: self.loot.clone(),
            gold: self.gold.scaled(scale),
            xp_value: (self.xp_value as f64 * scale).floor() as u32,
            on_hit_status: self.on_hit_status,
            ng_plus,
        }
    }
}

/// A live opponent for one encounter
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub template: EnemyId,
    pub name: String,
    pub level: u32,
    pub stats: Stats,
    pub damage: WeaponDamage,
    pub resistances: Resistances,
    pub max_health: i32,
    pub current_health: i32,
    pub loot: Vec<LootEntry>,
    pub gold: GoldDrop,
    pub xp_value: u32,
    pub on_hit_status: Option<StatusEffect>,
    pub ng_plus: u32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}
