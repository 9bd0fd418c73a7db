//! Live combatant state for one encounter
//!
//! Players and enemies share one struct; what differs is expressed by
//! optional capabilities (a mana pool, an equipment loadout) rather than by
//! separate types.

use gladiator_core::{SkillId, Stats};

use super::damage::defense_rating;
use super::damage_type::Resistances;
use super::enemy::Enemy;
use super::equipment::EquipmentSet;
use super::item::{EffectTrigger, ItemEffect, ItemEffectKind, WeaponDamage};
use super::skill::{Skill, SkillSlot};
use super::status::StatusManager;
use crate::player::Player;

/// Current and maximum mana
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManaPool {
    pub current: i32,
    pub max: i32,
}

impl ManaPool {
    pub fn can_afford(&self, cost: i32) -> bool {
        self.current >= cost
    }

    pub fn spend(&mut self, cost: i32) {
        self.current = (self.current - cost).max(0);
    }
}

/// Equipment and skills a player brings into the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Loadout {
    pub equipment: EquipmentSet,
    /// Known active skills with their cooldowns
    pub skills: Vec<SkillSlot>,
    /// Chance for a basic attack to strike twice (from passive skills)
    pub extra_strike_chance: f64,
}

impl Loadout {
    pub fn effects(&self, trigger: EffectTrigger) -> Vec<ItemEffect> {
        self.equipment.effects(trigger).into_iter().cloned().collect()
    }

    pub fn reflect_fraction(&self) -> f64 {
        self.equipment
            .passive_total(|k| matches!(k, ItemEffectKind::DamageReflect))
    }

    pub fn slot(&self, id: &SkillId) -> Option<&SkillSlot> {
        self.skills.iter().find(|s| &s.skill.id == id)
    }

    pub fn slot_mut(&mut self, id: &SkillId) -> Option<&mut SkillSlot> {
        self.skills.iter_mut().find(|s| &s.skill.id == id)
    }

    /// Decrement every cooldown by one turn
    pub fn tick_cooldowns(&mut self) {
        for slot in &mut self.skills {
            slot.tick();
        }
    }
}

/// One side of a fight
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    /// Effective stats (base plus equipment)
    pub stats: Stats,
    pub max_health: i32,
    pub current_health: i32,
    pub mana: Option<ManaPool>,
    pub resistances: Resistances,
    pub statuses: StatusManager,
    /// Basic attack damage
    pub attack: WeaponDamage,
    /// Accumulated dexterity reduction from armor shred
    pub armor_shred: i32,
    pub loadout: Option<Loadout>,
}

impl Combatant {
    /// Snapshot a player, given the catalog entries of the skills they know
    pub fn from_player(player: &Player, known_skills: Vec<Skill>) -> Self {
        let stats = player.effective_stats();
        let max_health = player.max_health();
        let max_mana = player.max_mana();

        let extra_strike_chance = known_skills
            .iter()
            .filter_map(|s| s.as_passive())
            .map(|p| p.extra_strike_chance)
            .sum();
        let skills = known_skills
            .into_iter()
            .filter(|s| s.is_active())
            .map(SkillSlot::new)
            .collect();

        Self {
            name: player.name.clone(),
            level: player.level,
            stats,
            max_health,
            current_health: player.current_health.clamp(0, max_health),
            mana: Some(ManaPool {
                current: player.current_mana.clamp(0, max_mana),
                max: max_mana,
            }),
            resistances: player.resistances(),
            statuses: player.statuses.clone(),
            attack: player.equipment.weapon_damage(),
            armor_shred: 0,
            loadout: Some(Loadout {
                equipment: player.equipment.clone(),
                skills,
                extra_strike_chance,
            }),
        }
    }

    pub fn from_enemy(enemy: &Enemy) -> Self {
        Self {
            name: enemy.name.clone(),
            level: enemy.level,
            stats: enemy.stats,
            max_health: enemy.max_health,
            current_health: enemy.current_health,
            mana: None,
            resistances: enemy.resistances,
            statuses: StatusManager::new(),
            attack: enemy.damage,
            armor_shred: 0,
            loadout: None,
        }
    }

    /// Defense after shred and DefenseUp
    pub fn defense(&self) -> i32 {
        defense_rating(self.stats.dexterity, self.armor_shred, self.statuses.defense_bonus())
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Subtract damage, clamping at zero. Returns the new health.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.current_health = (self.current_health - amount).max(0);
        self.current_health
    }

    /// Restore health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health + amount).min(self.max_health);
        self.current_health - before
    }
}
