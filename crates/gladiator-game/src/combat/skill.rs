//! Skill system: active and passive skills with cooldown management
//!
//! Skills are learned from a class tree (skill points) or bought from the
//! trainer (gold). Active skills are used in combat; passive skills apply a
//! permanent stat bonus once, at learn time, or alter basic attacks.

use gladiator_core::{SkillId, StatKind, Stats};
use serde::{Deserialize, Serialize};

use super::damage_type::DamageType;
use super::item::WeaponDamage;
use super::status::StatusEffect;

/// How an active skill computes its base damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DamageFormula {
    /// `floor(weapon damage × multiplier)`
    WeaponMultiplier(f64),
    /// `floor(stat × factor)`
    StatScaling { stat: StatKind, factor: f64 },
}

/// Damage component of an active skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillDamage {
    pub formula: DamageFormula,
    pub damage_type: DamageType,
    /// Fraction of the target's defense ignored (0.0–1.0)
    #[serde(default)]
    pub defense_penetration: f64,
}

impl SkillDamage {
    pub fn weapon(multiplier: f64, damage_type: DamageType) -> Self {
        Self {
            formula: DamageFormula::WeaponMultiplier(multiplier),
            damage_type,
            defense_penetration: 0.0,
        }
    }

    pub fn scaling(stat: StatKind, factor: f64, damage_type: DamageType) -> Self {
        Self {
            formula: DamageFormula::StatScaling { stat, factor },
            damage_type,
            defense_penetration: 0.0,
        }
    }

    pub fn ignoring_defense(mut self, fraction: f64) -> Self {
        self.defense_penetration = fraction;
        self
    }

    /// Base damage before Combat Math
    pub fn base_damage(&self, weapon: WeaponDamage, caster: &Stats) -> i32 {
        match self.formula {
            DamageFormula::WeaponMultiplier(mult) => (weapon.amount as f64 * mult).floor() as i32,
            DamageFormula::StatScaling { stat, factor } => {
                (caster.get(stat) as f64 * factor).floor() as i32
            }
        }
    }

    /// Defense left after penetration, floored
    pub fn effective_defense(&self, defense: i32) -> i32 {
        (defense as f64 * (1.0 - self.defense_penetration)).floor() as i32
    }
}

/// Who receives a skill's status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTarget {
    Caster,
    Opponent,
}

/// Status component of an active skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillStatus {
    pub target: StatusTarget,
    pub effect: StatusEffect,
    /// Application chance; `None` means always
    #[serde(default)]
    pub chance: Option<f64>,
}

/// An active skill that can be used in combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSkill {
    pub damage: Option<SkillDamage>,
    pub heal: Option<i32>,
    pub status: Option<SkillStatus>,
    /// Turns before the skill can be used again
    pub cooldown: u32,
    pub mana_cost: i32,
}

/// A passive skill that provides ongoing benefits
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PassiveSkill {
    /// Added to base stats once, when learned
    pub stat_bonus: Stats,
    /// Chance for a basic attack to strike a second time
    pub extra_strike_chance: f64,
}

/// Active or passive behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillKind {
    Active(ActiveSkill),
    Passive(PassiveSkill),
}

/// A learnable skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub level_required: u32,
    pub prerequisites: Vec<SkillId>,
    /// Gold price (trainer skills only)
    pub cost: Option<u32>,
    pub kind: SkillKind,
}

impl Skill {
    pub fn active(id: &str, name: &str, level_required: u32, active: ActiveSkill) -> Self {
        Self {
            id: SkillId::new(id),
            name: name.to_string(),
            description: String::new(),
            level_required,
            prerequisites: Vec::new(),
            cost: None,
            kind: SkillKind::Active(active),
        }
    }

    pub fn passive(id: &str, name: &str, level_required: u32, passive: PassiveSkill) -> Self {
        Self {
            id: SkillId::new(id),
            name: name.to_string(),
            description: String::new(),
            level_required,
            prerequisites: Vec::new(),
            cost: None,
            kind: SkillKind::Passive(passive),
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn requires(mut self, prerequisite: &str) -> Self {
        self.prerequisites.push(SkillId::new(prerequisite));
        self
    }

    pub fn priced(mut self, gold: u32) -> Self {
        self.cost = Some(gold);
        self
    }

    pub fn as_active(&self) -> Option<&ActiveSkill> {
        match &self.kind {
            SkillKind::Active(active) => Some(active),
            SkillKind::Passive(_) => None,
        }
    }

    pub fn as_passive(&self) -> Option<&PassiveSkill> {
        match &self.kind {
            SkillKind::Passive(passive) => Some(passive),
            SkillKind::Active(_) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.as_active().is_some()
    }
}

/// A known active skill plus its cooldown during one fight
#[derive(Debug, Clone, PartialEq)]
pub struct SkillSlot {
    pub skill: Skill,
    /// Turns until usable again
    pub cooldown_remaining: u32,
}

impl SkillSlot {
    pub fn new(skill: Skill) -> Self {
        Self {
            skill,
            cooldown_remaining: 0,
        }
    }

    /// Whether this slot is on cooldown
    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown_remaining > 0
    }

    /// Try to activate the skill. Returns true if activation succeeded.
    pub fn try_activate(&mut self) -> bool {
        if self.is_on_cooldown() {
            return false;
        }
        match &self.skill.kind {
            SkillKind::Active(active) => {
                self.cooldown_remaining = active.cooldown;
                true
            }
            SkillKind::Passive(_) => false,
        }
    }

    /// Advance one turn
    pub fn tick(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power_shot() -> Skill {
        Skill::active(
            "power_shot",
            "Power Shot",
            1,
            ActiveSkill {
                damage: Some(SkillDamage::weapon(1.5, DamageType::Kinetic)),
                heal: None,
                status: None,
                cooldown: 3,
                mana_cost: 0,
            },
        )
    }

    #[test]
    fn test_skill_slot_activation() {
        let mut slot = SkillSlot::new(power_shot());
        assert!(!slot.is_on_cooldown());
        assert!(slot.try_activate());
        assert_eq!(slot.cooldown_remaining, 3);
        assert!(!slot.try_activate()); // can't activate while on cooldown
    }

    #[test]
    fn test_skill_slot_cooldown_recovery() {
        let mut slot = SkillSlot::new(power_shot());
        slot.try_activate();
        for _ in 0..3 {
            assert!(slot.is_on_cooldown());
            slot.tick();
        }
        assert!(!slot.is_on_cooldown());
        slot.tick();
        assert_eq!(slot.cooldown_remaining, 0);
    }

    #[test]
    fn test_passive_slot_never_activates() {
        let mut slot = SkillSlot::new(Skill::passive("p", "P", 1, PassiveSkill::default()));
        assert!(!slot.try_activate());
    }

    #[test]
    fn test_weapon_multiplier_floors() {
        let dmg = SkillDamage::weapon(1.5, DamageType::Kinetic);
        assert_eq!(dmg.base_damage(WeaponDamage::new(DamageType::Energy, 5), &Stats::default()), 7);
        let swift = SkillDamage::weapon(0.8, DamageType::Kinetic);
        assert_eq!(swift.base_damage(WeaponDamage::UNARMED, &Stats::default()), 1);
    }

    #[test]
    fn test_stat_scaling() {
        let bolt = SkillDamage::scaling(StatKind::Intelligence, 1.2, DamageType::Magic);
        let caster = Stats::new(5, 5, 9, 5, 5);
        assert_eq!(bolt.base_damage(WeaponDamage::UNARMED, &caster), 10);
    }

    #[test]
    fn test_defense_penetration() {
        let breach = SkillDamage::weapon(1.2, DamageType::Kinetic).ignoring_defense(0.5);
        assert_eq!(breach.effective_defense(5), 2);
        let plain = SkillDamage::weapon(1.0, DamageType::Kinetic);
        assert_eq!(plain.effective_defense(5), 5);
    }

    #[test]
    fn test_builders() {
        let skill = power_shot().requires("basic").priced(500).described("boom");
        assert_eq!(skill.prerequisites, vec![SkillId::new("basic")]);
        assert_eq!(skill.cost, Some(500));
        assert!(skill.is_active());
        assert!(skill.as_passive().is_none());
    }
}
