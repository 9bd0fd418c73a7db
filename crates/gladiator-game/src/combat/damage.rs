//! Damage calculation pipeline
//!
//! All functions here are total: every input yields a defined integer and
//! final damage never drops below 1.

use gladiator_core::Stats;
use rand::Rng;

use super::arena::EnvironmentalEffect;
use super::damage_type::{DamageType, Resistances};

/// Crit damage multiplier
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Result of a damage calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    /// Damage after stat modifier, arena and resistance, before defense
    pub base_amount: i32,
    /// Damage after defense and crit
    pub final_amount: i32,
    pub damage_type: DamageType,
    /// Resistance the target had against this type
    pub resistance: f64,
    /// Whether this was a critical hit
    pub is_crit: bool,
}

impl DamageEvent {
    /// Log hint describing resistance/vulnerability, if notable
    pub fn effectiveness_note(&self) -> Option<&'static str> {
        if self.resistance > 0.01 {
            Some("The attack was not very effective...")
        } else if self.resistance < -0.01 {
            Some("The attack was super effective!")
        } else {
            None
        }
    }
}

/// Half the governing attribute, floored
pub fn stat_modifier(damage_type: DamageType, attacker: &Stats) -> i32 {
    attacker.get(damage_type.scaling_stat()).div_euclid(2)
}

/// Multiplier the arena applies to this damage type (1.0 when none matches)
pub fn arena_multiplier(damage_type: DamageType, arena: &[EnvironmentalEffect]) -> f64 {
    arena
        .iter()
        .find_map(|effect| match effect {
            EnvironmentalEffect::DamageModifier {
                damage_type: t,
                multiplier,
                ..
            } if *t == damage_type => Some(*multiplier),
            _ => None,
        })
        .unwrap_or(1.0)
}

/// Stat modifier -> arena multiplier -> resistance -> floor at 1
pub fn resolve_damage(
    base_damage: i32,
    damage_type: DamageType,
    attacker: &Stats,
    target_resistances: &Resistances,
    arena: &[EnvironmentalEffect],
) -> i32 {
    let raw = (base_damage + stat_modifier(damage_type, attacker)) as f64
        * arena_multiplier(damage_type, arena);
    let resistance = target_resistances.get(damage_type);
    let mitigated = (raw * (1.0 - resistance)).floor() as i32;
    mitigated.max(1)
}

/// Half of (dexterity minus shred), floored, plus any flat bonus
pub fn defense_rating(dexterity: i32, armor_shred: i32, bonus: i32) -> i32 {
    (dexterity - armor_shred).div_euclid(2) + bonus
}

/// Subtract defense and re-apply the floor of 1 (chip damage always lands)
pub fn apply_defense(damage: i32, defense: i32) -> i32 {
    (damage - defense).max(1)
}

/// Probability of a critical hit for the given luck
pub fn crit_chance(luck: i32) -> f64 {
    luck as f64 / 200.0
}

pub fn apply_crit(damage: i32) -> i32 {
    (damage as f64 * CRIT_MULTIPLIER).floor() as i32
}

/// Full attack pipeline
///
/// Pipeline: base + stat_mod -> arena_mult -> resistance -> floor 1
///           -> minus defense -> floor 1 -> crit (if allowed)
#[allow(clippy::too_many_arguments)]
pub fn calculate_attack_damage(
    base_damage: i32,
    damage_type: DamageType,
    attacker: &Stats,
    target_resistances: &Resistances,
    target_defense: i32,
    arena: &[EnvironmentalEffect],
    can_crit: bool,
    rng: &mut impl Rng,
) -> DamageEvent {
    let base_amount = resolve_damage(base_damage, damage_type, attacker, target_resistances, arena);
    let mut final_amount = apply_defense(base_amount, target_defense);

    let is_crit = can_crit && rng.gen::<f64>() < crit_chance(attacker.luck);
    if is_crit {
        final_amount = apply_crit(final_amount);
    }

    DamageEvent {
        base_amount,
        final_amount,
        damage_type,
        resistance: target_resistances.get(damage_type),
        is_crit,
    }
}
