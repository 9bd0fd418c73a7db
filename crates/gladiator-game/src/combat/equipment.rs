//! Equipment slots and the stat aggregator
//!
//! Effective stats, resistances and resource maxima are always derived from
//! base stats plus whatever is currently equipped; nothing is cached.

use gladiator_core::Stats;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::damage_type::Resistances;
use super::item::{EffectTrigger, Item, ItemEffect, ItemEffectKind, ItemSlot, WeaponDamage};

/// Health before constitution
pub const BASE_HEALTH: i32 = 50;
/// Health per point of constitution
pub const HEALTH_PER_CONSTITUTION: i32 = 10;
/// Mana before intelligence
pub const BASE_MANA: i32 = 20;
/// Mana per point of intelligence
pub const MANA_PER_INTELLIGENCE: i32 = 5;

/// Error when equipping an item
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("{0} cannot be equipped")]
    NotGear(String),
}

/// The player's equipped items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSet {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub implant: Option<Item>,
}

impl EquipmentSet {
    /// Create an empty equipment set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a reference to the item in a slot
    pub fn get(&self, slot: ItemSlot) -> Option<&Item> {
        match slot {
            ItemSlot::Weapon => self.weapon.as_ref(),
            ItemSlot::Armor => self.armor.as_ref(),
            ItemSlot::Implant => self.implant.as_ref(),
        }
    }

    fn get_mut(&mut self, slot: ItemSlot) -> &mut Option<Item> {
        match slot {
            ItemSlot::Weapon => &mut self.weapon,
            ItemSlot::Armor => &mut self.armor,
            ItemSlot::Implant => &mut self.implant,
        }
    }

    /// Equip an item in its own slot. Returns the previously equipped item (if any).
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, EquipError> {
        let Some(slot) = item.slot else {
            return Err(EquipError::NotGear(item.name));
        };
        Ok(self.get_mut(slot).replace(item))
    }

    /// Remove and return the item in a slot
    pub fn unequip(&mut self, slot: ItemSlot) -> Option<Item> {
        self.get_mut(slot).take()
    }

    /// Iterate over equipped items
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor, &self.implant]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
    }

    /// Sum of stat bonuses from all equipped items
    pub fn stat_bonuses(&self) -> Stats {
        self.iter().fold(Stats::default(), |acc, item| acc + item.stats)
    }

    /// Damage of the equipped weapon, or the unarmed fallback
    pub fn weapon_damage(&self) -> WeaponDamage {
        self.weapon
            .as_ref()
            .and_then(|w| w.damage)
            .unwrap_or(WeaponDamage::UNARMED)
    }

    /// Every effect with the given trigger across all slots
    pub fn effects(&self, trigger: EffectTrigger) -> Vec<&ItemEffect> {
        self.iter().flat_map(|item| item.effects_with(trigger)).collect()
    }

    /// Total value of passive effects matching `kind` (e.g. bonus XP, reflect)
    pub fn passive_total(&self, matches: fn(&ItemEffectKind) -> bool) -> f64 {
        self.effects(EffectTrigger::Passive)
            .into_iter()
            .filter(|e| matches(&e.kind))
            .map(|e| e.value)
            .sum()
    }

    /// Number of equipped items
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

/// Base stats plus every equipped item's bonuses
pub fn effective_stats(base: &Stats, equipment: &EquipmentSet) -> Stats {
    *base + equipment.stat_bonuses()
}

/// Additive per-type resistances across all equipped items
pub fn effective_resistances(equipment: &EquipmentSet) -> Resistances {
    let mut total = Resistances::new();
    for item in equipment.iter() {
        total.add(&item.resistances);
    }
    total
}

/// `50 + 10 × constitution`
pub fn max_health_for(constitution: i32) -> i32 {
    BASE_HEALTH + HEALTH_PER_CONSTITUTION * constitution
}

/// `20 + 5 × intelligence`
pub fn max_mana_for(intelligence: i32) -> i32 {
    BASE_MANA + MANA_PER_INTELLIGENCE * intelligence
}

pub fn effective_max_health(base: &Stats, equipment: &EquipmentSet) -> i32 {
    max_health_for(effective_stats(base, equipment).constitution)
}

pub fn effective_max_mana(base: &Stats, equipment: &EquipmentSet) -> i32 {
    max_mana_for(effective_stats(base, equipment).intelligence)
}

/// Shift `current` by the change in maximum, then clamp to `[floor, new_max]`
pub fn shift_resource(current: i32, old_max: i32, new_max: i32, floor: i32) -> i32 {
    (current + new_max - old_max).clamp(floor, new_max.max(floor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::damage_type::DamageType;
    use crate::combat::item::{ItemKind, ItemRarity};
    use gladiator_core::StatKind;

    fn vest() -> Item {
        Item::gear("vest", "Vest", ItemKind::MediumArmor, ItemRarity::Common, ItemSlot::Armor, 20)
            .with_stats(Stats::single(StatKind::Constitution, 1))
            .with_resistances(
                Resistances::new()
                    .with(DamageType::Kinetic, 0.1)
                    .with(DamageType::Energy, 0.05),
            )
    }

    fn implant() -> Item {
        Item::gear("chip", "Chip", ItemKind::Cybernetic, ItemRarity::Epic, ItemSlot::Implant, 600)
            .with_stats(Stats::single(StatKind::Intelligence, 1))
            .with_resistances(Resistances::new().with(DamageType::Kinetic, 0.2))
            .with_effect(ItemEffect::new(
                EffectTrigger::Passive,
                ItemEffectKind::BonusXp,
                0.15,
                "xp",
            ))
    }

    fn pistol() -> Item {
        Item::gear("pistol", "Pistol", ItemKind::Pistol, ItemRarity::Common, ItemSlot::Weapon, 20)
            .with_damage(DamageType::Energy, 4)
    }

    #[test]
    fn test_equip_returns_previous() {
        let mut set = EquipmentSet::new();
        assert_eq!(set.equip(vest()), Ok(None));
        let previous = set.equip(vest().with_stats(Stats::default()));
        assert!(matches!(previous, Ok(Some(ref item)) if item.stats.constitution == 1));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_material_rejected() {
        let mut set = EquipmentSet::new();
        let scrap = Item::material("mat_scrap", "Scrap Metal", ItemRarity::Common, 5);
        assert_eq!(set.equip(scrap), Err(EquipError::NotGear("Scrap Metal".into())));
    }

    #[test]
    fn test_effective_stats_idempotent() {
        let mut set = EquipmentSet::new();
        set.equip(vest()).ok();
        set.equip(implant()).ok();
        let base = Stats::uniform(5);
        let first = effective_stats(&base, &set);
        let second = effective_stats(&base, &set);
        assert_eq!(first, second);
        assert_eq!(first.constitution, 6);
        assert_eq!(first.intelligence, 6);
    }

    #[test]
    fn test_resistances_sum_across_slots() {
        let mut set = EquipmentSet::new();
        set.equip(vest()).ok();
        set.equip(implant()).ok();
        let res = effective_resistances(&set);
        assert!((res.get(DamageType::Kinetic) - 0.3).abs() < 1e-9);
        assert!((res.get(DamageType::Energy) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_max_resources_include_equipment() {
        let mut set = EquipmentSet::new();
        set.equip(vest()).ok();
        set.equip(implant()).ok();
        let base = Stats::uniform(5);
        assert_eq!(effective_max_health(&base, &set), 110);
        assert_eq!(effective_max_mana(&base, &set), 50);
    }

    #[test]
    fn test_weapon_damage_falls_back_to_unarmed() {
        let mut set = EquipmentSet::new();
        assert_eq!(set.weapon_damage(), WeaponDamage::UNARMED);
        set.equip(pistol()).ok();
        assert_eq!(set.weapon_damage(), WeaponDamage::new(DamageType::Energy, 4));
        set.unequip(ItemSlot::Weapon);
        assert_eq!(set.weapon_damage().amount, 2);
    }

    #[test]
    fn test_passive_total() {
        let mut set = EquipmentSet::new();
        set.equip(implant()).ok();
        let xp = set.passive_total(|k| matches!(k, ItemEffectKind::BonusXp));
        assert!((xp - 0.15).abs() < 1e-9);
        let reflect = set.passive_total(|k| matches!(k, ItemEffectKind::DamageReflect));
        assert_eq!(reflect, 0.0);
    }

    #[test]
    fn test_shift_resource_delta_and_clamp() {
        // gaining 10 max keeps the same missing amount
        assert_eq!(shift_resource(40, 100, 110, 1), 50);
        // losing max never drops health below 1
        assert_eq!(shift_resource(5, 110, 100, 1), 1);
        // mana may reach zero
        assert_eq!(shift_resource(3, 50, 40, 0), 0);
        // never above max
        assert_eq!(shift_resource(120, 100, 110, 1), 110);
    }
}
