//! Item data model
//!
//! Gear (weapons, armor, implants) and crafting materials. Items are
//! immutable catalog entries; the player holds clones.

use gladiator_core::{ItemId, Stats};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::damage_type::{DamageType, Resistances};
use super::status::StatusEffect;

/// Item rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl ItemRarity {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
        }
    }
}

/// Flavor type of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Pistol,
    Rifle,
    Melee,
    LightArmor,
    MediumArmor,
    HeavyArmor,
    Cybernetic,
    Material,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pistol => "Pistol",
            Self::Rifle => "Rifle",
            Self::Melee => "Melee",
            Self::LightArmor => "Light Armor",
            Self::MediumArmor => "Medium Armor",
            Self::HeavyArmor => "Heavy Armor",
            Self::Cybernetic => "Cybernetic",
            Self::Material => "Material",
        }
    }
}

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCategory {
    Gear,
    Material,
}

/// The three equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemSlot {
    Weapon,
    Armor,
    Implant,
}

impl ItemSlot {
    /// All slot variants
    pub fn all() -> &'static [ItemSlot] {
        &[Self::Weapon, Self::Armor, Self::Implant]
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
            Self::Implant => "Implant",
        }
    }
}

/// Damage dealt by a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponDamage {
    pub damage_type: DamageType,
    pub amount: i32,
}

impl WeaponDamage {
    /// Bare-handed attack
    pub const UNARMED: WeaponDamage = WeaponDamage {
        damage_type: DamageType::Kinetic,
        amount: 2,
    };

    pub fn new(damage_type: DamageType, amount: i32) -> Self {
        Self { damage_type, amount }
    }
}

/// When an item effect is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// Always active while equipped
    Passive,
    /// After a damaging player action lands
    OnHit,
    /// After a critical basic attack lands
    OnCrit,
}

/// What an item effect does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemEffectKind {
    /// Heal `ceil(damage * value)`
    Lifesteal,
    /// Reduce target dexterity by `value` for the rest of the fight (cumulative)
    ArmorShred,
    /// Return `floor(incoming * value)` to the attacker
    DamageReflect,
    /// Multiply XP rewards by `1 + value`
    BonusXp,
    /// Inflict a status on the target
    StatusEffect(StatusEffect),
}

/// A passive or triggered effect carried by gear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub trigger: EffectTrigger,
    pub kind: ItemEffectKind,
    pub value: f64,
    /// Proc chance; `None` means always
    #[serde(default)]
    pub chance: Option<f64>,
    pub description: String,
}

impl ItemEffect {
    pub fn new(trigger: EffectTrigger, kind: ItemEffectKind, value: f64, description: impl Into<String>) -> Self {
        Self {
            trigger,
            kind,
            value,
            chance: None,
            description: description.into(),
        }
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = Some(chance);
        self
    }

    /// Roll the proc chance (always true when no chance is configured)
    pub fn procs(&self, rng: &mut impl Rng) -> bool {
        match self.chance {
            Some(chance) => rng.gen::<f64>() < chance,
            None => true,
        }
    }
}

/// A game item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub rarity: ItemRarity,
    pub category: ItemCategory,
    /// `None` for materials
    pub slot: Option<ItemSlot>,
    /// Flat (possibly negative) stat bonuses while equipped
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub damage: Option<WeaponDamage>,
    #[serde(default)]
    pub resistances: Resistances,
    pub cost: u32,
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
}

impl Item {
    /// Equippable item with no bonuses yet
    pub fn gear(id: &str, name: &str, kind: ItemKind, rarity: ItemRarity, slot: ItemSlot, cost: u32) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.to_string(),
            description: String::new(),
            kind,
            rarity,
            category: ItemCategory::Gear,
            slot: Some(slot),
            stats: Stats::default(),
            damage: None,
            resistances: Resistances::new(),
            cost,
            effects: Vec::new(),
        }
    }

    /// Crafting material
    pub fn material(id: &str, name: &str, rarity: ItemRarity, cost: u32) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.to_string(),
            description: String::new(),
            kind: ItemKind::Material,
            rarity,
            category: ItemCategory::Material,
            slot: None,
            stats: Stats::default(),
            damage: None,
            resistances: Resistances::new(),
            cost,
            effects: Vec::new(),
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_damage(mut self, damage_type: DamageType, amount: i32) -> Self {
        self.damage = Some(WeaponDamage::new(damage_type, amount));
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_gear(&self) -> bool {
        self.category == ItemCategory::Gear
    }

    /// Heuristic used by gear optimisation: total stat bonus plus weapon damage
    pub fn gear_score(&self) -> i32 {
        self.stats.total() + self.damage.map(|d| d.amount).unwrap_or(0)
    }

    /// Price a vendor pays for this item
    pub fn sell_price(&self) -> u32 {
        self.cost / 2
    }

    /// Effects with the given trigger
    pub fn effects_with(&self, trigger: EffectTrigger) -> impl Iterator<Item = &ItemEffect> {
        self.effects.iter().filter(move |e| e.trigger == trigger)
    }
}
