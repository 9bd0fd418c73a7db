//! Combat system module
//!
//! Provides damage types, damage calculation, items, equipment, skills,
//! status effects, enemies, arenas and the turn scheduler.

pub mod arena;
pub mod combatant;
pub mod damage;
pub mod damage_type;
pub mod enemy;
pub mod equipment;
pub mod item;
pub mod session;
pub mod skill;
pub mod status;

pub use arena::{Arena, EnvironmentalEffect};
pub use combatant::{Combatant, Loadout, ManaPool};
pub use damage::{calculate_attack_damage, DamageEvent, CRIT_MULTIPLIER};
pub use damage_type::{DamageType, Resistances};
pub use enemy::{ng_plus_scale, Enemy, EnemyTemplate, GoldDrop, LootEntry};
pub use equipment::{
    effective_max_health, effective_max_mana, effective_resistances, effective_stats,
    shift_resource, EquipError, EquipmentSet,
};
pub use item::{
    EffectTrigger, Item, ItemCategory, ItemEffect, ItemEffectKind, ItemKind, ItemRarity, ItemSlot,
    WeaponDamage,
};
pub use session::{ActionError, CombatSession, PlayerAction, TurnPhase, TurnReport};
pub use skill::{
    ActiveSkill, DamageFormula, PassiveSkill, Skill, SkillDamage, SkillKind, SkillSlot,
    SkillStatus, StatusTarget,
};
pub use status::{StatusEffect, StatusKind, StatusManager, StatusTick};
