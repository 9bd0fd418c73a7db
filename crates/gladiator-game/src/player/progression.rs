//! Progression engine: rewards, leveling, defeat and New Game+
//!
//! Combat never mutates the `Player` directly; once a session ends its
//! outcome is folded back here.

use gladiator_core::Stats;
use rand::Rng;
use tracing::{debug, info};

use super::creation::starting_equipment;
use super::origin::origin_stats;
use super::Player;
use crate::catalog::Catalog;
use crate::combat::combatant::Combatant;
use crate::combat::enemy::{Enemy, GoldDrop, LootEntry};
use crate::combat::item::{Item, ItemEffectKind};
use crate::hub::HubError;

/// Level cap; New Game+ is the only progression beyond it
pub const MAX_LEVEL: u32 = 10;
/// XP needed to leave level `n` is `XP_TABLE[n - 1]`
pub const XP_TABLE: [u32; 10] = [100, 250, 500, 1000, 2000, 4000, 8000, 15000, 30000, 60000];
/// Requirement reported beyond the table
pub const XP_SENTINEL: u32 = 999_999;
/// Gold granted when entering New Game+
pub const NG_PLUS_GOLD: u32 = 100;

pub fn xp_to_next_level(level: u32) -> u32 {
    level
        .checked_sub(1)
        .and_then(|index| XP_TABLE.get(index as usize))
        .copied()
        .unwrap_or(XP_SENTINEL)
}

/// What a victory granted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WinRewards {
    pub gold: u32,
    pub xp: u32,
    pub loot: Vec<Item>,
    /// Every level reached, in order
    pub levels_gained: Vec<u32>,
}

/// `floor(uniform[min, max] × (1 + luck/100))`
pub fn roll_gold(drop: GoldDrop, luck: i32, rng: &mut impl Rng) -> u32 {
    let (low, high) = (drop.min.min(drop.max), drop.min.max(drop.max));
    let roll = rng.gen_range(low..=high) as f64;
    let multiplier = (1.0 + luck as f64 / 100.0).max(0.0);
    (roll * multiplier).floor() as u32
}

/// Roll every loot entry; each success yields discrete copies of the item
pub fn roll_loot(entries: &[LootEntry], luck: i32, catalog: &Catalog, rng: &mut impl Rng) -> Vec<Item> {
    let luck_factor = 1.0 + luck as f64 / 50.0;
    let mut loot = Vec::new();

    for entry in entries {
        if rng.gen::<f64>() >= entry.drop_chance * luck_factor {
            continue;
        }
        let Some(item) = catalog.item(&entry.item) else {
            debug!(item = %entry.item, "Loot entry references unknown item");
            continue;
        };
        let (low, high) = entry.quantity;
        let quantity = rng.gen_range(low.min(high)..=low.max(high));
        loot.extend(std::iter::repeat(item).take(quantity as usize).cloned());
    }
    loot
}

/// `floor(base × (1 + bonus))`
pub fn xp_reward(base: u32, bonus: f64) -> u32 {
    (base as f64 * (1.0 + bonus)).floor() as u32
}

/// Copy the end-of-fight health and mana back onto the player.
///
/// A defeated player is revived at 1 health; statuses never outlive a fight.
pub fn fold_back(player: &mut Player, combatant: &Combatant) {
    player.current_health = combatant.current_health.clamp(1, player.max_health().max(1));
    if let Some(mana) = combatant.mana {
        player.current_mana = mana.current.clamp(0, player.max_mana());
    }
    player.statuses.clear();
}

/// Grant gold, loot and XP for a defeated enemy
pub fn resolve_win(player: &mut Player, enemy: &Enemy, catalog: &Catalog, rng: &mut impl Rng) -> WinRewards {
    let luck = player.luck();
    let gold = roll_gold(enemy.gold, luck, rng);
    let loot = roll_loot(&enemy.loot, luck, catalog, rng);
    let bonus = player
        .equipment
        .passive_total(|k| matches!(k, ItemEffectKind::BonusXp));
    let xp = xp_reward(enemy.xp_value, bonus);

    player.statuses.clear();
    player.gold += gold;
    player.inventory.extend(loot.iter().cloned());
    let levels_gained = apply_xp(player, xp);

    info!(
        enemy = %enemy.name,
        gold,
        xp,
        items = loot.len(),
        level = player.level,
        "Victory rewards granted"
    );

    WinRewards {
        gold,
        xp,
        loot,
        levels_gained,
    }
}

/// Non-punitive defeat: back to 1 health, statuses cleared
pub fn resolve_loss(player: &mut Player) {
    player.current_health = 1;
    player.statuses.clear();
    info!(name = %player.name, "Defeated; revived in the hub");
}

/// Add XP and cascade level-ups up to the cap. Returns the levels reached.
pub fn apply_xp(player: &mut Player, amount: u32) -> Vec<u32> {
    player.xp += amount;
    let mut levels = Vec::new();

    while player.xp >= player.xp_to_next_level && player.level < MAX_LEVEL {
        player.xp -= player.xp_to_next_level;
        player.level += 1;
        player.xp_to_next_level = xp_to_next_level(player.level);
        player.skill_points += 1;
        player.stats += Stats::uniform(1);
        player.restore();
        levels.push(player.level);
        info!(name = %player.name, level = player.level, "Level up");
    }
    levels
}

/// Prestige reset. Requires the level cap and explicit confirmation; skills are kept.
pub fn new_game_plus(player: &mut Player, catalog: &Catalog, confirmed: bool) -> Result<(), HubError> {
    if player.level < MAX_LEVEL {
        return Err(HubError::LevelTooLow {
            required: MAX_LEVEL,
            current: player.level,
        });
    }
    if !confirmed {
        return Err(HubError::ConfirmationRequired);
    }

    player.level = 1;
    player.xp = 0;
    player.xp_to_next_level = xp_to_next_level(1);
    player.gold = NG_PLUS_GOLD;
    player.stats = origin_stats(player.race, player.class);
    player.equipment = starting_equipment(catalog);
    player.inventory.clear();
    player.statuses.clear();
    player.ng_plus += 1;
    player.restore();

    info!(name = %player.name, ng_plus = player.ng_plus, "New Game+ started");
    Ok(())
}
