//! Inventory management: equip, unequip, sort and optimize
//!
//! Equipment changes go through [`Player::adjust`] so current health and mana
//! follow the change in their maxima.

use tracing::debug;

use super::HubError;
use crate::combat::item::{Item, ItemCategory, ItemSlot};
use crate::player::Player;

/// Equip the inventory entry at `index`; the replaced item goes back to the inventory
pub fn equip(player: &mut Player, index: usize) -> Result<Item, HubError> {
    let item = player
        .inventory
        .get(index)
        .ok_or(HubError::InvalidIndex(index))?;
    // A gear entry without a slot can only come from a hand-edited save
    if !item.is_gear() || item.slot.is_none() {
        return Err(HubError::NotGear(item.name.clone()));
    }

    let item = player.inventory.remove(index);
    let equipped = item.clone();
    player.adjust(|p| {
        if let Ok(Some(previous)) = p.equipment.equip(item) {
            p.inventory.push(previous);
        }
    });
    debug!(item = %equipped.name, "Equipped");
    Ok(equipped)
}

/// Move the item in `slot` back to the inventory
pub fn unequip(player: &mut Player, slot: ItemSlot) -> Result<Item, HubError> {
    if player.equipment.get(slot).is_none() {
        return Err(HubError::EmptySlot);
    }
    let removed = player.adjust(|p| p.equipment.unequip(slot));
    let item = removed.ok_or(HubError::EmptySlot)?;
    player.inventory.push(item.clone());
    debug!(item = %item.name, slot = slot.name(), "Unequipped");
    Ok(item)
}

/// Gear before materials, then alphabetical
pub fn sort_inventory(player: &mut Player) {
    player.inventory.sort_by(|a, b| {
        category_rank(a.category)
            .cmp(&category_rank(b.category))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn category_rank(category: ItemCategory) -> u8 {
    match category {
        ItemCategory::Gear => 0,
        ItemCategory::Material => 1,
    }
}

/// Equip, per slot, the highest scoring candidate among the inventory and
/// what is already worn. Ties keep the equipped item. Returns the newly
/// equipped items.
pub fn optimize_gear(player: &mut Player) -> Vec<Item> {
    let mut changed = Vec::new();

    for &slot in ItemSlot::all() {
        let current_score = player.equipment.get(slot).map(Item::gear_score);
        let best = player
            .inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| item.slot == Some(slot))
            .max_by_key(|(index, item)| (item.gear_score(), std::cmp::Reverse(*index)))
            .map(|(index, item)| (index, item.gear_score()));

        let Some((index, score)) = best else {
            continue;
        };
        if current_score.is_some_and(|current| current >= score) {
            continue;
        }
        if let Ok(item) = equip(player, index) {
            changed.push(item);
        }
    }

    if !changed.is_empty() {
        debug!(count = changed.len(), "Gear optimized");
    }
    changed
}
