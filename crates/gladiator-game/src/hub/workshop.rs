//! Workshop: crafting and modification recipes

use gladiator_core::RecipeId;
use tracing::info;

use super::{require_gold, HubError};
use crate::catalog::{Catalog, Recipe};
use crate::combat::item::Item;
use crate::player::Player;

/// Whether the player can pay for a recipe, checked gold first, then base item, then materials
pub fn can_craft(player: &Player, recipe: &Recipe) -> Result<(), HubError> {
    require_gold(player.gold, recipe.cost)?;
    if let Some(base) = &recipe.base_item {
        if player.count_item(base) == 0 {
            return Err(HubError::MissingBaseItem(base.clone()));
        }
    }
    for (material, required) in &recipe.materials {
        let owned = player.count_item(material) as u32;
        if owned < *required {
            return Err(HubError::MissingMaterials {
                item: material.to_string(),
                required: *required,
                owned,
            });
        }
    }
    Ok(())
}

/// Consume gold, materials and any base item; add the result to the inventory
pub fn craft(player: &mut Player, catalog: &Catalog, id: &RecipeId) -> Result<Item, HubError> {
    let recipe = catalog
        .recipe(id)
        .ok_or_else(|| HubError::UnknownRecipe(id.clone()))?;
    let result = catalog
        .item(&recipe.result)
        .ok_or_else(|| HubError::UnknownItem(recipe.result.clone()))?;
    can_craft(player, recipe)?;

    player.gold -= recipe.cost;
    for (material, count) in &recipe.materials {
        player.remove_items(material, *count as usize);
    }
    if let Some(base) = &recipe.base_item {
        player.remove_items(base, 1);
    }
    player.inventory.push(result.clone());

    info!(recipe = %recipe.id, item = %result.name, gold = player.gold, "Item crafted");
    Ok(result.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::test_support::recruit;
    use gladiator_core::ItemId;

    fn stock(player: &mut Player, catalog: &Catalog, id: &str, count: usize) {
        let Some(item) = catalog.item(&ItemId::new(id)) else {
            panic!("{id} missing from catalog");
        };
        player.inventory.extend(std::iter::repeat(item.clone()).take(count));
    }

    #[test]
    fn test_craft_consumes_materials() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.gold = 150;
        stock(&mut player, &catalog, "mat_scrap", 12);
        stock(&mut player, &catalog, "mat_hardened_plating", 2);

        let item = craft(&mut player, &catalog, &RecipeId::new("craft_reinforced_armor")).unwrap();
        assert_eq!(item.id, ItemId::new("item_armor_002"));
        assert_eq!(player.gold, 50);
        assert_eq!(player.count_item(&ItemId::new("mat_scrap")), 2);
        assert_eq!(player.count_item(&ItemId::new("mat_hardened_plating")), 0);
        assert_eq!(player.count_item(&ItemId::new("item_armor_002")), 1);
    }

    #[test]
    fn test_missing_materials_rejected() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.gold = 500;
        stock(&mut player, &catalog, "mat_scrap", 3);
        let before = player.clone();

        assert_eq!(
            craft(&mut player, &catalog, &RecipeId::new("craft_ion_blaster")),
            Err(HubError::MissingMaterials {
                item: "mat_scrap".into(),
                required: 8,
                owned: 3
            })
        );
        assert_eq!(player, before);
    }

    #[test]
    fn test_modification_needs_base_item() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.gold = 500;
        stock(&mut player, &catalog, "mat_neurotoxin", 3);
        stock(&mut player, &catalog, "mat_zylorian_crystal", 1);
        let recipe = RecipeId::new("mod_venom_knife");

        assert_eq!(
            craft(&mut player, &catalog, &recipe),
            Err(HubError::MissingBaseItem(ItemId::new("item_weapon_005")))
        );

        stock(&mut player, &catalog, "item_weapon_005", 1);
        let item = craft(&mut player, &catalog, &recipe).unwrap();
        assert_eq!(item.name, "Venom-Tipped Vibro-Knife");
        assert_eq!(player.count_item(&ItemId::new("item_weapon_005")), 0);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.gold, 200);
    }

    #[test]
    fn test_gold_checked_first() {
        let catalog = Catalog::standard();
        let player = recruit(&catalog);
        let Some(recipe) = catalog.recipe(&RecipeId::new("craft_ion_blaster")) else {
            panic!("recipe missing");
        };
        assert_eq!(
            can_craft(&player, recipe),
            Err(HubError::InsufficientGold {
                required: 150,
                available: 50
            })
        );
    }
}
