//! The shop: buy catalog gear, sell anything for half price

use gladiator_core::ItemId;
use tracing::debug;

use super::{require_gold, HubError};
use crate::catalog::Catalog;
use crate::combat::item::Item;
use crate::player::Player;

/// Gear at or above this price is never stocked
pub const SHOP_PRICE_CEILING: u32 = 600;

/// Everything for sale, cheapest first
pub fn shop_stock(catalog: &Catalog) -> Vec<&Item> {
    let mut stock: Vec<&Item> = catalog
        .items()
        .filter(|item| item.is_gear() && item.cost < SHOP_PRICE_CEILING)
        .collect();
    stock.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.name.cmp(&b.name)));
    stock
}

/// Buy one copy of a stocked item
pub fn buy(player: &mut Player, catalog: &Catalog, id: &ItemId) -> Result<Item, HubError> {
    let item = catalog
        .item(id)
        .ok_or_else(|| HubError::UnknownItem(id.clone()))?;
    if !item.is_gear() || item.cost >= SHOP_PRICE_CEILING {
        return Err(HubError::NotForSale(id.clone()));
    }
    require_gold(player.gold, item.cost)?;

    player.gold -= item.cost;
    player.inventory.push(item.clone());
    debug!(item = %item.name, cost = item.cost, gold = player.gold, "Bought item");
    Ok(item.clone())
}

/// Sell the inventory entry at `index`. Returns the gold received.
pub fn sell(player: &mut Player, index: usize) -> Result<u32, HubError> {
    if index >= player.inventory.len() {
        return Err(HubError::InvalidIndex(index));
    }
    let item = player.inventory.remove(index);
    let price = item.sell_price();
    player.gold += price;
    debug!(item = %item.name, price, gold = player.gold, "Sold item");
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::test_support::recruit;

    #[test]
    fn test_stock_excludes_expensive_and_materials() {
        let catalog = Catalog::standard();
        let stock = shop_stock(&catalog);
        assert!(!stock.is_empty());
        assert!(stock.iter().all(|i| i.is_gear() && i.cost < SHOP_PRICE_CEILING));
        assert!(stock.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert!(!stock.iter().any(|i| i.id.as_str() == "item_armor_006"));
    }

    #[test]
    fn test_buy_deducts_gold() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.gold = 200;
        let item = buy(&mut player, &catalog, &ItemId::new("item_weapon_002")).unwrap();
        assert_eq!(item.name, "Calibrated Laser Rifle");
        assert_eq!(player.gold, 50);
        assert_eq!(player.inventory.len(), 1);
    }

    #[test]
    fn test_buy_rejected_without_gold() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        let before = player.clone();
        assert_eq!(
            buy(&mut player, &catalog, &ItemId::new("item_weapon_003")),
            Err(HubError::InsufficientGold {
                required: 350,
                available: 50
            })
        );
        assert_eq!(player, before);
    }

    #[test]
    fn test_buy_rejects_unstocked() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.gold = 5000;
        let epic = ItemId::new("item_armor_004");
        assert_eq!(buy(&mut player, &catalog, &epic), Err(HubError::NotForSale(epic)));
        let scrap = ItemId::new("mat_scrap");
        assert_eq!(buy(&mut player, &catalog, &scrap), Err(HubError::NotForSale(scrap)));
    }

    #[test]
    fn test_sell_pays_half_rounded_down() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        if let Some(item) = catalog.item(&ItemId::new("mat_scrap")) {
            player.inventory.push(item.clone());
        }
        assert_eq!(sell(&mut player, 0), Ok(2));
        assert_eq!(player.gold, 52);
        assert!(player.inventory.is_empty());
        assert_eq!(sell(&mut player, 0), Err(HubError::InvalidIndex(0)));
    }
}
