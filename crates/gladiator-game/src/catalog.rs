//! Static data tables
//!
//! Items, enemies, skills, arenas and recipes keyed by stable ids. Built once
//! at startup and never mutated while the game runs. Cross references are
//! checked by [`Catalog::validate`], which the test suite runs against the
//! built-in content.

use std::collections::HashMap;
use std::fmt;

use gladiator_core::{ArenaId, EnemyId, ItemId, RecipeId, SkillId};
use serde::{Deserialize, Serialize};

use crate::combat::arena::Arena;
use crate::combat::enemy::EnemyTemplate;
use crate::combat::item::Item;
use crate::combat::skill::Skill;
use crate::content;
use crate::player::PlayerClass;

/// Who teaches the skills of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeOwner {
    /// Learned with skill points by members of this class
    Class(PlayerClass),
    /// Bought for gold from the trainer
    Trainer,
}

impl fmt::Display for TreeOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, "{class}"),
            Self::Trainer => f.write_str("Trainer"),
        }
    }
}

/// An ordered group of skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTree {
    pub id: String,
    pub name: String,
    pub owner: TreeOwner,
    pub skills: Vec<SkillId>,
}

/// Materials (and for modifications, a base item) turned into a new item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub result: ItemId,
    /// Item consumed by a modification; `None` for plain crafting
    pub base_item: Option<ItemId>,
    pub materials: Vec<(ItemId, u32)>,
    pub cost: u32,
}

impl Recipe {
    pub fn crafting(id: &str, result: &str, materials: &[(&str, u32)], cost: u32) -> Self {
        Self {
            id: RecipeId::new(id),
            result: ItemId::new(result),
            base_item: None,
            materials: materials
                .iter()
                .map(|(item, count)| (ItemId::new(*item), *count))
                .collect(),
            cost,
        }
    }

    pub fn modification(id: &str, base: &str, result: &str, materials: &[(&str, u32)], cost: u32) -> Self {
        Self {
            base_item: Some(ItemId::new(base)),
            ..Self::crafting(id, result, materials, cost)
        }
    }

    pub fn is_modification(&self) -> bool {
        self.base_item.is_some()
    }
}

/// All static game content
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<ItemId, Item>,
    enemies: HashMap<EnemyId, EnemyTemplate>,
    skills: HashMap<SkillId, Skill>,
    trees: Vec<SkillTree>,
    arenas: Vec<Arena>,
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Galactic Gladiator content
    pub fn standard() -> Self {
        content::standard_catalog()
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn add_enemy(&mut self, enemy: EnemyTemplate) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    /// Register a tree and the skills it contains, in order
    pub fn add_tree(&mut self, id: &str, name: &str, owner: TreeOwner, skills: Vec<Skill>) {
        let ids = skills.iter().map(|s| s.id.clone()).collect();
        for skill in skills {
            self.skills.insert(skill.id.clone(), skill);
        }
        self.trees.push(SkillTree {
            id: id.to_string(),
            name: name.to_string(),
            owner,
            skills: ids,
        });
    }

    pub fn add_arena(&mut self, arena: Arena) {
        self.arenas.push(arena);
    }

    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn enemy(&self, id: &EnemyId) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Catalog entries for the given ids, skipping unknown ones
    pub fn skills_for(&self, ids: &[SkillId]) -> Vec<Skill> {
        ids.iter().filter_map(|id| self.skill(id)).cloned().collect()
    }

    pub fn trees(&self) -> &[SkillTree] {
        &self.trees
    }

    pub fn tree(&self, owner: TreeOwner) -> Option<&SkillTree> {
        self.trees.iter().find(|t| t.owner == owner)
    }

    /// The tree a skill belongs to
    pub fn tree_of(&self, id: &SkillId) -> Option<&SkillTree> {
        self.trees.iter().find(|t| t.skills.contains(id))
    }

    /// Skills of a tree in display order
    pub fn tree_skills(&self, owner: TreeOwner) -> Vec<&Skill> {
        self.tree(owner)
            .map(|tree| tree.skills.iter().filter_map(|id| self.skill(id)).collect())
            .unwrap_or_default()
    }

    pub fn arenas(&self) -> &[Arena] {
        &self.arenas
    }

    pub fn arena(&self, id: &ArenaId) -> Option<&Arena> {
        self.arenas.iter().find(|a| &a.id == id)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    /// Every dangling cross reference, as readable messages
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut check_item = |id: &ItemId, context: &str| {
            if !self.items.contains_key(id) {
                problems.push(format!("{context}: unknown item {id}"));
            }
        };

        for enemy in self.enemies.values() {
            for entry in &enemy.loot {
                check_item(&entry.item, &format!("enemy {}", enemy.id));
            }
        }
        for recipe in &self.recipes {
            let context = format!("recipe {}", recipe.id);
            check_item(&recipe.result, &context);
            if let Some(base) = &recipe.base_item {
                check_item(base, &context);
            }
            for (material, _) in &recipe.materials {
                check_item(material, &context);
            }
        }
        for id in [
            crate::player::creation::STARTING_WEAPON,
            crate::player::creation::STARTING_ARMOR,
        ] {
            check_item(&ItemId::new(id), "starting gear");
        }

        for arena in &self.arenas {
            for enemy in &arena.possible_enemies {
                if !self.enemies.contains_key(enemy) {
                    problems.push(format!("arena {}: unknown enemy {enemy}", arena.id));
                }
            }
        }
        for skill in self.skills.values() {
            for prerequisite in &skill.prerequisites {
                if !self.skills.contains_key(prerequisite) {
                    problems.push(format!("skill {}: unknown prerequisite {prerequisite}", skill.id));
                }
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::item::{ItemCategory, ItemRarity};

    #[test]
    fn test_standard_catalog_is_consistent() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.validate(), Vec::<String>::new());
    }

    #[test]
    fn test_standard_catalog_counts() {
        let catalog = Catalog::standard();
        let gear = catalog.items().filter(|i| i.category == ItemCategory::Gear).count();
        let materials = catalog.items().filter(|i| i.category == ItemCategory::Material).count();
        assert_eq!(gear, 25);
        assert_eq!(materials, 6);
        assert_eq!(catalog.trees().len(), 4);
        assert_eq!(catalog.arenas().len(), 3);
        assert_eq!(catalog.recipes().iter().filter(|r| r.is_modification()).count(), 3);
        assert_eq!(catalog.recipes().len(), 5);
    }

    #[test]
    fn test_tree_lookup() {
        let catalog = Catalog::standard();
        let mystic = catalog.tree_skills(TreeOwner::Class(PlayerClass::Mystic));
        assert_eq!(mystic.first().map(|s| s.id.as_str()), Some("mana_bolt"));
        assert_eq!(mystic.len(), 4);
        let trainer = catalog.tree(TreeOwner::Trainer).map(|t| t.id.as_str());
        assert_eq!(trainer, Some("trainer_tree"));
        assert_eq!(
            catalog.tree_of(&SkillId::new("double_tap")).map(|t| t.owner),
            Some(TreeOwner::Class(PlayerClass::Scoundrel))
        );
    }

    #[test]
    fn test_validate_reports_dangling_refs() {
        let mut catalog = Catalog::new();
        catalog.add_item(Item::material("mat_scrap", "Scrap Metal", ItemRarity::Common, 5));
        catalog.add_recipe(Recipe::crafting("broken", "item_missing", &[("mat_scrap", 1)], 10));
        let problems = catalog.validate();
        assert!(problems.iter().any(|p| p.contains("item_missing")));
        assert!(problems.iter().any(|p| p.contains("starting gear")));
    }

    #[test]
    fn test_skills_for_skips_unknown() {
        let catalog = Catalog::standard();
        let skills = catalog.skills_for(&[SkillId::new("power_shot"), SkillId::new("nope")]);
        assert_eq!(skills.len(), 1);
    }
}
