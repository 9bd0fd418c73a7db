//! Out-of-combat collaborators
//!
//! Everything the player does between fights: shopping, training, learning
//! skills, crafting and managing gear. Every operation validates first and
//! only then mutates, so a rejected action leaves the player untouched.

pub mod inventory;
pub mod shop;
pub mod skills;
pub mod trainer;
pub mod workshop;

use gladiator_core::{ArenaId, ItemId, RecipeId, SkillId};
use thiserror::Error;

pub use inventory::{equip, optimize_gear, sort_inventory, unequip};
pub use shop::{buy, sell, shop_stock, SHOP_PRICE_CEILING};
pub use skills::{can_learn, learn_skill};
pub use trainer::{buy_trainer_skill, train_stat, training_cost};
pub use workshop::{can_craft, craft};

/// Why a hub action was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u32, available: u32 },
    #[error("no skill points available")]
    InsufficientSkillPoints,
    #[error("missing materials: need {required} {item}, have {owned}")]
    MissingMaterials { item: String, required: u32, owned: u32 },
    #[error("required base item {0} is not in the inventory")]
    MissingBaseItem(ItemId),
    #[error("requires level {required} (currently {current})")]
    LevelTooLow { required: u32, current: u32 },
    #[error("prerequisite skill {0} not learned")]
    MissingPrerequisite(SkillId),
    #[error("skill {0} already learned")]
    AlreadyKnown(SkillId),
    #[error("no inventory item at index {0}")]
    InvalidIndex(usize),
    #[error("{0} cannot be equipped")]
    NotGear(String),
    #[error("nothing equipped in that slot")]
    EmptySlot,
    #[error("this action needs explicit confirmation")]
    ConfirmationRequired,
    #[error("not available during combat")]
    CombatInProgress,
    #[error("no combat in progress")]
    NoActiveCombat,
    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),
    #[error("unknown item {0}")]
    UnknownItem(ItemId),
    #[error("unknown recipe {0}")]
    UnknownRecipe(RecipeId),
    #[error("unknown arena {0}")]
    UnknownArena(ArenaId),
    #[error("arena {0} has no enemies")]
    EmptyArena(ArenaId),
    #[error("{0} is not sold in the shop")]
    NotForSale(ItemId),
    #[error("{arena} unlocks at level {required}")]
    ArenaLocked { arena: String, required: u32 },
    #[error("{0} is not taught by the trainer")]
    NotATrainerSkill(SkillId),
    #[error("{0} is not in your class skill tree")]
    NotInClassTree(SkillId),
}

/// Reject when the player cannot pay
pub(crate) fn require_gold(available: u32, required: u32) -> Result<(), HubError> {
    if available < required {
        return Err(HubError::InsufficientGold {
            required,
            available,
        });
    }
    Ok(())
}
