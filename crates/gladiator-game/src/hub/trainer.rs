//! The trainer: stat training and gold-priced skills

use gladiator_core::{SkillId, StatKind};
use tracing::info;

use super::skills::{check_requirements, grant_skill};
use super::{require_gold, HubError};
use crate::catalog::{Catalog, TreeOwner};
use crate::combat::skill::Skill;
use crate::player::Player;

/// Gold per player level for one point of training
pub const TRAINING_COST_PER_LEVEL: u32 = 50;

pub fn training_cost(level: u32) -> u32 {
    level * TRAINING_COST_PER_LEVEL
}

/// Pay `level × 50` gold for +1 in a stat. Returns the gold spent.
///
/// Constitution and intelligence raise max and current health or mana with it.
pub fn train_stat(player: &mut Player, stat: StatKind) -> Result<u32, HubError> {
    let cost = training_cost(player.level);
    require_gold(player.gold, cost)?;

    player.gold -= cost;
    player.adjust(|p| *p.stats.get_mut(stat) += 1);
    info!(name = %player.name, stat = %stat, cost, "Stat trained");
    Ok(cost)
}

/// Buy a skill from the trainer tree for its gold price
pub fn buy_trainer_skill<'a>(player: &mut Player, catalog: &'a Catalog, id: &SkillId) -> Result<&'a Skill, HubError> {
    let skill = catalog
        .skill(id)
        .ok_or_else(|| HubError::UnknownSkill(id.clone()))?;
    let taught = catalog
        .tree(TreeOwner::Trainer)
        .is_some_and(|tree| tree.skills.contains(id));
    let Some(price) = skill.cost.filter(|_| taught) else {
        return Err(HubError::NotATrainerSkill(id.clone()));
    };
    check_requirements(player, skill)?;
    require_gold(player.gold, price)?;

    player.gold -= price;
    grant_skill(player, skill);
    Ok(skill)
}
