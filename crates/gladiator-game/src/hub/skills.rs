//! Class skill trees, paid for with skill points

use gladiator_core::SkillId;
use tracing::info;

use super::HubError;
use crate::catalog::{Catalog, TreeOwner};
use crate::combat::skill::Skill;
use crate::player::Player;

/// Check everything except the currency (points or gold)
pub(crate) fn check_requirements(player: &Player, skill: &Skill) -> Result<(), HubError> {
    if player.knows_skill(&skill.id) {
        return Err(HubError::AlreadyKnown(skill.id.clone()));
    }
    if player.level < skill.level_required {
        return Err(HubError::LevelTooLow {
            required: skill.level_required,
            current: player.level,
        });
    }
    if let Some(missing) = skill
        .prerequisites
        .iter()
        .find(|prerequisite| !player.knows_skill(prerequisite))
    {
        return Err(HubError::MissingPrerequisite(missing.clone()));
    }
    Ok(())
}

/// Record the skill and apply a passive stat bonus once
pub(crate) fn grant_skill(player: &mut Player, skill: &Skill) {
    player.adjust(|p| {
        if let Some(passive) = skill.as_passive() {
            p.stats += passive.stat_bonus;
        }
        p.skills.push(skill.id.clone());
    });
    info!(name = %player.name, skill = %skill.name, "Skill learned");
}

/// Whether the player could learn this class skill right now
pub fn can_learn(player: &Player, catalog: &Catalog, id: &SkillId) -> Result<(), HubError> {
    let skill = catalog
        .skill(id)
        .ok_or_else(|| HubError::UnknownSkill(id.clone()))?;
    let in_class_tree = catalog
        .tree(TreeOwner::Class(player.class))
        .is_some_and(|tree| tree.skills.contains(id));
    if !in_class_tree {
        return Err(HubError::NotInClassTree(id.clone()));
    }
    check_requirements(player, skill)?;
    if player.skill_points == 0 {
        return Err(HubError::InsufficientSkillPoints);
    }
    Ok(())
}

/// Spend a skill point on a skill from the player's class tree
pub fn learn_skill<'a>(player: &mut Player, catalog: &'a Catalog, id: &SkillId) -> Result<&'a Skill, HubError> {
    can_learn(player, catalog, id)?;
    let skill = catalog
        .skill(id)
        .ok_or_else(|| HubError::UnknownSkill(id.clone()))?;

    player.skill_points -= 1;
    grant_skill(player, skill);
    Ok(skill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::test_support::recruit;

    #[test]
    fn test_learn_first_skill() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.skill_points = 1;
        let skill = learn_skill(&mut player, &catalog, &SkillId::new("power_shot")).unwrap();
        assert_eq!(skill.name, "Power Shot");
        assert_eq!(player.skill_points, 0);
        assert!(player.knows_skill(&SkillId::new("power_shot")));
    }

    #[test]
    fn test_requirements_checked_in_order() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        let heavy = SkillId::new("heavy_hitter");

        assert_eq!(
            can_learn(&player, &catalog, &heavy),
            Err(HubError::LevelTooLow {
                required: 3,
                current: 1
            })
        );
        player.level = 3;
        assert_eq!(
            can_learn(&player, &catalog, &heavy),
            Err(HubError::MissingPrerequisite(SkillId::new("power_shot")))
        );
        player.skills.push(SkillId::new("power_shot"));
        assert_eq!(can_learn(&player, &catalog, &heavy), Err(HubError::InsufficientSkillPoints));
    }

    #[test]
    fn test_other_class_tree_rejected() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.skill_points = 3;
        let bolt = SkillId::new("mana_bolt");
        let before = player.clone();
        assert_eq!(
            learn_skill(&mut player, &catalog, &bolt).map(|s| s.id.clone()),
            Err(HubError::NotInClassTree(bolt))
        );
        assert_eq!(player, before);
    }

    #[test]
    fn test_passive_bonus_applied_once() {
        let catalog = Catalog::standard();
        let mut player = recruit(&catalog);
        player.level = 3;
        player.skill_points = 2;
        player.skills.push(SkillId::new("power_shot"));
        let strength = player.stats.strength;

        assert!(learn_skill(&mut player, &catalog, &SkillId::new("heavy_hitter")).is_ok());
        assert_eq!(player.stats.strength, strength + 2);
        assert_eq!(
            learn_skill(&mut player, &catalog, &SkillId::new("heavy_hitter")).map(|s| s.id.clone()),
            Err(HubError::AlreadyKnown(SkillId::new("heavy_hitter")))
        );
        assert_eq!(player.stats.strength, strength + 2);
        assert_eq!(player.skill_points, 1);
    }
}
