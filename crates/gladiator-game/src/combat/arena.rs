//! Arenas and their environmental effects

use gladiator_core::{ArenaId, EnemyId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::damage_type::DamageType;
use super::status::StatusEffect;

/// A modifier the arena imposes on every combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnvironmentalEffect {
    /// Always-on multiplier for one damage type
    DamageModifier {
        damage_type: DamageType,
        multiplier: f64,
        description: String,
    },
    /// Rolled at the start of every player turn; on success both combatants are afflicted
    TurnEffect {
        status: StatusEffect,
        chance: f64,
        description: String,
    },
}

impl EnvironmentalEffect {
    pub fn description(&self) -> &str {
        match self {
            Self::DamageModifier { description, .. } | Self::TurnEffect { description, .. } => {
                description
            }
        }
    }
}

/// A combat venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub id: ArenaId,
    pub name: String,
    pub description: String,
    /// Recommended (min, max) player level; min is the unlock level
    pub level_range: (u32, u32),
    pub possible_enemies: Vec<EnemyId>,
    pub effects: Vec<EnvironmentalEffect>,
}

impl Arena {
    /// Whether a player of this level may enter
    pub fn is_unlocked(&self, player_level: u32) -> bool {
        player_level >= self.level_range.0
    }

    /// Pick one of the arena's enemy templates uniformly
    pub fn pick_enemy(&self, rng: &mut impl Rng) -> Option<&EnemyId> {
        self.possible_enemies.choose(rng)
    }

    /// Roll every turn effect; returns the statuses that triggered this turn
    pub fn roll_turn_effects(&self, rng: &mut impl Rng) -> Vec<StatusEffect> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                EnvironmentalEffect::TurnEffect { status, chance, .. } => {
                    (rng.gen::<f64>() < *chance).then_some(*status)
                }
                EnvironmentalEffect::DamageModifier { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::StatusKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena(chance: f64) -> Arena {
        Arena {
            id: ArenaId::new("arena_test"),
            name: "Test Pit".into(),
            description: String::new(),
            level_range: (3, 5),
            possible_enemies: vec![EnemyId::new("enemy_001"), EnemyId::new("enemy_002")],
            effects: vec![
                EnvironmentalEffect::DamageModifier {
                    damage_type: DamageType::Fire,
                    multiplier: 1.25,
                    description: "+25% Fire Damage".into(),
                },
                EnvironmentalEffect::TurnEffect {
                    status: StatusEffect::new(StatusKind::Burn, 1, 4),
                    chance,
                    description: "Burn".into(),
                },
            ],
        }
    }

    #[test]
    fn test_unlock_uses_minimum_level() {
        let a = arena(0.2);
        assert!(!a.is_unlocked(2));
        assert!(a.is_unlocked(3));
        assert!(a.is_unlocked(10));
    }

    #[test]
    fn test_turn_effect_certain_and_impossible() {
        let mut rng = StdRng::seed_from_u64(7);
        let always = arena(1.0).roll_turn_effects(&mut rng);
        assert_eq!(always, vec![StatusEffect::new(StatusKind::Burn, 1, 4)]);
        let never = arena(0.0).roll_turn_effects(&mut rng);
        assert!(never.is_empty());
    }

    #[test]
    fn test_pick_enemy_from_pool() {
        let a = arena(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let picked = a.pick_enemy(&mut rng);
            assert!(picked.is_some_and(|id| a.possible_enemies.contains(id)));
        }
    }
}
