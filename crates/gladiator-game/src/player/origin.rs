//! Race, class and gender choices made at character creation

use std::fmt;

use gladiator_core::Stats;
use serde::{Deserialize, Serialize};

/// Playable species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Cyborg,
    Zylorian,
}

impl Race {
    pub fn all() -> &'static [Race] {
        &[Self::Human, Self::Cyborg, Self::Zylorian]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Cyborg => "Cyborg",
            Self::Zylorian => "Zylorian",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Human => "Versatile and adaptable, humans are found in every corner of the galaxy. They receive a bonus to all stats.",
            Self::Cyborg => "Beings of flesh and steel, cyborgs are durable and powerful, excelling in direct combat.",
            Self::Zylorian => "A slender, enigmatic alien race known for their sharp minds and quick reflexes.",
        }
    }

    pub fn stat_bonuses(self) -> Stats {
        match self {
            Self::Human => Stats::uniform(1),
            Self::Cyborg => Stats::new(2, 0, 0, 2, 0),
            Self::Zylorian => Stats::new(0, 2, 2, 0, 0),
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Combat discipline; selects the skill tree available for skill points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Soldier,
    Scoundrel,
    Mystic,
}

impl PlayerClass {
    pub fn all() -> &'static [PlayerClass] {
        &[Self::Soldier, Self::Scoundrel, Self::Mystic]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Soldier => "Soldier",
            Self::Scoundrel => "Scoundrel",
            Self::Mystic => "Mystic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Soldier => "A trained warrior, disciplined and tough. You excel with all forms of combat.",
            Self::Scoundrel => "A survivor from the galactic underworld. You are resourceful, quick-fingered, and lucky.",
            Self::Mystic => "Your mind is your greatest weapon. You wield cosmic energies, bending reality to your will.",
        }
    }

    pub fn stat_bonuses(self) -> Stats {
        match self {
            Self::Soldier => Stats::new(2, 0, 0, 1, 0),
            Self::Scoundrel => Stats::new(0, 2, 0, 0, 1),
            Self::Mystic => Stats::new(0, 0, 3, 0, 0),
        }
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Self::Male, Self::Female, Self::NonBinary]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-binary",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Starting stat floor for a race/class pair before free points: 5 + bonuses
pub fn origin_stats(race: Race, class: PlayerClass) -> Stats {
    Stats::uniform(super::BASE_STAT) + race.stat_bonuses() + class.stat_bonuses()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_totals() {
        assert_eq!(Race::Human.stat_bonuses().total(), 5);
        assert_eq!(Race::Cyborg.stat_bonuses().total(), 4);
        assert_eq!(PlayerClass::Mystic.stat_bonuses().intelligence, 3);
        assert_eq!(PlayerClass::Scoundrel.stat_bonuses().luck, 1);
    }

    #[test]
    fn test_origin_stats() {
        let stats = origin_stats(Race::Cyborg, PlayerClass::Soldier);
        assert_eq!(stats, Stats::new(9, 5, 5, 8, 5));
    }

    #[test]
    fn test_names() {
        assert_eq!(Gender::NonBinary.to_string(), "Non-binary");
        assert_eq!(Race::Zylorian.to_string(), "Zylorian");
        assert_eq!(PlayerClass::all().len(), 3);
    }
}
