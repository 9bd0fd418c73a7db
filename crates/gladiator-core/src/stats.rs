//! Character attribute block
//!
//! Every combatant and every piece of gear is described by the same five
//! integer attributes. Gear bonuses may be negative.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five core attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Strength,
    Dexterity,
    Intelligence,
    Constitution,
    Luck,
}

impl StatKind {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Intelligence => "Intelligence",
            Self::Constitution => "Constitution",
            Self::Luck => "Luck",
        }
    }

    /// Three-letter abbreviation used on the character sheet
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Intelligence => "INT",
            Self::Constitution => "CON",
            Self::Luck => "LCK",
        }
    }

    /// All attributes in sheet order
    pub fn all() -> &'static [StatKind] {
        &[
            Self::Strength,
            Self::Dexterity,
            Self::Intelligence,
            Self::Constitution,
            Self::Luck,
        ]
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unrecognised attribute name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stat '{0}'")]
pub struct UnknownStat(pub String);

impl FromStr for StatKind {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Ok(Self::Strength),
            "dex" | "dexterity" => Ok(Self::Dexterity),
            "int" | "intelligence" => Ok(Self::Intelligence),
            "con" | "constitution" => Ok(Self::Constitution),
            "lck" | "luck" => Ok(Self::Luck),
            _ => Err(UnknownStat(s.to_string())),
        }
    }
}

/// The five-attribute block shared by players, enemies and gear bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub constitution: i32,
    pub luck: i32,
}

impl Stats {
    pub fn new(strength: i32, dexterity: i32, intelligence: i32, constitution: i32, luck: i32) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            constitution,
            luck,
        }
    }

    /// Every attribute set to the same value
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value)
    }

    /// A block with a single attribute set, the rest zero
    pub fn single(kind: StatKind, value: i32) -> Self {
        let mut stats = Self::default();
        *stats.get_mut(kind) = value;
        stats
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Dexterity => self.dexterity,
            StatKind::Intelligence => self.intelligence,
            StatKind::Constitution => self.constitution,
            StatKind::Luck => self.luck,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Constitution => &mut self.constitution,
            StatKind::Luck => &mut self.luck,
        }
    }

    /// Sum of all five attributes
    pub fn total(&self) -> i32 {
        StatKind::all().iter().map(|&k| self.get(k)).sum()
    }

    /// Multiply every attribute by `factor`, flooring each result
    pub fn scaled(&self, factor: f64) -> Stats {
        let scale = |v: i32| (v as f64 * factor).floor() as i32;
        Stats {
            strength: scale(self.strength),
            dexterity: scale(self.dexterity),
            intelligence: scale(self.intelligence),
            constitution: scale(self.constitution),
            luck: scale(self.luck),
        }
    }

    /// Whether every attribute is zero
    pub fn is_zero(&self) -> bool {
        *self == Stats::default()
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats {
            strength: self.strength + rhs.strength,
            dexterity: self.dexterity + rhs.dexterity,
            intelligence: self.intelligence + rhs.intelligence,
            constitution: self.constitution + rhs.constitution,
            luck: self.luck + rhs.luck,
        }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = StatKind::all()
            .iter()
            .map(|&k| format!("{} {}", k.abbreviation(), self.get(k)))
            .collect();
        f.write_str(&parts.join(" / "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_get_mut_agree() {
        let mut stats = Stats::new(1, 2, 3, 4, 5);
        for &kind in StatKind::all() {
            *stats.get_mut(kind) += 10;
        }
        assert_eq!(stats, Stats::new(11, 12, 13, 14, 15));
        assert_eq!(stats.get(StatKind::Constitution), 14);
    }

    #[test]
    fn test_add_signed_bonuses() {
        let base = Stats::uniform(5);
        let bonus = Stats {
            constitution: 2,
            dexterity: -1,
            ..Default::default()
        };
        let total = base + bonus;
        assert_eq!(total.constitution, 7);
        assert_eq!(total.dexterity, 4);
        assert_eq!(total.strength, 5);
    }

    #[test]
    fn test_scaled_floors_each_field() {
        let stats = Stats::new(5, 4, 2, 6, 3);
        let scaled = stats.scaled(1.75);
        assert_eq!(scaled, Stats::new(8, 7, 3, 10, 5));
    }

    #[test]
    fn test_total_and_single() {
        assert_eq!(Stats::uniform(5).total(), 25);
        let s = Stats::single(StatKind::Luck, 2);
        assert_eq!(s.luck, 2);
        assert_eq!(s.total(), 2);
        assert!(Stats::default().is_zero());
    }

    #[test]
    fn test_parse_stat_kind() {
        assert_eq!("STR".parse::<StatKind>(), Ok(StatKind::Strength));
        assert_eq!("intelligence".parse::<StatKind>(), Ok(StatKind::Intelligence));
        assert_eq!(" con ".parse::<StatKind>(), Ok(StatKind::Constitution));
        assert!("charisma".parse::<StatKind>().is_err());
    }

    #[test]
    fn test_display() {
        let text = Stats::new(1, 2, 3, 4, 5).to_string();
        assert_eq!(text, "STR 1 / DEX 2 / INT 3 / CON 4 / LCK 5");
    }
}
