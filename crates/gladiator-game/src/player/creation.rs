//! Character creation: point allocation and the fresh player record

use gladiator_core::{ItemId, StatKind, Stats};
use thiserror::Error;
use tracing::info;

use super::origin::{Gender, PlayerClass, Race};
use super::progression::xp_to_next_level;
use super::{Player, BASE_STAT};
use crate::catalog::Catalog;
use crate::combat::equipment::EquipmentSet;
use crate::combat::status::StatusManager;

/// Points to distribute on top of the base stats
pub const FREE_POINTS: i32 = 5;
/// No stat may be lowered below this
pub const MIN_STAT: i32 = 1;
pub const STARTING_GOLD: u32 = 50;
pub const STARTING_WEAPON: &str = "item_weapon_001";
pub const STARTING_ARMOR: &str = "item_armor_001";
pub const DEFAULT_BACKSTORY: &str = "A mysterious warrior with a past yet to be written.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationError {
    #[error("a name is required")]
    EmptyName,
    #[error("no points left to spend")]
    NoPointsRemaining,
    #[error("{0} cannot go below 1")]
    StatAtMinimum(StatKind),
    #[error("{spent} points allocated but only {available} are available")]
    Overspent { spent: i32, available: i32 },
}

/// Base stats plus the free points spent so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointAllocation {
    stats: Stats,
}

impl Default for PointAllocation {
    fn default() -> Self {
        Self {
            stats: Stats::uniform(BASE_STAT),
        }
    }
}

impl PointAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from explicit values (validated by `create_player`)
    pub fn from_stats(stats: Stats) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Negative when overspent
    pub fn points_remaining(&self) -> i32 {
        FREE_POINTS - (self.stats.total() - BASE_STAT * StatKind::all().len() as i32)
    }

    pub fn raise(&mut self, kind: StatKind) -> Result<(), CreationError> {
        if self.points_remaining() <= 0 {
            return Err(CreationError::NoPointsRemaining);
        }
        *self.stats.get_mut(kind) += 1;
        Ok(())
    }

    pub fn lower(&mut self, kind: StatKind) -> Result<(), CreationError> {
        if self.stats.get(kind) <= MIN_STAT {
            return Err(CreationError::StatAtMinimum(kind));
        }
        *self.stats.get_mut(kind) -= 1;
        Ok(())
    }

    fn validate(&self) -> Result<(), CreationError> {
        if let Some(&kind) = StatKind::all().iter().find(|k| self.stats.get(**k) < MIN_STAT) {
            return Err(CreationError::StatAtMinimum(kind));
        }
        if self.points_remaining() < 0 {
            return Err(CreationError::Overspent {
                spent: FREE_POINTS - self.points_remaining(),
                available: FREE_POINTS,
            });
        }
        Ok(())
    }
}

/// Everything chosen on the creation screen
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterDraft {
    pub name: String,
    pub gender: Gender,
    pub race: Race,
    pub class: PlayerClass,
    pub backstory: String,
    pub allocation: PointAllocation,
}

impl CharacterDraft {
    pub fn new(name: &str, gender: Gender, race: Race, class: PlayerClass) -> Self {
        Self {
            name: name.to_string(),
            gender,
            race,
            class,
            backstory: String::new(),
            allocation: PointAllocation::new(),
        }
    }

    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    pub fn with_allocation(mut self, allocation: PointAllocation) -> Self {
        self.allocation = allocation;
        self
    }

    /// Final base stats: allocation + race + class
    pub fn final_stats(&self) -> Stats {
        self.allocation.stats() + self.race.stat_bonuses() + self.class.stat_bonuses()
    }
}

/// Basic Laser Pistol and Worn Plasteel Vest
pub fn starting_equipment(catalog: &Catalog) -> EquipmentSet {
    EquipmentSet {
        weapon: catalog.item(&ItemId::new(STARTING_WEAPON)).cloned(),
        armor: catalog.item(&ItemId::new(STARTING_ARMOR)).cloned(),
        implant: None,
    }
}

/// Build a level-1 player from a draft
pub fn create_player(draft: CharacterDraft, catalog: &Catalog) -> Result<Player, CreationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(CreationError::EmptyName);
    }
    draft.allocation.validate()?;

    let backstory = match draft.backstory.trim() {
        "" => DEFAULT_BACKSTORY.to_string(),
        text => text.to_string(),
    };

    let mut player = Player {
        name: name.to_string(),
        gender: draft.gender,
        race: draft.race,
        class: draft.class,
        backstory,
        level: 1,
        xp: 0,
        xp_to_next_level: xp_to_next_level(1),
        gold: STARTING_GOLD,
        stats: draft.final_stats(),
        current_health: 0,
        current_mana: 0,
        equipment: starting_equipment(catalog),
        inventory: Vec::new(),
        skills: Vec::new(),
        skill_points: 0,
        statuses: StatusManager::new(),
        ng_plus: 0,
    };
    player.restore();

    info!(
        name = %player.name,
        race = %player.race,
        class = %player.class,
        "Character created"
    );
    Ok(player)
}
