//! Game controller
//!
//! Owns the player, the catalog and at most one combat session. Every hub
//! action is refused while a session is active, and every cue produced by
//! the engine is forwarded to the sound sink.

use gladiator_audio::{MusicTrack, SoundCue, SoundSink};
use gladiator_core::{ArenaId, ItemId, RecipeId, SkillId, StatKind};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::combat::arena::Arena;
use crate::combat::combatant::Combatant;
use crate::combat::item::{Item, ItemSlot};
use crate::combat::session::{ActionError, CombatSession, PlayerAction, TurnPhase, TurnReport};
use crate::hub::{self, HubError};
use crate::player::{self, create_player, CharacterDraft, CreationError, Player, WinRewards};
use crate::storage::{SaveError, SaveRecord, SaveStorage, SAVE_KEY};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Hub(#[from] HubError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Creation(#[from] CreationError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// How a finished encounter ended
#[derive(Debug, Clone, PartialEq)]
pub enum CombatOutcome {
    Victory(WinRewards),
    Defeat,
}

pub struct Game {
    player: Player,
    catalog: Catalog,
    session: Option<CombatSession>,
    sink: Box<dyn SoundSink>,
}

impl Game {
    pub fn new(catalog: Catalog, player: Player, mut sink: Box<dyn SoundSink>) -> Self {
        sink.play_music(MusicTrack::Hub);
        Self {
            player,
            catalog,
            session: None,
            sink,
        }
    }

    /// Create a new character and enter the hub
    pub fn create(catalog: Catalog, draft: CharacterDraft, mut sink: Box<dyn SoundSink>) -> Result<Self, GameError> {
        let player = create_player(draft, &catalog)?;
        sink.play_sound(&SoundCue::CharacterCreated);
        Ok(Self::new(catalog, player, sink))
    }

    /// Resume from the save slot; `None` when nothing has been saved
    pub fn load(
        catalog: Catalog,
        storage: &dyn SaveStorage,
        sink: Box<dyn SoundSink>,
    ) -> Result<Option<Self>, GameError> {
        let Some(data) = storage.read(SAVE_KEY)? else {
            return Ok(None);
        };
        let record = SaveRecord::from_json(&data)?;
        info!(name = %record.player.name, saved_at = %record.saved_at, "Save loaded");
        Ok(Some(Self::new(catalog, record.player, sink)))
    }

    pub fn has_save(storage: &dyn SaveStorage) -> bool {
        matches!(storage.read(SAVE_KEY), Ok(Some(_)))
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.session.as_ref()
    }

    pub fn in_combat(&self) -> bool {
        self.session.is_some()
    }

    pub fn sink_mut(&mut self) -> &mut dyn SoundSink {
        self.sink.as_mut()
    }

    fn ensure_idle(&self) -> Result<(), HubError> {
        if self.session.is_some() {
            return Err(HubError::CombatInProgress);
        }
        Ok(())
    }

    fn emit(&mut self, cue: SoundCue) {
        self.sink.play_sound(&cue);
    }

    fn play_report(&mut self, report: &TurnReport) {
        for cue in &report.cues {
            self.sink.play_sound(cue);
        }
    }

    /// Arenas the player may enter at their current level
    pub fn unlocked_arenas(&self) -> Vec<&Arena> {
        self.catalog
            .arenas()
            .iter()
            .filter(|arena| arena.is_unlocked(self.player.level))
            .collect()
    }

    // --- Combat ---

    /// Spawn a random enemy of the arena and open a session
    pub fn start_fight(&mut self, arena_id: &ArenaId, rng: &mut impl Rng) -> Result<&CombatSession, GameError> {
        self.ensure_idle()?;
        let arena = self
            .catalog
            .arena(arena_id)
            .ok_or_else(|| HubError::UnknownArena(arena_id.clone()))?;
        if !arena.is_unlocked(self.player.level) {
            return Err(HubError::ArenaLocked {
                arena: arena.name.clone(),
                required: arena.level_range.0,
            }
            .into());
        }
        let template = arena
            .pick_enemy(rng)
            .and_then(|id| self.catalog.enemy(id))
            .ok_or_else(|| HubError::EmptyArena(arena_id.clone()))?;

        let enemy = template.spawn(self.player.ng_plus);
        let fighter = Combatant::from_player(&self.player, self.catalog.skills_for(&self.player.skills));
        let session = CombatSession::new(fighter, enemy, arena.clone());
        info!(arena = %arena.name, enemy = %session.enemy_info().name, "Fight started");

        self.sink.play_music(MusicTrack::Combat);
        Ok(self.session.insert(session))
    }

    /// Run the next automatic stage of the active session
    pub fn step(&mut self, rng: &mut impl Rng) -> Result<Option<TurnReport>, GameError> {
        let session = self.session.as_mut().ok_or(HubError::NoActiveCombat)?;
        let report = session.step(rng);
        if let Some(report) = &report {
            self.play_report(report);
        }
        Ok(report)
    }

    /// Resolve the player's action in the active session
    pub fn act(&mut self, action: PlayerAction, rng: &mut impl Rng) -> Result<TurnReport, GameError> {
        let session = self.session.as_mut().ok_or(HubError::NoActiveCombat)?;
        let report = session.player_action(action, rng)?;
        self.play_report(&report);
        Ok(report)
    }

    /// Close a finished session and apply its outcome to the player
    pub fn finish(&mut self, rng: &mut impl Rng) -> Result<CombatOutcome, GameError> {
        let phase = self
            .session
            .as_ref()
            .map(CombatSession::phase)
            .ok_or(HubError::NoActiveCombat)?;
        if !phase.is_over() {
            return Err(HubError::CombatInProgress.into());
        }
        let Some(session) = self.session.take() else {
            return Err(HubError::NoActiveCombat.into());
        };

        player::fold_back(&mut self.player, session.player());
        let outcome = match phase {
            TurnPhase::Won => {
                let rewards = player::resolve_win(&mut self.player, session.enemy_info(), &self.catalog, rng);
                for _ in &rewards.levels_gained {
                    self.emit(SoundCue::LevelUp);
                }
                CombatOutcome::Victory(rewards)
            }
            _ => {
                player::resolve_loss(&mut self.player);
                CombatOutcome::Defeat
            }
        };
        debug!(session = %session.id, turns = session.turn(), "Session closed");

        self.sink.play_music(MusicTrack::Hub);
        Ok(outcome)
    }

    // --- Hub ---

    pub fn buy(&mut self, id: &ItemId) -> Result<Item, GameError> {
        self.ensure_idle()?;
        let item = hub::buy(&mut self.player, &self.catalog, id)?;
        self.emit(SoundCue::BuyItem);
        Ok(item)
    }

    pub fn sell(&mut self, index: usize) -> Result<u32, GameError> {
        self.ensure_idle()?;
        let price = hub::sell(&mut self.player, index)?;
        self.emit(SoundCue::SellItem);
        Ok(price)
    }

    pub fn equip(&mut self, index: usize) -> Result<Item, GameError> {
        self.ensure_idle()?;
        let item = hub::equip(&mut self.player, index)?;
        self.emit(SoundCue::EquipItem);
        Ok(item)
    }

    pub fn unequip(&mut self, slot: ItemSlot) -> Result<Item, GameError> {
        self.ensure_idle()?;
        let item = hub::unequip(&mut self.player, slot)?;
        self.emit(SoundCue::EquipItem);
        Ok(item)
    }

    pub fn sort_inventory(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        hub::sort_inventory(&mut self.player);
        self.emit(SoundCue::UiClick);
        Ok(())
    }

    pub fn optimize_gear(&mut self) -> Result<Vec<Item>, GameError> {
        self.ensure_idle()?;
        let changed = hub::optimize_gear(&mut self.player);
        if !changed.is_empty() {
            self.emit(SoundCue::EquipItem);
        }
        Ok(changed)
    }

    pub fn learn_skill(&mut self, id: &SkillId) -> Result<String, GameError> {
        self.ensure_idle()?;
        let name = hub::learn_skill(&mut self.player, &self.catalog, id)?.name.clone();
        self.emit(SoundCue::LearnSkill);
        Ok(name)
    }

    pub fn buy_trainer_skill(&mut self, id: &SkillId) -> Result<String, GameError> {
        self.ensure_idle()?;
        let name = hub::buy_trainer_skill(&mut self.player, &self.catalog, id)?.name.clone();
        self.emit(SoundCue::LearnSkill);
        Ok(name)
    }

    pub fn train_stat(&mut self, stat: StatKind) -> Result<u32, GameError> {
        self.ensure_idle()?;
        let cost = hub::train_stat(&mut self.player, stat)?;
        self.emit(SoundCue::TrainStat);
        Ok(cost)
    }

    pub fn craft(&mut self, id: &RecipeId) -> Result<Item, GameError> {
        self.ensure_idle()?;
        let item = hub::craft(&mut self.player, &self.catalog, id)?;
        self.emit(SoundCue::CraftItem);
        Ok(item)
    }

    /// Prestige reset; `confirmed` must come from an explicit user prompt
    pub fn new_game_plus(&mut self, confirmed: bool) -> Result<(), GameError> {
        self.ensure_idle()?;
        player::new_game_plus(&mut self.player, &self.catalog, confirmed)?;
        self.emit(SoundCue::NgPlusStart);
        Ok(())
    }

    /// Write the player to the save slot
    pub fn save(&mut self, storage: &mut dyn SaveStorage) -> Result<(), GameError> {
        self.ensure_idle()?;
        let record = SaveRecord::new(self.player.clone());
        storage.write(SAVE_KEY, &record.to_json()?)?;
        info!(name = %self.player.name, level = self.player.level, "Game saved");
        self.emit(SoundCue::SaveGame);
        Ok(())
    }
}
