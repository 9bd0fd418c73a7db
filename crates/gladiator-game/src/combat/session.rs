//! Turn scheduler / combat state machine
//!
//! One `CombatSession` owns both combatants for the length of an encounter.
//! Turns alternate `PlayerTurn -> EnemyTurn -> PlayerTurn` until one side
//! reaches zero health; `Won` and `Lost` are absorbing.
//!
//! The player turn is split in two: an automatic upkeep (arena triggers,
//! status ticks) followed by the chosen action. [`CombatSession::step`]
//! drives every automatic stage; [`CombatSession::player_action`] is only
//! accepted when [`CombatSession::needs_input`] is true.

use gladiator_audio::SoundCue;
use gladiator_core::{SessionId, SkillId};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use super::arena::Arena;
use super::combatant::Combatant;
use super::damage::{calculate_attack_damage, DamageEvent};
use super::enemy::Enemy;
use super::item::{EffectTrigger, ItemEffectKind};
use super::skill::{SkillKind, StatusTarget};
use super::status::{StatusEffect, StatusTick, TickEvent};

/// Chance for an enemy's innate on-hit status to land
pub const ENEMY_ON_HIT_CHANCE: f64 = 0.3;

/// Where the encounter currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    PlayerTurn,
    EnemyTurn,
    Won,
    Lost,
}

impl TurnPhase {
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A player's choice for the turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    UseSkill(SkillId),
}

/// Why an action was refused. The session is unchanged when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the fight is over")]
    CombatOver,
    #[error("it is not your turn")]
    NotPlayerTurn,
    #[error("you do not know the skill '{0}'")]
    UnknownSkill(SkillId),
    #[error("{name} is on cooldown for {turns} more turn(s)")]
    OnCooldown { name: String, turns: u32 },
    #[error("Not enough mana! ({required} needed, {available} available)")]
    InsufficientMana { required: i32, available: i32 },
}

/// Everything that happened during one automatic stage or action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReport {
    pub log: Vec<String>,
    pub cues: Vec<SoundCue>,
}

impl TurnReport {
    fn line(&mut self, message: impl Into<String>) {
        self.log.push(message.into());
    }

    fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty() && self.cues.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Player,
    Enemy,
}

/// An in-progress encounter
#[derive(Debug, Clone)]
pub struct CombatSession {
    pub id: SessionId,
    player: Combatant,
    enemy: Combatant,
    enemy_info: Enemy,
    arena: Arena,
    phase: TurnPhase,
    upkeep_done: bool,
    turn: u32,
    history: Vec<String>,
}

impl CombatSession {
    pub fn new(player: Combatant, enemy_info: Enemy, arena: Arena) -> Self {
        let enemy = Combatant::from_enemy(&enemy_info);
        let mut opening = format!("Entering {}... A wild {} appears!", arena.name, enemy.name);
        if enemy_info.ng_plus > 0 {
            opening.push_str(&format!(" (NG+ {})", enemy_info.ng_plus));
        }
        let id = SessionId::new();
        debug!(session = %id, arena = %arena.id, enemy = %enemy_info.template, "Combat started");

        Self {
            id,
            player,
            enemy,
            enemy_info,
            arena,
            phase: TurnPhase::PlayerTurn,
            upkeep_done: false,
            turn: 1,
            history: vec![opening],
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Whether the session is waiting for a `player_action`
    pub fn needs_input(&self) -> bool {
        self.phase == TurnPhase::PlayerTurn && self.upkeep_done
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    /// The spawned enemy (loot table, gold and XP rewards)
    pub fn enemy_info(&self) -> &Enemy {
        &self.enemy_info
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Full combat log so far
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run the next automatic stage, if any.
    ///
    /// Returns `None` when the session is waiting for input or is over.
    pub fn step(&mut self, rng: &mut impl Rng) -> Option<TurnReport> {
        match self.phase {
            TurnPhase::PlayerTurn if !self.upkeep_done => Some(self.player_upkeep(rng)),
            TurnPhase::EnemyTurn => Some(self.enemy_turn(rng)),
            _ => None,
        }
    }

    /// Resolve the player's chosen action
    pub fn player_action(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<TurnReport, ActionError> {
        if self.phase.is_over() {
            return Err(ActionError::CombatOver);
        }
        if !self.needs_input() {
            return Err(ActionError::NotPlayerTurn);
        }

        let mut report = TurnReport::default();
        match action {
            PlayerAction::Attack => self.basic_attack(&mut report, rng),
            PlayerAction::UseSkill(id) => self.use_skill(&id, &mut report, rng)?,
        }

        if !self.enemy.is_alive() {
            self.win(&mut report);
        } else {
            self.end_player_turn();
        }
        Ok(self.record(report))
    }

    fn player_upkeep(&mut self, rng: &mut impl Rng) -> TurnReport {
        let mut report = TurnReport::default();

        let triggered = self.arena.roll_turn_effects(rng);
        for status in triggered {
            report.line("The arena's environment affects everyone!");
            self.afflict(Side::Player, status, &mut report);
            self.afflict(Side::Enemy, status, &mut report);
        }

        let tick = self.tick_statuses(Side::Player, &mut report);

        if !self.player.is_alive() {
            self.lose(&mut report);
        } else if tick.stunned {
            self.end_player_turn();
        } else {
            self.upkeep_done = true;
        }
        self.record(report)
    }

    fn end_player_turn(&mut self) {
        if let Some(loadout) = self.player.loadout.as_mut() {
            loadout.tick_cooldowns();
        }
        self.phase = TurnPhase::EnemyTurn;
        self.upkeep_done = false;
    }

    fn basic_attack(&mut self, report: &mut TurnReport, rng: &mut impl Rng) {
        report.cue(SoundCue::PlayerAttack);
        self.player_strike(report, rng);

        let extra = self
            .player
            .loadout
            .as_ref()
            .map(|l| l.extra_strike_chance)
            .unwrap_or(0.0);
        if self.enemy.is_alive() && extra > 0.0 && rng.gen::<f64>() < extra {
            report.line(format!("{} strikes again!", self.player.name));
            self.player_strike(report, rng);
        }
    }

    fn player_strike(&mut self, report: &mut TurnReport, rng: &mut impl Rng) {
        let event = calculate_attack_damage(
            self.player.attack.amount,
            self.player.attack.damage_type,
            &self.player.stats,
            &self.enemy.resistances,
            self.enemy.defense(),
            &self.arena.effects,
            true,
            rng,
        );
        self.note_effectiveness(&event, report);
        report.line(format!(
            "{} attacks {} for {} damage!{}",
            self.player.name,
            self.enemy.name,
            event.final_amount,
            if event.is_crit { " (CRITICAL HIT!)" } else { "" }
        ));
        report.cue(SoundCue::EnemyHit);
        self.enemy.take_damage(event.final_amount);

        self.trigger_item_effects(EffectTrigger::OnHit, event.final_amount, report, rng);
        if event.is_crit {
            self.trigger_item_effects(EffectTrigger::OnCrit, event.final_amount, report, rng);
        }
    }

    fn use_skill(
        &mut self,
        id: &SkillId,
        report: &mut TurnReport,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        let loadout = self
            .player
            .loadout
            .as_ref()
            .ok_or_else(|| ActionError::UnknownSkill(id.clone()))?;
        let slot = loadout
            .slot(id)
            .ok_or_else(|| ActionError::UnknownSkill(id.clone()))?;
        let SkillKind::Active(active) = slot.skill.kind.clone() else {
            return Err(ActionError::UnknownSkill(id.clone()));
        };
        if slot.is_on_cooldown() {
            return Err(ActionError::OnCooldown {
                name: slot.skill.name.clone(),
                turns: slot.cooldown_remaining,
            });
        }
        if active.mana_cost > 0 {
            let available = self.player.mana.map(|m| m.current).unwrap_or(0);
            if available < active.mana_cost {
                return Err(ActionError::InsufficientMana {
                    required: active.mana_cost,
                    available,
                });
            }
        }
        let name = slot.skill.name.clone();

        // Validated; from here on the action commits.
        if let Some(mana) = self.player.mana.as_mut() {
            mana.spend(active.mana_cost);
        }
        if let Some(slot) = self.player.loadout.as_mut().and_then(|l| l.slot_mut(id)) {
            slot.try_activate();
        }
        report.cue(SoundCue::Skill(id.to_string()));
        report.line(format!("{} uses {}!", self.player.name, name));

        if let Some(damage) = active.damage {
            let base = damage.base_damage(self.player.attack, &self.player.stats);
            let defense = damage.effective_defense(self.enemy.defense());
            let event = calculate_attack_damage(
                base,
                damage.damage_type,
                &self.player.stats,
                &self.enemy.resistances,
                defense,
                &self.arena.effects,
                false,
                rng,
            );
            self.note_effectiveness(&event, report);
            report.line(format!("It hits {} for {} damage!", self.enemy.name, event.final_amount));
            report.cue(SoundCue::EnemyHit);
            self.enemy.take_damage(event.final_amount);
            self.trigger_item_effects(EffectTrigger::OnHit, event.final_amount, report, rng);
        }

        if let Some(amount) = active.heal {
            let healed = self.player.heal(amount);
            report.line(format!("{} heals for {} health.", self.player.name, healed));
        }

        if let Some(status) = active.status {
            let lands = status.chance.map_or(true, |c| rng.gen::<f64>() < c);
            if lands {
                let side = match status.target {
                    StatusTarget::Caster => Side::Player,
                    StatusTarget::Opponent => Side::Enemy,
                };
                self.afflict(side, status.effect, report);
            }
        }
        Ok(())
    }

    fn trigger_item_effects(
        &mut self,
        trigger: EffectTrigger,
        damage: i32,
        report: &mut TurnReport,
        rng: &mut impl Rng,
    ) {
        let effects = match self.player.loadout.as_ref() {
            Some(loadout) => loadout.effects(trigger),
            None => return,
        };

        for effect in effects {
            if !effect.procs(rng) {
                continue;
            }
            match effect.kind {
                ItemEffectKind::Lifesteal => {
                    let amount = (damage as f64 * effect.value).ceil() as i32;
                    self.player.heal(amount);
                    report.line(format!("{} leeches {} health!", self.player.name, amount));
                }
                ItemEffectKind::ArmorShred => {
                    self.enemy.armor_shred += effect.value as i32;
                    report.line(format!("{}'s defense was shredded!", self.enemy.name));
                }
                ItemEffectKind::StatusEffect(status) => {
                    self.afflict(Side::Enemy, status, report);
                }
                ItemEffectKind::DamageReflect | ItemEffectKind::BonusXp => {}
            }
        }
    }

    fn enemy_turn(&mut self, rng: &mut impl Rng) -> TurnReport {
        let mut report = TurnReport::default();

        let tick = self.tick_statuses(Side::Enemy, &mut report);
        if !self.enemy.is_alive() {
            self.win(&mut report);
            return self.record(report);
        }
        if tick.stunned {
            self.begin_next_round();
            return self.record(report);
        }

        report.cue(SoundCue::EnemyAttack);
        let event = calculate_attack_damage(
            self.enemy.attack.amount,
            self.enemy.attack.damage_type,
            &self.enemy.stats,
            &self.player.resistances,
            self.player.defense(),
            &self.arena.effects,
            true,
            rng,
        );
        self.note_effectiveness(&event, &mut report);
        let damage = event.final_amount;
        report.line(format!(
            "{} attacks {} for {} damage!{}",
            self.enemy.name,
            self.player.name,
            damage,
            if event.is_crit { " (CRITICAL HIT!)" } else { "" }
        ));
        report.cue(SoundCue::PlayerHit);

        if let Some(status) = self.enemy_info.on_hit_status {
            if rng.gen::<f64>() < ENEMY_ON_HIT_CHANCE {
                self.afflict(Side::Player, status, &mut report);
            }
        }

        let reflect = self
            .player
            .loadout
            .as_ref()
            .map(|l| l.reflect_fraction())
            .unwrap_or(0.0);
        let reflected = (damage as f64 * reflect).floor() as i32;
        if reflected > 0 {
            report.line(format!("{}'s gear reflects {} damage!", self.player.name, reflected));
            self.enemy.take_damage(reflected);
            if !self.enemy.is_alive() {
                report.line(format!("{} was defeated by reflected damage!", self.enemy.name));
                self.win(&mut report);
                return self.record(report);
            }
        }

        self.player.take_damage(damage);
        if !self.player.is_alive() {
            self.lose(&mut report);
        } else {
            self.begin_next_round();
        }
        self.record(report)
    }

    fn begin_next_round(&mut self) {
        self.phase = TurnPhase::PlayerTurn;
        self.upkeep_done = false;
        self.turn += 1;
    }

    fn tick_statuses(&mut self, side: Side, report: &mut TurnReport) -> StatusTick {
        let combatant = self.side_mut(side);
        let tick = combatant.statuses.tick();
        combatant.current_health = tick.apply_to(combatant.current_health, combatant.max_health);

        let name = combatant.name.clone();
        for event in &tick.events {
            match event {
                TickEvent::Damaged { kind, amount } => {
                    report.line(format!("{} takes {} damage from {}!", name, amount, kind));
                }
                TickEvent::Healed { amount } => {
                    report.line(format!("{} regenerates {} health!", name, amount));
                }
                TickEvent::Stunned => report.line(format!("{} is stunned!", name)),
            }
        }
        for kind in &tick.expired {
            report.line(format!("{}'s {} has worn off.", name, kind));
        }
        tick
    }

    fn afflict(&mut self, side: Side, effect: StatusEffect, report: &mut TurnReport) {
        let combatant = self.side_mut(side);
        combatant.statuses.apply(effect);
        let line = format!("{} is afflicted with {}!", combatant.name, effect.kind);
        report.line(line);
        report.cue(SoundCue::Status(effect.kind.key().to_string()));
    }

    fn note_effectiveness(&self, event: &DamageEvent, report: &mut TurnReport) {
        if let Some(note) = event.effectiveness_note() {
            report.line(note);
        }
    }

    fn win(&mut self, report: &mut TurnReport) {
        report.line(format!("{} has been defeated!", self.enemy.name));
        report.cue(SoundCue::Victory);
        self.phase = TurnPhase::Won;
        debug!(session = %self.id, turns = self.turn, "Combat won");
    }

    fn lose(&mut self, report: &mut TurnReport) {
        report.line(format!("{} has been defeated!", self.player.name));
        report.cue(SoundCue::Defeat);
        self.phase = TurnPhase::Lost;
        debug!(session = %self.id, turns = self.turn, "Combat lost");
    }

    fn side_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    fn record(&mut self, report: TurnReport) -> TurnReport {
        self.history.extend(report.log.iter().cloned());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::damage_type::{DamageType, Resistances};
    use crate::combat::enemy::{EnemyTemplate, GoldDrop};
    use crate::combat::equipment::EquipmentSet;
    use crate::combat::item::{Item, ItemEffect, ItemKind, ItemRarity, ItemSlot, WeaponDamage};
    use crate::combat::combatant::{Loadout, ManaPool};
    use crate::combat::skill::{ActiveSkill, PassiveSkill, Skill, SkillDamage, SkillSlot, SkillStatus};
    use crate::combat::status::{StatusKind, StatusManager};
    use crate::combat::arena::EnvironmentalEffect;
    use gladiator_core::{ArenaId, EnemyId, Stats};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn quiet_arena() -> Arena {
        Arena {
            id: ArenaId::new("arena_test"),
            name: "Test Pit".into(),
            description: String::new(),
            level_range: (1, 1),
            possible_enemies: vec![EnemyId::new("enemy_test")],
            effects: Vec::new(),
        }
    }

    fn template(health_con: i32, dex: i32, attack: i32) -> EnemyTemplate {
        EnemyTemplate {
            id: EnemyId::new("enemy_test"),
            name: "Target".into(),
            level: 1,
            // zero strength and luck: no stat modifier, never crits
            stats: Stats::new(0, dex, 0, health_con, 0),
            damage: WeaponDamage::new(DamageType::Kinetic, attack),
            resistances: Resistances::new(),
            loot: Vec::new(),
            gold: GoldDrop { min: 10, max: 25 },
            xp_value: 15,
            on_hit_status: None,
        }
    }

    fn player_with(skills: Vec<Skill>, equipment: EquipmentSet) -> Combatant {
        let mut loadout = Loadout {
            equipment,
            skills: Vec::new(),
            extra_strike_chance: 0.0,
        };
        for skill in skills {
            if skill.is_active() {
                loadout.skills.push(SkillSlot::new(skill));
            } else if let Some(p) = skill.as_passive() {
                loadout.extra_strike_chance += p.extra_strike_chance;
            }
        }
        Combatant {
            name: "Hero".into(),
            level: 1,
            // luck 0: player never crits in these tests
            stats: Stats::new(5, 5, 5, 5, 0),
            max_health: 100,
            current_health: 100,
            mana: Some(ManaPool { current: 30, max: 45 }),
            resistances: Resistances::new(),
            statuses: StatusManager::new(),
            attack: loadout.equipment.weapon_damage(),
            armor_shred: 0,
            loadout: Some(loadout),
        }
    }

    fn weapon(amount: i32) -> EquipmentSet {
        let mut set = EquipmentSet::new();
        set.equip(
            Item::gear("w", "Club", ItemKind::Melee, ItemRarity::Common, ItemSlot::Weapon, 10)
                .with_damage(DamageType::Kinetic, amount),
        )
        .ok();
        set
    }

    fn session(player: Combatant, enemy: EnemyTemplate) -> CombatSession {
        CombatSession::new(player, enemy.spawn(0), quiet_arena())
    }

    fn run_until_input(s: &mut CombatSession, rng: &mut StdRng) {
        while s.step(rng).is_some() {
            if s.needs_input() {
                break;
            }
        }
    }

    #[test]
    fn test_initial_state_requires_upkeep() {
        let mut s = session(player_with(vec![], weapon(4)), template(6, 4, 5));
        assert_eq!(s.phase(), TurnPhase::PlayerTurn);
        assert!(!s.needs_input());
        let mut r = rng();
        assert_eq!(
            s.player_action(PlayerAction::Attack, &mut r),
            Err(ActionError::NotPlayerTurn)
        );
        s.step(&mut r);
        assert!(s.needs_input());
    }

    #[test]
    fn test_basic_attack_end_to_end_damage() {
        let mut s = session(player_with(vec![], weapon(4)), template(6, 4, 5));
        let mut r = rng();
        s.step(&mut r);
        let report = s.player_action(PlayerAction::Attack, &mut r);
        assert!(report.is_ok());
        // 4 + floor(5/2) = 6, minus floor(4/2) = 4
        assert_eq!(s.enemy().current_health, 56);
        assert_eq!(s.phase(), TurnPhase::EnemyTurn);
    }

    #[test]
    fn test_enemy_turn_damages_player_and_returns_control() {
        let mut s = session(player_with(vec![], weapon(4)), template(6, 4, 5));
        let mut r = rng();
        s.step(&mut r);
        s.player_action(PlayerAction::Attack, &mut r).ok();
        let report = s.step(&mut r);
        assert!(report.is_some_and(|rep| rep.cues.contains(&SoundCue::PlayerHit)));
        // 5 + floor(0/2) = 5, minus floor(5/2) = 3
        assert_eq!(s.player().current_health, 97);
        assert_eq!(s.phase(), TurnPhase::PlayerTurn);
        assert_eq!(s.turn(), 2);
    }

    #[test]
    fn test_win_is_absorbing() {
        let mut s = session(player_with(vec![], weapon(200)), template(1, 0, 5));
        let mut r = rng();
        s.step(&mut r);
        let report = s.player_action(PlayerAction::Attack, &mut r);
        assert!(report.is_ok_and(|rep| rep.cues.contains(&SoundCue::Victory)));
        assert_eq!(s.phase(), TurnPhase::Won);
        assert!(s.step(&mut r).is_none());
        assert_eq!(
            s.player_action(PlayerAction::Attack, &mut r),
            Err(ActionError::CombatOver)
        );
    }

    #[test]
    fn test_player_loses_at_zero_health() {
        let mut hero = player_with(vec![], weapon(1));
        hero.current_health = 3;
        let mut s = session(hero, template(20, 40, 10));
        let mut r = rng();
        s.step(&mut r);
        s.player_action(PlayerAction::Attack, &mut r).ok();
        s.step(&mut r);
        assert_eq!(s.phase(), TurnPhase::Lost);
        assert_eq!(s.player().current_health, 0);
    }

    #[test]
    fn test_stunned_player_skips_action_but_cooldowns_tick() {
        let skill = Skill::active(
            "jab",
            "Jab",
            1,
            ActiveSkill {
                damage: Some(SkillDamage::weapon(1.0, DamageType::Kinetic)),
                heal: None,
                status: None,
                cooldown: 2,
                mana_cost: 0,
            },
        );
        let mut s = session(player_with(vec![skill], weapon(4)), template(20, 0, 1));
        let mut r = rng();
        s.step(&mut r);
        s.player_action(PlayerAction::UseSkill(SkillId::new("jab")), &mut r).ok();
        // jab: 2 set, then -1 at end of turn
        let cd = |s: &CombatSession| {
            s.player().loadout.as_ref().and_then(|l| l.slot(&SkillId::new("jab"))).map(|x| x.cooldown_remaining)
        };
        assert_eq!(cd(&s), Some(1));
        s.step(&mut r); // enemy turn

        s.player.statuses.apply(StatusEffect::flag(StatusKind::Stun, 1));
        let report = s.step(&mut r);
        assert!(report.is_some_and(|rep| rep.log.iter().any(|l| l.contains("is stunned"))));
        assert_eq!(s.phase(), TurnPhase::EnemyTurn);
        assert_eq!(cd(&s), Some(0));
    }

    #[test]
    fn test_skill_rejections_do_not_mutate() {
        let bolt = Skill::active(
            "bolt",
            "Bolt",
            1,
            ActiveSkill {
                damage: Some(SkillDamage::scaling(gladiator_core::StatKind::Intelligence, 1.2, DamageType::Magic)),
                heal: None,
                status: None,
                cooldown: 2,
                mana_cost: 40,
            },
        );
        let mut s = session(player_with(vec![bolt], weapon(4)), template(20, 0, 1));
        let mut r = rng();
        s.step(&mut r);
        let before_enemy = s.enemy().current_health;
        let result = s.player_action(PlayerAction::UseSkill(SkillId::new("bolt")), &mut r);
        assert_eq!(
            result,
            Err(ActionError::InsufficientMana {
                required: 40,
                available: 30
            })
        );
        assert_eq!(s.enemy().current_health, before_enemy);
        assert!(s.needs_input());

        let unknown = s.player_action(PlayerAction::UseSkill(SkillId::new("nope")), &mut r);
        assert_eq!(unknown, Err(ActionError::UnknownSkill(SkillId::new("nope"))));
    }

    #[test]
    fn test_skill_on_cooldown_rejected() {
        let jab = Skill::active(
            "jab",
            "Jab",
            1,
            ActiveSkill {
                damage: Some(SkillDamage::weapon(1.0, DamageType::Kinetic)),
                heal: None,
                status: None,
                cooldown: 3,
                mana_cost: 0,
            },
        );
        let mut s = session(player_with(vec![jab], weapon(4)), template(40, 0, 1));
        let mut r = rng();
        s.step(&mut r);
        assert!(s.player_action(PlayerAction::UseSkill(SkillId::new("jab")), &mut r).is_ok());
        run_until_input(&mut s, &mut r);
        let again = s.player_action(PlayerAction::UseSkill(SkillId::new("jab")), &mut r);
        assert_eq!(
            again,
            Err(ActionError::OnCooldown {
                name: "Jab".into(),
                turns: 2
            })
        );
    }

    #[test]
    fn test_mana_skill_spends_mana_and_applies_status() {
        let wrack = Skill::active(
            "wrack",
            "Wrack",
            1,
            ActiveSkill {
                damage: Some(SkillDamage::scaling(gladiator_core::StatKind::Intelligence, 0.5, DamageType::Magic)),
                heal: None,
                status: Some(SkillStatus {
                    target: StatusTarget::Opponent,
                    effect: StatusEffect::flag(StatusKind::Stun, 1),
                    chance: None,
                }),
                cooldown: 5,
                mana_cost: 25,
            },
        );
        let mut s = session(player_with(vec![wrack], weapon(4)), template(20, 0, 1));
        let mut r = rng();
        s.step(&mut r);
        let report = s.player_action(PlayerAction::UseSkill(SkillId::new("wrack")), &mut r);
        assert!(report.is_ok_and(|rep| rep.cues.contains(&SoundCue::Skill("wrack".into()))
            && rep.cues.contains(&SoundCue::Status("stun".into()))));
        assert_eq!(s.player().mana.map(|m| m.current), Some(5));
        // floor(5 * 0.5) = 2, + floor(5/2) = 4 magic, no defense
        assert_eq!(s.enemy().current_health, 196);

        // stunned enemy loses its attack
        let player_hp = s.player().current_health;
        s.step(&mut r);
        assert_eq!(s.player().current_health, player_hp);
        assert_eq!(s.phase(), TurnPhase::PlayerTurn);
    }

    #[test]
    fn test_heal_skill_caps_at_max() {
        let aid = Skill::active(
            "aid",
            "Aid",
            1,
            ActiveSkill {
                damage: None,
                heal: Some(25),
                status: None,
                cooldown: 5,
                mana_cost: 0,
            },
        );
        let mut hero = player_with(vec![aid], weapon(4));
        hero.current_health = 90;
        let mut s = session(hero, template(20, 0, 1));
        let mut r = rng();
        s.step(&mut r);
        s.player_action(PlayerAction::UseSkill(SkillId::new("aid")), &mut r).ok();
        assert_eq!(s.player().current_health, 100);
        assert_eq!(s.enemy().current_health, 200);
    }

    #[test]
    fn test_lifesteal_and_shred_on_hit() {
        let mut set = weapon(10);
        set.equip(
            Item::gear("leech", "Leech", ItemKind::Cybernetic, ItemRarity::Epic, ItemSlot::Implant, 800)
                .with_effect(ItemEffect::new(EffectTrigger::OnHit, ItemEffectKind::Lifesteal, 0.1, "leech"))
                .with_effect(ItemEffect::new(EffectTrigger::OnHit, ItemEffectKind::ArmorShred, 1.0, "shred")),
        )
        .ok();
        let mut hero = player_with(vec![], set);
        hero.current_health = 50;
        let mut s = session(hero, template(20, 6, 1));
        let mut r = rng();
        s.step(&mut r);
        s.player_action(PlayerAction::Attack, &mut r).ok();
        // 10 + 2 = 12, minus 3 = 9 damage; ceil(0.9) = 1 healed
        assert_eq!(s.enemy().current_health, 191);
        assert_eq!(s.player().current_health, 51);
        assert_eq!(s.enemy().armor_shred, 1);
        assert_eq!(s.enemy().defense(), 2);
    }

    #[test]
    fn test_reflect_kill_takes_priority() {
        let mut set = weapon(1);
        set.equip(
            Item::gear("mirror", "Mirror", ItemKind::HeavyArmor, ItemRarity::Epic, ItemSlot::Armor, 900)
                .with_effect(ItemEffect::new(EffectTrigger::Passive, ItemEffectKind::DamageReflect, 1.0, "reflect")),
        )
        .ok();
        let mut hero = player_with(vec![], set);
        hero.current_health = 1;
        // enemy with 10 health hits for at least 10
        let mut s = session(hero, template(1, 0, 40));
        let mut r = rng();
        s.step(&mut r);
        s.player_action(PlayerAction::Attack, &mut r).ok();
        s.step(&mut r);
        assert_eq!(s.phase(), TurnPhase::Won);
        assert_eq!(s.player().current_health, 1);
    }

    #[test]
    fn test_enemy_dies_to_poison_before_acting() {
        let mut s = session(player_with(vec![], weapon(1)), template(1, 0, 50));
        let mut r = rng();
        s.step(&mut r);
        s.enemy.current_health = 2;
        s.player_action(PlayerAction::Attack, &mut r).ok();
        assert_eq!(s.phase(), TurnPhase::Won);

        let mut s = session(player_with(vec![], weapon(1)), template(5, 40, 50));
        s.step(&mut r);
        s.player_action(PlayerAction::Attack, &mut r).ok();
        s.enemy.current_health = 3;
        s.enemy.statuses.apply(StatusEffect::new(StatusKind::Poison, 2, 5));
        let hp = s.player().current_health;
        s.step(&mut r);
        assert_eq!(s.phase(), TurnPhase::Won);
        assert_eq!(s.player().current_health, hp);
    }

    #[test]
    fn test_arena_trigger_hits_both_sides() {
        let mut s = CombatSession::new(
            player_with(vec![], weapon(4)),
            template(20, 0, 1).spawn(0),
            Arena {
                effects: vec![EnvironmentalEffect::TurnEffect {
                    status: StatusEffect::new(StatusKind::Poison, 2, 2),
                    chance: 1.0,
                    description: "always".into(),
                }],
                ..quiet_arena()
            },
        );
        let mut r = rng();
        let report = s.step(&mut r);
        assert!(report.is_some_and(|rep| rep.log.iter().any(|l| l.contains("environment"))));
        // player ticks immediately, enemy keeps its poison for its own upkeep
        assert_eq!(s.player().current_health, 98);
        assert!(s.enemy().statuses.has_effect(StatusKind::Poison));
        assert_eq!(s.enemy().current_health, 200);
    }

    #[test]
    fn test_enemy_innate_status_can_land() {
        let mut t = template(40, 0, 1);
        t.on_hit_status = Some(StatusEffect::new(StatusKind::Poison, 3, 3));
        let mut s = session(player_with(vec![], weapon(1)), t);
        let mut r = rng();
        let mut landed = false;
        for _ in 0..40 {
            run_until_input(&mut s, &mut r);
            if s.player().statuses.has_effect(StatusKind::Poison) {
                landed = true;
                break;
            }
            if s.is_over() {
                break;
            }
            s.player.current_health = 100;
            s.player_action(PlayerAction::Attack, &mut r).ok();
        }
        assert!(landed);
    }

    #[test]
    fn test_double_strike_passive() {
        let tap = Skill::passive(
            "tap",
            "Tap",
            1,
            PassiveSkill {
                stat_bonus: Stats::default(),
                extra_strike_chance: 1.0,
            },
        );
        let mut s = session(player_with(vec![tap], weapon(4)), template(20, 4, 1));
        let mut r = rng();
        s.step(&mut r);
        let report = s.player_action(PlayerAction::Attack, &mut r);
        assert!(report.is_ok_and(|rep| rep.log.iter().any(|l| l.contains("strikes again"))));
        assert_eq!(s.enemy().current_health, 192);
    }

    #[test]
    fn test_history_accumulates() {
        let mut s = session(player_with(vec![], weapon(4)), template(6, 4, 5));
        let mut r = rng();
        assert_eq!(s.history().len(), 1);
        assert!(s.history()[0].contains("A wild Target appears!"));
        s.step(&mut r);
        s.player_action(PlayerAction::Attack, &mut r).ok();
        assert!(s.history().len() >= 2);
    }
}
