//! Status effects and status manager
//!
//! Turn-based timed effects: damage over time, healing over time, stun and a
//! defensive buff. One instance per type; re-application refreshes duration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Types of status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Burn,
    Stun,
    Regen,
    DefenseUp,
}

impl StatusKind {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Poison => "Poison",
            Self::Burn => "Burn",
            Self::Stun => "Stun",
            Self::Regen => "Regen",
            Self::DefenseUp => "Defense Up",
        }
    }

    /// Lowercase key used in sound cue names (`status_<key>`)
    pub fn key(self) -> &'static str {
        match self {
            Self::Poison => "poison",
            Self::Burn => "burn",
            Self::Stun => "stun",
            Self::Regen => "regen",
            Self::DefenseUp => "defense_up",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An active (or template) status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns remaining
    pub duration: u32,
    /// Damage for Poison/Burn, healing for Regen, defense for DefenseUp
    #[serde(default)]
    pub value: Option<i32>,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: u32, value: i32) -> Self {
        Self {
            kind,
            duration,
            value: Some(value),
        }
    }

    /// An effect with no magnitude (Stun)
    pub fn flag(kind: StatusKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            value: None,
        }
    }

    pub fn magnitude(&self) -> i32 {
        self.value.unwrap_or(0)
    }
}

/// One line of what happened during a tick, for the combat log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Damaged { kind: StatusKind, amount: i32 },
    Healed { amount: i32 },
    Stunned,
}

/// Aggregate result of ticking every effect on one combatant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Net health change (negative = damage)
    pub delta: i32,
    /// Whether the owner loses its action this turn
    pub stunned: bool,
    /// Effects that wore off during this tick
    pub expired: Vec<StatusKind>,
    pub events: Vec<TickEvent>,
}

impl StatusTick {
    /// Apply the aggregated delta to a health pool, clamped to `[0, max_health]`
    pub fn apply_to(&self, current_health: i32, max_health: i32) -> i32 {
        (current_health + self.delta).clamp(0, max_health.max(0))
    }
}

/// Manages all active status effects on a combatant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusManager {
    pub effects: Vec<StatusEffect>,
}

impl StatusManager {
    /// Create a new empty status manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status effect. If the same type already exists, refresh duration (take longer).
    pub fn apply(&mut self, effect: StatusEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.duration = existing.duration.max(effect.duration);
        } else {
            self.effects.push(effect);
        }
    }

    /// Process every effect once, in application order.
    ///
    /// Effects with more than one turn left persist with one fewer; the rest
    /// are dropped. Health is not touched here; see [`StatusTick::apply_to`].
    pub fn tick(&mut self) -> StatusTick {
        let mut result = StatusTick::default();

        for effect in &self.effects {
            match effect.kind {
                StatusKind::Poison | StatusKind::Burn => {
                    let amount = effect.magnitude();
                    result.delta -= amount;
                    result.events.push(TickEvent::Damaged {
                        kind: effect.kind,
                        amount,
                    });
                }
                StatusKind::Regen => {
                    let amount = effect.magnitude();
                    result.delta += amount;
                    result.events.push(TickEvent::Healed { amount });
                }
                StatusKind::Stun => {
                    result.stunned = true;
                    result.events.push(TickEvent::Stunned);
                }
                StatusKind::DefenseUp => {}
            }
        }

        let mut remaining = Vec::with_capacity(self.effects.len());
        for mut effect in self.effects.drain(..) {
            if effect.duration > 1 {
                effect.duration -= 1;
                remaining.push(effect);
            } else {
                result.expired.push(effect.kind);
            }
        }
        self.effects = remaining;

        result
    }

    /// Extra defense granted by an active DefenseUp
    pub fn defense_bonus(&self) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == StatusKind::DefenseUp)
            .map(|e| e.magnitude())
            .sum()
    }

    /// Check if a specific status type is active
    pub fn has_effect(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Remove all effects
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Number of active effects
    pub fn count(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
