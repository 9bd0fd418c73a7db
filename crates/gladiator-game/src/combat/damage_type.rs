//! Damage types and per-type resistances
//!
//! 7 damage types. Kinetic and Explosive scale with Strength, everything
//! else scales with Intelligence. Resistances are signed fractions:
//! positive values resist, negative values are vulnerabilities.

use std::fmt;

use gladiator_core::StatKind;
use serde::{Deserialize, Serialize};

/// The 7 damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageType {
    #[default]
    Kinetic,
    Energy,
    Magic,
    Explosive,
    Fire,
    Ice,
    Lightning,
}

/// Total number of damage types (for array indexing)
pub const DAMAGE_TYPE_COUNT: usize = 7;

impl DamageType {
    /// Array index for this damage type (for `Resistances`)
    pub fn index(self) -> usize {
        match self {
            Self::Kinetic => 0,
            Self::Energy => 1,
            Self::Magic => 2,
            Self::Explosive => 3,
            Self::Fire => 4,
            Self::Ice => 5,
            Self::Lightning => 6,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Kinetic => "Kinetic",
            Self::Energy => "Energy",
            Self::Magic => "Magic",
            Self::Explosive => "Explosive",
            Self::Fire => "Fire",
            Self::Ice => "Ice",
            Self::Lightning => "Lightning",
        }
    }

    /// The attribute whose half is added to damage of this type
    pub fn scaling_stat(self) -> StatKind {
        match self {
            Self::Kinetic | Self::Explosive => StatKind::Strength,
            Self::Energy | Self::Magic | Self::Fire | Self::Ice | Self::Lightning => {
                StatKind::Intelligence
            }
        }
    }

    /// All damage type variants
    pub fn all() -> &'static [DamageType] {
        &[
            Self::Kinetic,
            Self::Energy,
            Self::Magic,
            Self::Explosive,
            Self::Fire,
            Self::Ice,
            Self::Lightning,
        ]
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resistance fraction per damage type (indexed by `DamageType::index()`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Resistances {
    values: [f64; DAMAGE_TYPE_COUNT],
}

impl Resistances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used by the content tables
    pub fn with(mut self, damage_type: DamageType, value: f64) -> Self {
        self.values[damage_type.index()] = value;
        self
    }

    pub fn get(&self, damage_type: DamageType) -> f64 {
        self.values[damage_type.index()]
    }

    /// Add another resistance set onto this one (no clamping)
    pub fn add(&mut self, other: &Resistances) {
        for i in 0..DAMAGE_TYPE_COUNT {
            self.values[i] += other.values[i];
        }
    }

    /// Non-zero entries, in damage type order
    pub fn iter(&self) -> impl Iterator<Item = (DamageType, f64)> + '_ {
        DamageType::all()
            .iter()
            .map(|&t| (t, self.get(t)))
            .filter(|(_, v)| *v != 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
