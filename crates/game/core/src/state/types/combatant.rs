//! Creatures participating in battle.

use core::fmt;

use arrayvec::ArrayVec;

use super::{ElementalType, Loadout, MoveSet, StatusCondition};
use crate::config::GameConfig;
use crate::stats::{self, BaseStats};

/// Elemental types of a combatant (one or two).
pub type TypeSet = ArrayVec<ElementalType, { GameConfig::MAX_TYPES }>;

/// National dex number identifying a species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeciesId(pub u32);

impl SpeciesId {
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for SpeciesId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The two sides of a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[default]
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// Actor id mixed into RNG seeds.
    pub const fn actor_id(self) -> u32 {
        match self {
            Self::Player => 0,
            Self::Enemy => 1,
        }
    }
}

/// A creature instance with mutable HP, status and equipment.
///
/// Invariant: `0 <= stats.hp <= self.max_hp()` where `max_hp` is the
/// effective maximum (base plus equipment, never below 1).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub species: SpeciesId,
    pub name: String,
    pub types: TypeSet,
    pub stats: BaseStats,
    pub level: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub status: StatusCondition,
    pub equipment: Loadout,
    pub moves: MoveSet,
}

impl Combatant {
    pub fn hp(&self) -> u32 {
        self.stats.hp
    }

    /// Effective maximum HP.
    pub fn max_hp(&self) -> u32 {
        stats::effective_max_hp(self)
    }

    pub fn is_fainted(&self) -> bool {
        self.stats.hp == 0
    }

    pub fn can_equip(&self) -> bool {
        !self.equipment.is_full()
    }

    /// Removes up to `amount` HP and returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.stats.hp);
        self.stats.hp -= lost;
        lost
    }

    /// Restores up to `amount` HP without exceeding the effective maximum.
    pub fn heal(&mut self, amount: u32) {
        self.stats.hp = self.stats.hp.saturating_add(amount).min(self.max_hp());
    }

    /// Restores HP to the effective maximum.
    pub fn full_heal(&mut self) {
        self.stats.hp = self.max_hp();
    }

    /// Re-establishes the HP invariant after the maximum changed.
    pub fn clamp_hp(&mut self) {
        self.stats.hp = self.stats.hp.min(self.max_hp());
    }
}
