//! Moves and move sets.

use arrayvec::ArrayVec;

use super::{ElementalType, MoveAilment};
use crate::config::GameConfig;

/// Known moves of a combatant (at most four).
pub type MoveSet = ArrayVec<Move, { GameConfig::MAX_MOVES }>;

/// An attack or status action. Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub name: String,
    pub elemental_type: ElementalType,
    /// Zero for pure status moves.
    pub power: u32,
    /// Hit chance in percent (0-100).
    pub accuracy: u32,
    /// Informational only; moves are never exhausted.
    pub pp: u32,
    pub ailment: Option<MoveAilment>,
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        elemental_type: ElementalType,
        power: u32,
        accuracy: u32,
    ) -> Self {
        Self {
            name: name.into(),
            elemental_type,
            power,
            accuracy: accuracy.min(100),
            pp: 0,
            ailment: None,
        }
    }

    pub fn with_pp(mut self, pp: u32) -> Self {
        self.pp = pp;
        self
    }

    pub fn with_ailment(mut self, ailment: MoveAilment) -> Self {
        self.ailment = Some(ailment);
        self
    }

    pub const fn is_status_move(&self) -> bool {
        self.power == 0
    }
}
