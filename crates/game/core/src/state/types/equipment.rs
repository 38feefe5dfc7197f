//! Held items.
//!
//! Equipment never changes base stats. Its modifiers are folded in whenever
//! an effective stat is read (see [`crate::stats::effective_stat`]).

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::stats::StatModifiers;

/// Items held by a combatant, in equip order (at most six).
pub type Loadout = ArrayVec<Equipment, { GameConfig::MAX_EQUIPMENT }>;

/// A held item with signed stat modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sprite_url: Option<String>,
    pub modifiers: StatModifiers,
}

impl Equipment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        modifiers: StatModifiers,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            sprite_url: None,
            modifiers,
        }
    }

    pub fn with_sprite(mut self, sprite_url: impl Into<String>) -> Self {
        self.sprite_url = Some(sprite_url.into());
        self
    }
}
