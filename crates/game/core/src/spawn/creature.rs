use crate::state::{ElementalType, SpeciesId};

/// Base stat line reported by the creature lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStatLine {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// Reference to a move a species can learn; details are fetched separately.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRef {
    pub name: String,
    pub url: Option<String>,
}

impl MoveRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// Species data returned by the creature lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureData {
    pub species: SpeciesId,
    pub name: String,
    pub types: Vec<ElementalType>,
    pub base: BaseStatLine,
    pub moves: Vec<MoveRef>,
}
