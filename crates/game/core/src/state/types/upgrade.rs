//! Loot offers presented after a victory.

use super::{Equipment, SpeciesId};
use crate::stats::StatKind;

/// A flat increase to one base stat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBoost {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stat: StatKind,
    pub amount: u32,
}

impl StatBoost {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        stat: StatKind,
        amount: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            stat,
            amount,
        }
    }
}

/// A species that evolves into another once a level is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evolution {
    pub species: SpeciesId,
    pub target: SpeciesId,
    pub min_level: u32,
}

impl Evolution {
    pub const fn new(species: u32, target: u32, min_level: u32) -> Self {
        Self {
            species: SpeciesId(species),
            target: SpeciesId(target),
            min_level,
        }
    }
}

/// One loot offer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Upgrade {
    StatBoost(StatBoost),
    Equip(Equipment),
    Evolve(Evolution),
}

impl Upgrade {
    pub fn name(&self) -> &str {
        match self {
            Self::StatBoost(boost) => &boost.name,
            Self::Equip(item) => &item.name,
            Self::Evolve(_) => "Evolve",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::StatBoost(boost) => &boost.description,
            Self::Equip(item) => &item.description,
            Self::Evolve(_) => "Evolve into a stronger form",
        }
    }

    pub const fn is_equipment(&self) -> bool {
        matches!(self, Self::Equip(_))
    }
}
