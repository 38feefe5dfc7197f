//! Serializable oracle snapshots.
//!
//! Snapshots are plain data implementing the oracle traits. Content crates
//! fill them from builtin tables or data files; tests build them inline.

use super::{
    CatalogOracle, CombatParams, ItemTemplate, ProgressionParams, SpawnParams, TablesOracle,
    tackle,
};
use crate::state::{Evolution, Move, SpeciesId, StatBoost};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of all balance tables. `Default` yields the canonical values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TablesSnapshot {
    pub combat: CombatParams,
    pub progression: ProgressionParams,
    pub spawn: SpawnParams,
}

impl TablesSnapshot {
    pub fn new(combat: CombatParams, progression: ProgressionParams, spawn: SpawnParams) -> Self {
        Self {
            combat,
            progression,
            spawn,
        }
    }

    pub fn from_oracle(oracle: &dyn TablesOracle) -> Self {
        Self::new(oracle.combat(), oracle.progression(), oracle.spawn())
    }
}

impl TablesOracle for TablesSnapshot {
    fn combat(&self) -> CombatParams {
        self.combat
    }

    fn progression(&self) -> ProgressionParams {
        self.progression
    }

    fn spawn(&self) -> SpawnParams {
        self.spawn
    }
}

/// Snapshot of static content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CatalogSnapshot {
    pub upgrades: Vec<StatBoost>,
    pub items: Vec<ItemTemplate>,
    pub evolutions: Vec<Evolution>,
    pub boss_pool: Vec<SpeciesId>,
    pub mini_boss_pool: Vec<SpeciesId>,
    pub starters: Vec<SpeciesId>,
    pub default_move: Option<Move>,
}

impl CatalogOracle for CatalogSnapshot {
    fn upgrades(&self) -> &[StatBoost] {
        &self.upgrades
    }

    fn items(&self) -> &[ItemTemplate] {
        &self.items
    }

    fn evolutions(&self) -> &[Evolution] {
        &self.evolutions
    }

    fn boss_pool(&self) -> &[SpeciesId] {
        &self.boss_pool
    }

    fn mini_boss_pool(&self) -> &[SpeciesId] {
        &self.mini_boss_pool
    }

    fn starters(&self) -> &[SpeciesId] {
        &self.starters
    }

    fn default_move(&self) -> Move {
        self.default_move.clone().unwrap_or_else(tackle)
    }
}
