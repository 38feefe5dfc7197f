use crate::state::{ElementalType, Equipment, Evolution, Move, SpeciesId, StatBoost};
use crate::stats::StatModifiers;

/// Oracle exposing static content: upgrade pool, item catalog, evolution
/// chains, tier species pools, and the fallback move.
pub trait CatalogOracle: Send + Sync {
    /// Stat upgrades loot is sampled from.
    fn upgrades(&self) -> &[StatBoost];

    /// Curated held items; their keys form the equipment drop pool.
    fn items(&self) -> &[ItemTemplate];

    fn evolutions(&self) -> &[Evolution];

    /// Species drawn on boss floors.
    fn boss_pool(&self) -> &[SpeciesId];

    /// Species drawn on mini-boss floors.
    fn mini_boss_pool(&self) -> &[SpeciesId];

    /// Species a player may start a run with.
    fn starters(&self) -> &[SpeciesId];

    /// Move used by a combatant that knows none.
    fn default_move(&self) -> Move {
        tackle()
    }

    fn item(&self, key: &str) -> Option<&ItemTemplate> {
        self.items().iter().find(|item| item.key == key)
    }

    fn evolution(&self, species: SpeciesId) -> Option<Evolution> {
        self.evolutions()
            .iter()
            .find(|evolution| evolution.species == species)
            .copied()
    }

    /// Placeholder used when an item lookup yields nothing.
    fn fallback_item(&self, key: &str) -> Equipment {
        Equipment::new(
            format!("local-{key}"),
            key.replace('-', " ").to_uppercase(),
            "A powerful held item generated locally.",
            StatModifiers {
                attack: 10,
                defense: 10,
                max_hp: 20,
                ..StatModifiers::new()
            },
        )
    }
}

/// Normal-type, 40 power, never misses.
pub fn tackle() -> Move {
    Move::new("Tackle", ElementalType::Normal, 40, 100).with_pp(35)
}

/// Catalog entry for a held item, keyed by its lookup name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub key: String,
    pub name: String,
    pub description: String,
    pub modifiers: StatModifiers,
}

impl ItemTemplate {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        modifiers: StatModifiers,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            modifiers,
        }
    }

    /// Materializes the template as equipment, keeping the key as its id.
    pub fn to_equipment(&self) -> Equipment {
        Equipment::new(
            self.key.clone(),
            self.name.clone(),
            self.description.clone(),
            self.modifiers,
        )
    }
}
