//! Fixtures shared by unit tests.

use crate::env::{CatalogSnapshot, ItemTemplate};
use crate::state::{
    Combatant, ElementalType, Evolution, Loadout, MoveSet, SpeciesId, StatBoost, StatusCondition,
    TypeSet,
};
use crate::stats::{BaseStats, StatKind, StatModifiers};

/// Level-1 normal-type combatant with zero defense and the base 5/5
/// crit and dodge chances.
pub fn combatant(name: &str, hp: u32, attack: u32) -> Combatant {
    let mut types = TypeSet::new();
    types.push(ElementalType::Normal);
    Combatant {
        species: SpeciesId(1),
        name: name.to_owned(),
        types,
        stats: BaseStats {
            hp,
            max_hp: hp,
            attack,
            defense: 0,
            speed: 50,
            crit_chance: 5,
            dodge: 5,
        },
        level: 1,
        xp: 0,
        max_xp: 100,
        status: StatusCondition::Normal,
        equipment: Loadout::new(),
        moves: MoveSet::new(),
    }
}

pub fn catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        upgrades: vec![
            StatBoost::new("hp-up", "Potion", "Heal 20 HP", StatKind::Hp, 20),
            StatBoost::new("max-hp-up", "HP Up", "+10 Max HP", StatKind::MaxHp, 10),
            StatBoost::new("protein", "Protein", "+5 Attack", StatKind::Attack, 5),
            StatBoost::new("carbos", "Carbos", "+5 Speed", StatKind::Speed, 5),
            StatBoost::new("iron", "Iron", "+5 Defense", StatKind::Defense, 5),
        ],
        items: vec![
            ItemTemplate::new(
                "choice-band",
                "Choice Band",
                "Boosts attack.",
                StatModifiers::new().with(StatKind::Attack, 15),
            ),
            ItemTemplate::new(
                "leftovers",
                "Leftovers",
                "Sturdier body.",
                StatModifiers::new().with(StatKind::MaxHp, 20),
            ),
        ],
        evolutions: vec![Evolution::new(1, 2, 16), Evolution::new(4, 5, 16)],
        boss_pool: [144, 145, 146, 150].map(SpeciesId).to_vec(),
        mini_boss_pool: [65, 94, 115, 248].map(SpeciesId).to_vec(),
        starters: [1, 4, 7].map(SpeciesId).to_vec(),
        default_move: None,
    }
}
