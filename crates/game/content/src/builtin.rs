//! Content compiled into the binary.
//!
//! These tables are the defaults every client starts from; data files loaded
//! through [`crate::loaders`] replace individual parts.

use game_core::{
    CatalogSnapshot, Evolution, ItemTemplate, SpeciesId, StatBoost, StatKind, StatModifiers,
    TablesSnapshot,
};

/// Species drawn on boss floors.
pub const BOSS_POOL: [u32; 4] = [144, 145, 146, 150];

/// Species drawn on mini-boss floors.
pub const MINI_BOSS_POOL: [u32; 4] = [65, 94, 115, 248];

/// Species offered as starters.
pub const STARTERS: [u32; 4] = [1, 4, 7, 25];

/// Level used for evolutions that normally need a stone or a trade.
const ITEM_EVOLUTION_LEVEL: u32 = 20;

/// Gen-1 evolution chains as `(species, target, min_level)`.
const EVOLUTIONS: &[(u32, u32, u32)] = &[
    (1, 2, 16),
    (2, 3, 32),
    (4, 5, 16),
    (5, 6, 36),
    (7, 8, 16),
    (8, 9, 36),
    (10, 11, 7),
    (11, 12, 10),
    (13, 14, 7),
    (14, 15, 10),
    (16, 17, 18),
    (17, 18, 36),
    (19, 20, 20),
    (21, 22, 20),
    (23, 24, 22),
    (25, 26, ITEM_EVOLUTION_LEVEL),
    (27, 28, 22),
    (29, 30, 16),
    (30, 31, ITEM_EVOLUTION_LEVEL),
    (32, 33, 16),
    (33, 34, ITEM_EVOLUTION_LEVEL),
    (35, 36, ITEM_EVOLUTION_LEVEL),
    (37, 38, ITEM_EVOLUTION_LEVEL),
    (39, 40, ITEM_EVOLUTION_LEVEL),
    (41, 42, 22),
    (43, 44, 21),
    (44, 45, ITEM_EVOLUTION_LEVEL),
    (46, 47, 24),
    (48, 49, 31),
    (50, 51, 26),
    (52, 53, 28),
    (54, 55, 33),
    (56, 57, 28),
    (58, 59, ITEM_EVOLUTION_LEVEL),
    (60, 61, 25),
    (61, 62, ITEM_EVOLUTION_LEVEL),
    (63, 64, 16),
    (64, 65, ITEM_EVOLUTION_LEVEL),
    (66, 67, 28),
    (67, 68, ITEM_EVOLUTION_LEVEL),
    (69, 70, 21),
    (70, 71, ITEM_EVOLUTION_LEVEL),
    (72, 73, 30),
    (74, 75, 25),
    (75, 76, ITEM_EVOLUTION_LEVEL),
    (77, 78, 40),
    (79, 80, 37),
    (81, 82, 30),
    (84, 85, 31),
    (86, 87, 34),
    (88, 89, 38),
    (90, 91, ITEM_EVOLUTION_LEVEL),
    (92, 93, 25),
    (93, 94, ITEM_EVOLUTION_LEVEL),
    (96, 97, 26),
    (98, 99, 28),
    (100, 101, 30),
    (102, 103, ITEM_EVOLUTION_LEVEL),
    (104, 105, 28),
    (109, 110, 35),
    (111, 112, 42),
    (116, 117, 32),
    (118, 119, 33),
    (120, 121, ITEM_EVOLUTION_LEVEL),
    (129, 130, 20),
    (133, 134, ITEM_EVOLUTION_LEVEL),
    (138, 139, 40),
    (140, 141, 40),
    (147, 148, 30),
    (148, 149, 55),
];

/// The stat upgrade pool.
pub fn upgrades() -> Vec<StatBoost> {
    vec![
        StatBoost::new("1", "Protein", "Increases Attack by 5", StatKind::Attack, 5),
        StatBoost::new("2", "Carbos", "Increases Speed by 5", StatKind::Speed, 5),
        StatBoost::new("3", "HP Up", "Increases Max HP by 10", StatKind::MaxHp, 10),
        StatBoost::new("4", "Potion", "Heal 20 HP", StatKind::Hp, 20),
        StatBoost::new("5", "Iron", "Increases Attack by 8 (Rare)", StatKind::Attack, 8),
    ]
}

/// The curated held-item catalog. Keys double as lookup names.
pub fn items() -> Vec<ItemTemplate> {
    let item = |key: &str, name: &str, description: &str, modifiers: StatModifiers| {
        ItemTemplate::new(key, name, description, modifiers)
    };
    let mods = StatModifiers::new;
    vec![
        item(
            "muscle-band",
            "Muscle Band",
            "A headband exuding pure fighting spirit. Grants a solid boost to physical damage.",
            mods().with(StatKind::Attack, 15),
        ),
        item(
            "iron-ball",
            "Iron Ball",
            "An incredibly heavy sphere. Massively increases Defense, but severely lowers Speed.",
            mods()
                .with(StatKind::Defense, 25)
                .with(StatKind::Speed, -15),
        ),
        item(
            "scope-lens",
            "Scope Lens",
            "A magnifying lens that highlights enemy weak points. Increases Critical Hit chance.",
            mods().with(StatKind::CritChance, 15),
        ),
        item(
            "bright-powder",
            "Bright Powder",
            "A glittering powder that disorients attackers. Increases Dodge chance.",
            mods().with(StatKind::Dodge, 12),
        ),
        item(
            "leftovers",
            "Leftovers",
            "Half-eaten food that fills you with determination. Grants a massive boost to Maximum Health.",
            mods().with(StatKind::MaxHp, 30).with(StatKind::Hp, 30),
        ),
        item(
            "choice-scarf",
            "Choice Scarf",
            "A lightweight scarf woven with wind magic. Guarantees you strike first most of the time.",
            mods().with(StatKind::Speed, 25),
        ),
        item(
            "life-orb",
            "Life Orb",
            "A cursed orb that grants immense, reckless power at the cost of your own vitality.",
            mods()
                .with(StatKind::Attack, 30)
                .with(StatKind::MaxHp, -10),
        ),
        item(
            "assault-vest",
            "Assault Vest",
            "A heavy tactical vest. Turns the wearer into an absolute defensive juggernaut.",
            mods().with(StatKind::Defense, 20),
        ),
    ]
}

pub fn evolutions() -> Vec<Evolution> {
    EVOLUTIONS
        .iter()
        .map(|&(species, target, min_level)| Evolution::new(species, target, min_level))
        .collect()
}

fn species(ids: &[u32]) -> Vec<SpeciesId> {
    ids.iter().copied().map(SpeciesId).collect()
}

/// The complete builtin catalog.
pub fn catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        upgrades: upgrades(),
        items: items(),
        evolutions: evolutions(),
        boss_pool: species(&BOSS_POOL),
        mini_boss_pool: species(&MINI_BOSS_POOL),
        starters: species(&STARTERS),
        default_move: None,
    }
}

/// Canonical balance tables.
pub fn tables() -> TablesSnapshot {
    TablesSnapshot::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::CatalogOracle;

    #[test]
    fn item_keys_are_unique() {
        let items = items();
        for (i, item) in items.iter().enumerate() {
            assert!(items[i + 1..].iter().all(|other| other.key != item.key));
        }
        assert_eq!(items.len(), 8);
    }

    #[test]
    fn evolution_lookup_by_species() {
        let catalog = catalog();
        let bulbasaur = catalog.evolution(SpeciesId(1)).unwrap();
        assert_eq!(bulbasaur.target, SpeciesId(2));
        assert_eq!(bulbasaur.min_level, 16);
        assert!(catalog.evolution(SpeciesId(150)).is_none());
    }

    #[test]
    fn every_evolution_stays_in_generation_one() {
        for evolution in evolutions() {
            assert!(evolution.target.get() <= 151);
            assert!(evolution.species < evolution.target);
        }
    }

    #[test]
    fn fallback_item_matches_placeholder() {
        let catalog = catalog();
        let item = catalog.fallback_item("quick-claw");
        assert_eq!(item.id, "local-quick-claw");
        assert_eq!(item.name, "QUICK CLAW");
        assert_eq!(item.modifiers.attack, 10);
        assert_eq!(item.modifiers.defense, 10);
        assert_eq!(item.modifiers.max_hp, 20);
    }
}
