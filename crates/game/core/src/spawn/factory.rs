//! Combatant construction and floor scaling.

use super::{CreatureData, MoveRef};
use crate::config::GameConfig;
use crate::env::{Dice, ProgressionParams, RollKind, SpawnParams};
use crate::state::{Combatant, ElementalType, Loadout, Move, MoveSet, StatusCondition, TypeSet};
use crate::stats::{BaseStats, StatKind};

/// Builds a level-1 combatant from looked-up species data.
///
/// At most four moves are kept, in the order given. Types beyond the second
/// are dropped; a species reporting none is treated as normal-type.
pub fn build_combatant(
    data: &CreatureData,
    moves: impl IntoIterator<Item = Move>,
    spawn: &SpawnParams,
    progression: &ProgressionParams,
) -> Combatant {
    let mut types = TypeSet::new();
    for elemental_type in data.types.iter().take(GameConfig::MAX_TYPES) {
        types.push(*elemental_type);
    }
    if types.is_empty() {
        types.push(ElementalType::Normal);
    }

    let moves: MoveSet = moves.into_iter().take(GameConfig::MAX_MOVES).collect();

    Combatant {
        species: data.species,
        name: data.name.clone(),
        types,
        stats: BaseStats {
            hp: data.base.hp,
            max_hp: data.base.hp,
            attack: data.base.attack,
            defense: data.base.defense,
            speed: data.base.speed,
            crit_chance: spawn.base_crit_chance,
            dodge: spawn.base_dodge,
        },
        level: 1,
        xp: 0,
        max_xp: progression.starting_max_xp,
        status: StatusCondition::Normal,
        equipment: Loadout::new(),
        moves,
    }
}

/// Species move references in a random order.
///
/// Callers fetch details in this order and keep the first accepted moves,
/// which yields a random subset of the learnable pool.
pub fn move_candidates(refs: &[MoveRef], dice: &Dice<'_>) -> Vec<MoveRef> {
    let mut shuffled = refs.to_vec();
    dice.shuffle(RollKind::MoveShuffle, &mut shuffled);
    shuffled
}

/// Scales max HP, attack and speed by `1 + floor * 10%`, rounding down,
/// then sets the level to `floor` and heals to full.
///
/// Evolution reuses this with the player's level in place of the floor.
pub fn scale_for_floor(base: &Combatant, floor: u32, params: &SpawnParams) -> Combatant {
    let mut scaled = base.clone();
    let percent = 100u32.saturating_add(floor.saturating_mul(params.floor_scaling_percent));
    for stat in [StatKind::MaxHp, StatKind::Attack, StatKind::Speed] {
        scaled.stats.scale(stat, percent);
    }
    scaled.level = floor.max(1);
    scaled.full_heal();
    scaled
}
