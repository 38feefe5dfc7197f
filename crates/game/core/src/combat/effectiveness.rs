//! One-directional type weakness chart.
//!
//! Effectiveness is binary: 2x when the move's type is strong against any of
//! the defender's types, 1x otherwise. There are no resistances or
//! immunities.

use crate::state::ElementalType;

pub const NEUTRAL: u32 = 1;
pub const SUPER_EFFECTIVE: u32 = 2;

/// Types that `attacking` is super effective against.
pub const fn strong_against(attacking: ElementalType) -> &'static [ElementalType] {
    use ElementalType::*;
    match attacking {
        Fire => &[Grass, Ice, Bug, Steel],
        Water => &[Fire, Ground, Rock],
        Grass => &[Water, Ground, Rock],
        Electric => &[Water, Flying],
        Ice => &[Grass, Ground, Flying, Dragon],
        Fighting => &[Normal, Ice, Rock, Dark, Steel],
        Poison => &[Grass, Fairy],
        Ground => &[Fire, Electric, Poison, Rock, Steel],
        Flying => &[Grass, Fighting, Bug],
        Psychic => &[Fighting, Poison],
        Bug => &[Grass, Psychic, Dark],
        Rock => &[Fire, Ice, Flying, Bug],
        Ghost => &[Psychic, Ghost],
        Dragon => &[Dragon],
        Dark => &[Psychic, Ghost],
        Steel => &[Ice, Rock, Fairy],
        Fairy => &[Fighting, Dragon, Dark],
        Normal => &[],
    }
}

/// Type multiplier of a move against a defender.
pub fn effectiveness(move_type: ElementalType, defender_types: &[ElementalType]) -> u32 {
    let chart = strong_against(move_type);
    if defender_types.iter().any(|defender| chart.contains(defender)) {
        SUPER_EFFECTIVE
    } else {
        NEUTRAL
    }
}

/// String-keyed variant; unrecognized tags on either side count as neutral.
pub fn effectiveness_by_name(move_type: &str, defender_types: &[&str]) -> u32 {
    let Some(attacking) = ElementalType::parse(move_type) else {
        return NEUTRAL;
    };
    let defenders: Vec<ElementalType> = defender_types
        .iter()
        .filter_map(|name| ElementalType::parse(name))
        .collect();
    effectiveness(attacking, &defenders)
}
