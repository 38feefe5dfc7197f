//! Damage calculation.

use crate::env::CombatParams;

/// Inputs to [`calculate_damage`], all already floored at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageInput {
    pub attack: u32,
    pub defense: u32,
    pub power: u32,
    pub type_multiplier: u32,
    pub critical: bool,
}

/// Calculate damage from a connecting move.
///
/// # Formula
///
/// ```text
/// raw        = attack * power / divisor
/// mitigation = base / (base + defense)
/// final      = max(minimum, floor(raw * type * mitigation * crit))
/// ```
///
/// Evaluated as a single integer fraction so the floor is exact.
pub fn calculate_damage(input: DamageInput, params: &CombatParams) -> u32 {
    let crit_percent = if input.critical {
        params.crit_multiplier_percent
    } else {
        100
    } as u128;

    let numerator = input.attack as u128
        * input.power as u128
        * input.type_multiplier as u128
        * params.mitigation_base as u128
        * crit_percent;
    let denominator = params.damage_divisor.max(1) as u128
        * (params.mitigation_base as u128 + input.defense as u128).max(1)
        * 100;

    let damage = (numerator / denominator).min(u32::MAX as u128) as u32;
    damage.max(params.minimum_damage)
}

/// Residual burn/poison damage for a combatant with the given max HP.
pub fn residual_damage(max_hp: u32, params: &CombatParams) -> u32 {
    let tick = (max_hp as u64 * params.residual_percent as u64 / 100) as u32;
    tick.max(1)
}
