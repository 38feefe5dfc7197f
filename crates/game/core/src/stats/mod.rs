//! Stat model.
//!
//! ```text
//! [ BaseStats ]  + Σ equipment modifiers  =  effective stat (signed, unclamped)
//!                                                 ↓
//!                                      combat stat (floored at 0)
//! ```
//!
//! [`effective_stat`] is the raw sum and may go negative when items with
//! negative modifiers stack. Every read that feeds combat math goes through
//! [`combat_stat`], which floors at zero; effective max HP never drops
//! below 1.
//!
//! HP is a pool. Item `hp` modifiers are applied once, as a heal, when the
//! item is equipped, so `effective_stat(c, Hp)` reports the current pool.

mod base;
mod kind;
mod modifiers;

pub use base::{BaseStats, scale_percent};
pub use kind::StatKind;
pub use modifiers::StatModifiers;

use crate::state::Combatant;

/// Base value plus the sum of all equipped modifiers for `stat`.
pub fn effective_stat(combatant: &Combatant, stat: StatKind) -> i32 {
    let base = combatant.stats.get(stat) as i32;
    if stat == StatKind::Hp {
        return base;
    }
    combatant
        .equipment
        .iter()
        .fold(base, |acc, item| acc.saturating_add(item.modifiers.get(stat)))
}

/// Effective stat floored at zero, as used by combat formulas.
pub fn combat_stat(combatant: &Combatant, stat: StatKind) -> u32 {
    effective_stat(combatant, stat).max(0) as u32
}

/// Effective maximum HP, never below 1.
pub fn effective_max_hp(combatant: &Combatant) -> u32 {
    effective_stat(combatant, StatKind::MaxHp).max(1) as u32
}
