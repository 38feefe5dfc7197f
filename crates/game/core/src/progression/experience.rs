//! Experience and level-ups.

use crate::env::ProgressionParams;
use crate::state::Combatant;
use crate::stats::{StatKind, scale_percent};

/// Result of awarding experience for a defeated enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceGain {
    pub xp_gained: u32,
    pub leveled_up: bool,
    pub new_level: u32,
}

/// Grants `enemy_level * xp_per_enemy_level` experience.
///
/// Reaching `max_xp` levels up exactly once; the excess carries over even
/// when it exceeds the next threshold.
pub fn award_experience(
    player: &mut Combatant,
    enemy_level: u32,
    params: &ProgressionParams,
) -> ExperienceGain {
    let xp_gained = enemy_level.max(1).saturating_mul(params.xp_per_enemy_level);
    let total = player.xp.saturating_add(xp_gained);

    let leveled_up = total >= player.max_xp;
    if leveled_up {
        level_up(player, total - player.max_xp, params);
    } else {
        player.xp = total;
    }

    ExperienceGain {
        xp_gained,
        leveled_up,
        new_level: player.level,
    }
}

/// Raises the level by one, growing max HP, attack and speed, then heals.
pub fn level_up(combatant: &mut Combatant, overflow: u32, params: &ProgressionParams) {
    combatant.level = combatant.level.saturating_add(1);
    for stat in [StatKind::MaxHp, StatKind::Attack, StatKind::Speed] {
        combatant.stats.scale(stat, params.level_growth_percent);
    }
    combatant.max_xp = scale_percent(combatant.max_xp, params.xp_growth_percent);
    combatant.xp = overflow;
    combatant.full_heal();
}
