//! Status gate and infliction rolls.

use crate::env::{CombatParams, Dice, RollKind};
use crate::state::{Move, StatusCondition};

/// Result of the pre-move status gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// No gating status, or the paralysis roll passed.
    Proceed,
    /// Freeze ended. The thaw consumes the turn.
    Thawed,
    /// Still frozen; turn forfeited.
    Frozen,
    /// Paralysis roll failed; turn forfeited.
    Paralyzed,
}

impl GateOutcome {
    pub const fn proceeds(self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Rolls the pre-move gate. Draws once only for frozen or paralyzed actors.
pub fn status_gate(status: StatusCondition, dice: &Dice<'_>, params: &CombatParams) -> GateOutcome {
    match status {
        StatusCondition::Freeze => {
            if dice.percent(RollKind::StatusGate) < params.thaw_chance {
                GateOutcome::Thawed
            } else {
                GateOutcome::Frozen
            }
        }
        StatusCondition::Paralyze => {
            if dice.percent(RollKind::StatusGate) < params.paralysis_skip_chance {
                GateOutcome::Paralyzed
            } else {
                GateOutcome::Proceed
            }
        }
        _ => GateOutcome::Proceed,
    }
}

/// Decides whether `mv` inflicts its ailment on a defender.
///
/// Nothing is drawn when the move carries no applicable ailment or the
/// defender already has a status. Pure status moves always land; damaging
/// moves roll against `status_chance`.
pub fn roll_infliction(
    mv: &Move,
    defender_status: StatusCondition,
    dice: &Dice<'_>,
    params: &CombatParams,
) -> Option<StatusCondition> {
    if !defender_status.is_normal() {
        return None;
    }
    let status = mv.ailment?.as_status()?;
    if mv.is_status_move() || dice.percent(RollKind::Infliction) < params.status_chance {
        Some(status)
    } else {
        None
    }
}
