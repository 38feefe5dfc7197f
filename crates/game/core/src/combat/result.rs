//! Turn results and narration.

use core::fmt;

use crate::state::{Side, StatusCondition};

/// A narrated step of a turn.
///
/// `Display` renders the player-facing log line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    Thawed {
        name: String,
    },
    FrozenSolid {
        name: String,
    },
    FullyParalyzed {
        name: String,
    },
    Missed {
        attacker: String,
        move_name: String,
    },
    Dodged {
        defender: String,
    },
    Hit {
        attacker: String,
        defender: String,
        move_name: String,
        damage: u32,
        critical: bool,
        super_effective: bool,
        inflicted: Option<StatusCondition>,
    },
    Residual {
        name: String,
        damage: u32,
        status: StatusCondition,
    },
    Fainted {
        name: String,
        side: Side,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thawed { name } => write!(f, "{name} thawed out!"),
            Self::FrozenSolid { name } => write!(f, "{name} is frozen solid!"),
            Self::FullyParalyzed { name } => write!(f, "{name} is paralyzed! It can't move!"),
            Self::Missed {
                attacker,
                move_name,
            } => write!(f, "{attacker} used {move_name} but missed!"),
            Self::Dodged { defender } => write!(f, "{defender} dodged the attack!"),
            Self::Hit {
                attacker,
                defender,
                move_name,
                damage,
                critical,
                super_effective,
                inflicted,
            } => {
                write!(f, "{attacker} used {move_name} for {damage} damage!")?;
                if *critical {
                    f.write_str(" A Critical Hit!")?;
                }
                if *super_effective {
                    f.write_str(" It's Super Effective!")?;
                }
                if let Some(status) = inflicted {
                    write!(f, " {defender} was inflicted with {status}!")?;
                }
                Ok(())
            }
            Self::Residual {
                name,
                damage,
                status,
            } => write!(f, "{name} took {damage} damage from its {status}!"),
            Self::Fainted { name, .. } => write!(f, "{name} fainted!"),
        }
    }
}

/// Everything one call to [`super::resolve_turn`] produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub events: Vec<BattleEvent>,
    /// Damage dealt to the defender (0 on forfeits, misses and dodges).
    pub damage: u32,
    /// The turn ended before the move was attempted.
    pub forfeited: bool,
    pub defender_fainted: bool,
    /// The attacker fainted from its own residual damage.
    pub attacker_fainted: bool,
}

impl TurnReport {
    pub fn narration(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(|event| event.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_narration_appends_flags_in_order() {
        let event = BattleEvent::Hit {
            attacker: "Pikachu".into(),
            defender: "Gyarados".into(),
            move_name: "Thunderbolt".into(),
            damage: 12,
            critical: true,
            super_effective: true,
            inflicted: Some(StatusCondition::Paralyze),
        };
        assert_eq!(
            event.to_string(),
            "Pikachu used Thunderbolt for 12 damage! A Critical Hit! It's Super Effective! Gyarados was inflicted with paralyze!"
        );
    }

    #[test]
    fn residual_narration() {
        let event = BattleEvent::Residual {
            name: "Oddish".into(),
            damage: 4,
            status: StatusCondition::Poison,
        };
        assert_eq!(event.to_string(), "Oddish took 4 damage from its poison!");
    }
}
