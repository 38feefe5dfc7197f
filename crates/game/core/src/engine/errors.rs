//! Errors surfaced by the battle engine.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::progression::ProgressionError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{operation} is not allowed while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// Player input arrived while the enemy owns the turn.
    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("it is not the enemy's turn")]
    NotEnemyTurn,

    #[error("move index {index} out of range ({available} known)")]
    InvalidMoveIndex { index: usize, available: usize },

    #[error("upgrade index {index} out of range ({available} offered)")]
    InvalidUpgradeIndex { index: usize, available: usize },

    #[error("session has no {0} combatant")]
    MissingCombatant(&'static str),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),
}

impl EngineError {
    pub(crate) fn invalid_phase(operation: &'static str, phase: &'static str) -> Self {
        Self::InvalidPhase { operation, phase }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidPhase { .. }
            | Self::NotYourTurn
            | Self::NotEnemyTurn
            | Self::InvalidMoveIndex { .. }
            | Self::InvalidUpgradeIndex { .. } => ErrorSeverity::Validation,
            Self::MissingCombatant(_) => ErrorSeverity::Internal,
            Self::Oracle(error) => error.severity(),
            Self::Progression(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPhase { .. } => "ENGINE_INVALID_PHASE",
            Self::NotYourTurn => "ENGINE_NOT_YOUR_TURN",
            Self::NotEnemyTurn => "ENGINE_NOT_ENEMY_TURN",
            Self::InvalidMoveIndex { .. } => "ENGINE_INVALID_MOVE_INDEX",
            Self::InvalidUpgradeIndex { .. } => "ENGINE_INVALID_UPGRADE_INDEX",
            Self::MissingCombatant(_) => "ENGINE_MISSING_COMBATANT",
            Self::Oracle(error) => error.error_code(),
            Self::Progression(error) => error.error_code(),
        }
    }
}
