use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::SpeciesId;

/// Errors raised while applying a loot choice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionError {
    #[error("equipment is full ({} items)", GameConfig::MAX_EQUIPMENT)]
    EquipmentFull,

    /// An evolve upgrade was chosen without the evolved species data.
    #[error("evolution into {target} needs the evolved species")]
    MissingEvolution { target: SpeciesId },
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EquipmentFull => ErrorSeverity::Validation,
            Self::MissingEvolution { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EquipmentFull => "PROGRESSION_EQUIPMENT_FULL",
            Self::MissingEvolution { .. } => "PROGRESSION_MISSING_EVOLUTION",
        }
    }
}
