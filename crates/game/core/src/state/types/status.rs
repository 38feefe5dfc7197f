//! Persistent combat conditions.

/// The single status a combatant carries. `Normal` means unaffected.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatusCondition {
    #[default]
    Normal,
    Burn,
    Poison,
    Paralyze,
    Freeze,
}

impl StatusCondition {
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Burn and poison deal residual damage after the bearer acts.
    pub const fn deals_residual(self) -> bool {
        matches!(self, Self::Burn | Self::Poison)
    }

    /// Freeze and paralysis may cost the bearer its turn.
    pub const fn gates_turn(self) -> bool {
        matches!(self, Self::Freeze | Self::Paralyze)
    }
}

/// Ailment a move may carry. `Stunned` is tracked but never applied.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MoveAilment {
    Burn,
    Poison,
    #[strum(to_string = "paralyze", serialize = "paralysis")]
    Paralyze,
    Freeze,
    Stunned,
}

impl MoveAilment {
    /// The status this ailment applies, or `None` for excluded ailments.
    pub const fn as_status(self) -> Option<StatusCondition> {
        match self {
            Self::Burn => Some(StatusCondition::Burn),
            Self::Poison => Some(StatusCondition::Poison),
            Self::Paralyze => Some(StatusCondition::Paralyze),
            Self::Freeze => Some(StatusCondition::Freeze),
            Self::Stunned => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ailment_names_parse() {
        assert_eq!("paralysis".parse::<MoveAilment>(), Ok(MoveAilment::Paralyze));
        assert_eq!("burn".parse::<MoveAilment>(), Ok(MoveAilment::Burn));
        assert!("confusion".parse::<MoveAilment>().is_err());
    }

    #[test]
    fn stunned_never_maps_to_a_status() {
        assert_eq!(MoveAilment::Stunned.as_status(), None);
        assert_eq!(
            MoveAilment::Freeze.as_status(),
            Some(StatusCondition::Freeze)
        );
    }
}
