//! Enemy tiers and species selection.

use crate::env::{CatalogOracle, Dice, OracleError, RollKind, SpawnParams};
use crate::state::{Combatant, SpeciesId};
use crate::stats::StatKind;

/// Floor-derived enemy classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    #[default]
    Normal,
    MiniBoss,
    Boss,
}

impl Tier {
    /// Boss every `boss_interval` floors, mini-boss every
    /// `mini_boss_interval` floors that are not boss floors.
    pub fn for_floor(floor: u32, params: &SpawnParams) -> Self {
        if params.boss_interval > 0 && floor % params.boss_interval == 0 {
            Self::Boss
        } else if params.mini_boss_interval > 0 && floor % params.mini_boss_interval == 0 {
            Self::MiniBoss
        } else {
            Self::Normal
        }
    }

    /// Stat multiplier as a percentage.
    pub fn multiplier_percent(self, params: &SpawnParams) -> u32 {
        match self {
            Self::Normal => 100,
            Self::MiniBoss => params.mini_boss_multiplier_percent,
            Self::Boss => params.boss_multiplier_percent,
        }
    }
}

/// Applies the tier multiplier to max HP, attack and speed and heals to full.
pub fn apply_tier(combatant: &mut Combatant, tier: Tier, params: &SpawnParams) {
    let percent = tier.multiplier_percent(params);
    if percent == 100 {
        return;
    }
    for stat in [StatKind::MaxHp, StatKind::Attack, StatKind::Speed] {
        combatant.stats.scale(stat, percent);
    }
    combatant.full_heal();
}

/// Draws the species for an enemy on `floor`.
///
/// Boss and mini-boss floors draw from the curated pools; other floors
/// draw uniformly from the configured species range.
pub fn enemy_species(
    floor: u32,
    catalog: &(impl CatalogOracle + ?Sized),
    params: &SpawnParams,
    dice: &Dice<'_>,
) -> Result<SpeciesId, OracleError> {
    let pool = match Tier::for_floor(floor, params) {
        Tier::Normal => return Ok(any_species(params, dice)),
        Tier::MiniBoss => ("mini_boss_pool", catalog.mini_boss_pool()),
        Tier::Boss => ("boss_pool", catalog.boss_pool()),
    };
    let (name, species) = pool;
    if species.is_empty() {
        return Err(OracleError::EmptyPool(name));
    }
    Ok(species[dice.pick(RollKind::Species, 0, species.len())])
}

/// Uniform draw over the species range.
pub fn any_species(params: &SpawnParams, dice: &Dice<'_>) -> SpeciesId {
    SpeciesId(dice.range(RollKind::Species, params.species_min, params.species_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};
    use crate::testing::{catalog, combatant};

    #[test]
    fn tiers_by_floor() {
        let params = SpawnParams::new();
        assert_eq!(Tier::for_floor(1, &params), Tier::Normal);
        assert_eq!(Tier::for_floor(5, &params), Tier::MiniBoss);
        assert_eq!(Tier::for_floor(10, &params), Tier::Boss);
        assert_eq!(Tier::for_floor(15, &params), Tier::MiniBoss);
        assert_eq!(Tier::for_floor(20, &params), Tier::Boss);
    }

    #[test]
    fn boss_floor_stacks_on_floor_scaling() {
        let params = SpawnParams::new();
        let base = combatant("Mewtwo", 100, 110);
        let mut enemy = crate::spawn::scale_for_floor(&base, 10, &params);
        apply_tier(&mut enemy, Tier::for_floor(10, &params), &params);
        // 100 * 2.0 * 1.5
        assert_eq!(enemy.stats.max_hp, 300);
        assert_eq!(enemy.stats.hp, 300);
        // 110 * 2.0 * 1.5
        assert_eq!(enemy.stats.attack, 330);
    }

    #[test]
    fn mini_boss_multiplier() {
        let params = SpawnParams::new();
        let mut enemy = combatant("Alakazam", 100, 50);
        apply_tier(&mut enemy, Tier::MiniBoss, &params);
        assert_eq!(enemy.stats.max_hp, 120);
        assert_eq!(enemy.stats.attack, 60);
    }

    #[test]
    fn boss_species_come_from_the_pool() {
        let params = SpawnParams::new();
        let catalog = catalog();
        let rng = PcgRng;
        for nonce in 0..50 {
            let dice = Dice::new(&rng, 11, nonce, 1);
            let boss = enemy_species(10, &catalog, &params, &dice).unwrap();
            assert!(catalog.boss_pool.contains(&boss));
            let mini = enemy_species(5, &catalog, &params, &dice).unwrap();
            assert!(catalog.mini_boss_pool.contains(&mini));
            let normal = enemy_species(3, &catalog, &params, &dice).unwrap();
            assert!((1..=151).contains(&normal.get()));
        }
    }

    #[test]
    fn empty_pool_is_an_error() {
        let params = SpawnParams::new();
        let catalog = crate::env::CatalogSnapshot::default();
        let rng = SequenceRng::new(vec![0]);
        let dice = Dice::new(&rng, 0, 0, 1);
        assert_eq!(
            enemy_species(10, &catalog, &params, &dice),
            Err(OracleError::EmptyPool("boss_pool"))
        );
    }
}
