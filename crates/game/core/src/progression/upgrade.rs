//! Applying a chosen loot offer.

use super::ProgressionError;
use crate::env::SpawnParams;
use crate::spawn::scale_for_floor;
use crate::state::{Combatant, Upgrade};
use crate::stats::StatKind;

/// Applies `upgrade` to `player`.
///
/// `evolved` is the freshly built target species for an evolve offer; it is
/// rescaled to the player's level and keeps the player's xp, max xp and
/// equipment.
pub fn apply_upgrade(
    player: &mut Combatant,
    upgrade: &Upgrade,
    evolved: Option<Combatant>,
    spawn: &SpawnParams,
) -> Result<(), ProgressionError> {
    match upgrade {
        Upgrade::StatBoost(boost) => {
            if boost.stat == StatKind::Hp {
                player.heal(boost.amount);
            } else {
                let value = player.stats.get_mut(boost.stat);
                *value = value.saturating_add(boost.amount);
            }
        }
        Upgrade::Equip(item) => {
            if !player.can_equip() {
                return Err(ProgressionError::EquipmentFull);
            }
            player.equipment.push(item.clone());
            // HP modifiers are consumed as a heal on pickup.
            if item.modifiers.hp > 0 {
                player.heal(item.modifiers.hp as u32);
            }
            player.clamp_hp();
        }
        Upgrade::Evolve(evolution) => {
            let base = evolved.ok_or(ProgressionError::MissingEvolution {
                target: evolution.target,
            })?;
            let mut next = scale_for_floor(&base, player.level, spawn);
            next.xp = player.xp;
            next.max_xp = player.max_xp;
            next.equipment = core::mem::take(&mut player.equipment);
            next.full_heal();
            *player = next;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Equipment, Evolution, SpeciesId, StatBoost};
    use crate::stats::StatModifiers;
    use crate::testing::combatant;

    fn item(id: &str, modifiers: StatModifiers) -> Equipment {
        Equipment::new(id, id, "", modifiers)
    }

    #[test]
    fn hp_boost_is_clamped_to_max() {
        let mut player = combatant("Charmander", 39, 52);
        player.stats.hp = 30;
        let potion = Upgrade::StatBoost(StatBoost::new("hp", "Potion", "", StatKind::Hp, 20));
        apply_upgrade(&mut player, &potion, None, &SpawnParams::new()).unwrap();
        assert_eq!(player.stats.hp, 39);
    }

    #[test]
    fn attack_boost_adds_to_base() {
        let mut player = combatant("Charmander", 39, 52);
        let protein =
            Upgrade::StatBoost(StatBoost::new("atk", "Protein", "", StatKind::Attack, 5));
        apply_upgrade(&mut player, &protein, None, &SpawnParams::new()).unwrap();
        assert_eq!(player.stats.attack, 57);
    }

    #[test]
    fn equip_is_rejected_at_capacity() {
        let mut player = combatant("Charmander", 39, 52);
        let offer = Upgrade::Equip(item("band", StatModifiers::new()));
        for _ in 0..6 {
            apply_upgrade(&mut player, &offer, None, &SpawnParams::new()).unwrap();
        }
        assert_eq!(
            apply_upgrade(&mut player, &offer, None, &SpawnParams::new()),
            Err(ProgressionError::EquipmentFull)
        );
        assert_eq!(player.equipment.len(), 6);
    }

    #[test]
    fn negative_max_hp_item_clamps_current_hp() {
        let mut player = combatant("Charmander", 40, 52);
        let cursed = Upgrade::Equip(item("cursed", StatModifiers::new().with(StatKind::MaxHp, -15)));
        apply_upgrade(&mut player, &cursed, None, &SpawnParams::new()).unwrap();
        assert_eq!(player.max_hp(), 25);
        assert_eq!(player.stats.hp, 25);
    }

    #[test]
    fn evolution_preserves_progress() {
        let mut player = combatant("Bulbasaur", 45, 49);
        player.level = 16;
        player.xp = 40;
        player.max_xp = 120;
        let held = item("itemA", StatModifiers::new().with(StatKind::Attack, 10));
        player.equipment.push(held.clone());

        let mut ivysaur = combatant("Ivysaur", 60, 62);
        ivysaur.species = SpeciesId(2);

        let evolve = Upgrade::Evolve(Evolution::new(1, 2, 16));
        apply_upgrade(&mut player, &evolve, Some(ivysaur), &SpawnParams::new()).unwrap();

        assert_eq!(player.species, SpeciesId(2));
        assert_eq!(player.name, "Ivysaur");
        assert_eq!(player.level, 16);
        // 60 * 2.6 and 62 * 2.6
        assert_eq!(player.stats.max_hp, 156);
        assert_eq!(player.stats.attack, 161);
        assert_eq!(player.stats.hp, 156);
        assert_eq!(player.xp, 40);
        assert_eq!(player.max_xp, 120);
        assert_eq!(player.equipment.as_slice(), &[held]);
    }

    #[test]
    fn evolve_without_species_data_fails() {
        let mut player = combatant("Bulbasaur", 45, 49);
        let evolve = Upgrade::Evolve(Evolution::new(1, 2, 16));
        assert_eq!(
            apply_upgrade(&mut player, &evolve, None, &SpawnParams::new()),
            Err(ProgressionError::MissingEvolution {
                target: SpeciesId(2)
            })
        );
        assert_eq!(player.species, SpeciesId(1));
    }
}
