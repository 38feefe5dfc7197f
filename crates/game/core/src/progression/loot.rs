//! Loot drafting after a victory.

use crate::env::{CatalogOracle, Dice, ProgressionParams, RollKind};
use crate::state::{Combatant, Equipment, Upgrade};

/// Offers drawn before the equipment lookup has completed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDraft {
    pub offers: Vec<Upgrade>,
    /// Catalog key of the item to fetch, when this floor drops equipment.
    pub equipment_key: Option<String>,
}

/// Whether `player` may be offered an evolution right now.
pub fn evolution_offer(
    player: &Combatant,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Option<Upgrade> {
    catalog
        .evolution(player.species)
        .filter(|evolution| player.level >= evolution.min_level)
        .map(Upgrade::Evolve)
}

/// Draws the offers for a cleared floor.
///
/// The stat pool (plus an evolve offer when eligible) is shuffled and the
/// first `stat_offers` entries are kept. Equipment floors then pick an item
/// key to fetch, unless the player's loadout is full; other floors add one
/// more stat upgrade drawn independently of the first ones.
pub fn draft_loot(
    player: &Combatant,
    floor: u32,
    catalog: &(impl CatalogOracle + ?Sized),
    params: &ProgressionParams,
    dice: &Dice<'_>,
) -> LootDraft {
    let mut pool: Vec<Upgrade> = catalog
        .upgrades()
        .iter()
        .cloned()
        .map(Upgrade::StatBoost)
        .collect();
    pool.extend(evolution_offer(player, catalog));
    dice.shuffle(RollKind::LootShuffle, &mut pool);
    pool.truncate(params.stat_offers as usize);

    let drops_equipment = params.equipment_drop_interval > 0
        && floor % params.equipment_drop_interval == 0
        && player.can_equip()
        && !catalog.items().is_empty();

    let mut equipment_key = None;
    if drops_equipment {
        let items = catalog.items();
        let index = dice.pick(RollKind::ItemPick, 0, items.len());
        equipment_key = Some(items[index].key.clone());
    } else if !catalog.upgrades().is_empty() {
        let upgrades = catalog.upgrades();
        let index = dice.pick(RollKind::LootExtra, 0, upgrades.len());
        pool.push(Upgrade::StatBoost(upgrades[index].clone()));
    }

    LootDraft {
        offers: pool,
        equipment_key,
    }
}

/// Completes a draft with the looked-up item.
///
/// A missing item is replaced by the catalog's placeholder so an equipment
/// floor always yields an equipment offer.
pub fn finalize_loot(
    draft: LootDraft,
    fetched: Option<Equipment>,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Vec<Upgrade> {
    let LootDraft {
        mut offers,
        equipment_key,
    } = draft;
    if let Some(key) = equipment_key {
        let item = fetched.unwrap_or_else(|| catalog.fallback_item(&key));
        offers.push(Upgrade::Equip(item));
    }
    offers
}
