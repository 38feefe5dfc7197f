//! Decision rules for the autoplay driver.
use game_core::{Combatant, StatKind, StatusCondition, Upgrade, effectiveness};

/// Index of the move with the best expected damage against `enemy`.
///
/// Status moves only score while the enemy is healthy. Ties keep the lower
/// index; an empty move list yields 0, the fallback move.
pub fn choose_move(player: &Combatant, enemy: &Combatant) -> usize {
    let mut best = (0, 0);
    for (index, mv) in player.moves.iter().enumerate() {
        let score = if mv.is_status_move() {
            if mv.ailment.is_some() && enemy.status == StatusCondition::Normal {
                20
            } else {
                0
            }
        } else {
            mv.power * effectiveness(mv.elemental_type, &enemy.types) * mv.accuracy / 100
        };
        if score > best.1 {
            best = (index, score);
        }
    }
    best.0
}

/// Index of the most valuable loot offer.
pub fn choose_upgrade(offers: &[Upgrade], player: Option<&Combatant>) -> usize {
    let wounded = player.is_some_and(|player| player.hp() * 2 < player.max_hp());
    offers
        .iter()
        .enumerate()
        .max_by_key(|(index, upgrade)| (upgrade_score(upgrade, wounded), usize::MAX - index))
        .map_or(0, |(index, _)| index)
}

fn upgrade_score(upgrade: &Upgrade, wounded: bool) -> u32 {
    match upgrade {
        Upgrade::Evolve(_) => 1_000,
        Upgrade::Equip(_) => 500,
        Upgrade::StatBoost(boost) => match boost.stat {
            StatKind::Hp if wounded => 600,
            StatKind::Hp => boost.amount,
            StatKind::Attack => boost.amount * 4,
            StatKind::MaxHp | StatKind::Speed => boost.amount * 2,
            _ => boost.amount,
        },
    }
}

#[cfg(test)]
mod tests {
    use game_core::spawn::build_combatant;
    use game_core::{
        BaseStatLine, CreatureData, ElementalType, Equipment, Evolution, Move, MoveAilment,
        SpeciesId, StatBoost, StatModifiers,
    };

    use super::*;

    fn combatant(element: ElementalType, moves: Vec<Move>) -> Combatant {
        let tables = game_content::tables();
        let data = CreatureData {
            species: SpeciesId(1),
            name: "Test".into(),
            types: vec![element],
            base: BaseStatLine {
                hp: 40,
                attack: 10,
                defense: 10,
                speed: 10,
            },
            moves: Vec::new(),
        };
        build_combatant(&data, moves, &tables.spawn, &tables.progression)
    }

    fn boost(stat: StatKind, amount: u32) -> Upgrade {
        Upgrade::StatBoost(StatBoost::new("x", "Boost", "", stat, amount))
    }

    #[test]
    fn prefers_super_effective_moves() {
        let player = combatant(
            ElementalType::Water,
            vec![
                Move::new("Tackle", ElementalType::Normal, 50, 100),
                Move::new("Water Gun", ElementalType::Water, 40, 100),
            ],
        );
        let enemy = combatant(ElementalType::Fire, Vec::new());
        assert_eq!(choose_move(&player, &enemy), 1);
    }

    #[test]
    fn status_move_only_against_healthy_enemy() {
        let player = combatant(
            ElementalType::Electric,
            vec![
                Move::new("Growl", ElementalType::Normal, 0, 100),
                Move::new("Thunder Wave", ElementalType::Electric, 0, 90)
                    .with_ailment(MoveAilment::Paralyze),
            ],
        );
        let mut enemy = combatant(ElementalType::Normal, Vec::new());
        assert_eq!(choose_move(&player, &enemy), 1);

        enemy.status = StatusCondition::Paralyze;
        assert_eq!(choose_move(&player, &enemy), 0);
    }

    #[test]
    fn empty_move_list_uses_fallback() {
        let player = combatant(ElementalType::Normal, Vec::new());
        let enemy = combatant(ElementalType::Normal, Vec::new());
        assert_eq!(choose_move(&player, &enemy), 0);
    }

    #[test]
    fn upgrade_priority() {
        let item = Upgrade::Equip(Equipment::new("a", "A", "", StatModifiers::new()));
        let evolve = Upgrade::Evolve(Evolution::new(1, 2, 16));
        assert_eq!(
            choose_upgrade(&[boost(StatKind::Attack, 5), item.clone(), evolve], None),
            2
        );
        assert_eq!(
            choose_upgrade(&[boost(StatKind::Speed, 5), boost(StatKind::Attack, 8)], None),
            1
        );
        assert_eq!(choose_upgrade(&[], None), 0);
    }

    #[test]
    fn wounded_player_takes_the_heal() {
        let mut player = combatant(ElementalType::Normal, Vec::new());
        player.stats.hp = 5;
        let item = Upgrade::Equip(Equipment::new("a", "A", "", StatModifiers::new()));
        let offers = [item, boost(StatKind::Hp, 20)];
        assert_eq!(choose_upgrade(&offers, Some(&player)), 1);
        assert_eq!(choose_upgrade(&offers, None), 0);
    }
}
