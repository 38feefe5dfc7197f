//! Single-turn resolution.

use super::damage::{DamageInput, calculate_damage, residual_damage};
use super::effectiveness::{SUPER_EFFECTIVE, effectiveness};
use super::hit::{check_accuracy, check_critical, check_dodge};
use super::result::{BattleEvent, TurnReport};
use super::status::{GateOutcome, roll_infliction, status_gate};
use crate::env::{CombatParams, Dice, RollKind};
use crate::state::{Combatant, Move, Side, StatusCondition};
use crate::stats::{StatKind, combat_stat};

/// Resolves one turn of `attacker` (on `side`) using `mv` against `defender`.
///
/// Steps run in a fixed order, and each draw happens only when its step is
/// reached:
///
/// 1. status gate (frozen or paralyzed attackers only)
/// 2. accuracy
/// 3. dodge
/// 4. critical
/// 5. damage (no draw)
/// 6. infliction (damaging moves with an applicable ailment only)
/// 7. apply damage
/// 8. residual tick on a burned or poisoned attacker
///
/// A thaw clears the freeze but consumes the turn. Misses and dodges end the
/// turn without residual damage.
pub fn resolve_turn(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    mv: &Move,
    side: Side,
    params: &CombatParams,
    dice: &Dice<'_>,
) -> TurnReport {
    let mut report = TurnReport::default();

    match status_gate(attacker.status, dice, params) {
        GateOutcome::Proceed => {}
        GateOutcome::Thawed => {
            attacker.status = StatusCondition::Normal;
            report.events.push(BattleEvent::Thawed {
                name: attacker.name.clone(),
            });
            report.forfeited = true;
            return report;
        }
        GateOutcome::Frozen => {
            report.events.push(BattleEvent::FrozenSolid {
                name: attacker.name.clone(),
            });
            report.forfeited = true;
            return report;
        }
        GateOutcome::Paralyzed => {
            report.events.push(BattleEvent::FullyParalyzed {
                name: attacker.name.clone(),
            });
            report.forfeited = true;
            return report;
        }
    }

    if !check_accuracy(mv.accuracy, dice.percent(RollKind::Accuracy)) {
        report.events.push(BattleEvent::Missed {
            attacker: attacker.name.clone(),
            move_name: mv.name.clone(),
        });
        return report;
    }

    let dodge = combat_stat(defender, StatKind::Dodge);
    if check_dodge(dodge, dice.percent(RollKind::Dodge)) {
        report.events.push(BattleEvent::Dodged {
            defender: defender.name.clone(),
        });
        return report;
    }

    let crit_chance = combat_stat(attacker, StatKind::CritChance);
    let critical = check_critical(crit_chance, dice.percent(RollKind::Critical));

    let type_multiplier = effectiveness(mv.elemental_type, &defender.types);
    let damage = calculate_damage(
        DamageInput {
            attack: combat_stat(attacker, StatKind::Attack),
            defense: combat_stat(defender, StatKind::Defense),
            power: mv.power,
            type_multiplier,
            critical,
        },
        params,
    );

    let inflicted = roll_infliction(mv, defender.status, dice, params);
    if let Some(status) = inflicted {
        defender.status = status;
    }

    defender.take_damage(damage);
    report.damage = damage;
    report.events.push(BattleEvent::Hit {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        move_name: mv.name.clone(),
        damage,
        critical,
        super_effective: type_multiplier >= SUPER_EFFECTIVE,
        inflicted,
    });

    if attacker.status.deals_residual() {
        let tick = residual_damage(attacker.stats.max_hp, params);
        attacker.take_damage(tick);
        report.events.push(BattleEvent::Residual {
            name: attacker.name.clone(),
            damage: tick,
            status: attacker.status,
        });
    }

    if defender.is_fainted() {
        report.defender_fainted = true;
        report.events.push(BattleEvent::Fainted {
            name: defender.name.clone(),
            side: side.opponent(),
        });
    }
    if attacker.is_fainted() {
        report.attacker_fainted = true;
        report.events.push(BattleEvent::Fainted {
            name: attacker.name.clone(),
            side,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};
    use crate::state::{ElementalType, MoveAilment};
    use crate::testing::combatant;

    fn tackle() -> Move {
        Move::new("Tackle", ElementalType::Normal, 40, 100)
    }

    fn run(
        rolls: Vec<u32>,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        mv: &Move,
    ) -> (TurnReport, usize) {
        let rng = SequenceRng::new(rolls);
        let dice = Dice::new(&rng, 0, 0, 0);
        let report = resolve_turn(
            attacker,
            defender,
            mv,
            Side::Player,
            &CombatParams::new(),
            &dice,
        );
        (report, rng.drawn())
    }

    #[test]
    fn miss_leaves_defender_untouched() {
        let mut attacker = combatant("Pidgey", 40, 45);
        let mut defender = combatant("Rattata", 30, 56);
        let mv = Move::new("Sand Attack", ElementalType::Ground, 30, 50);

        let (report, drawn) = run(vec![60], &mut attacker, &mut defender, &mv);

        assert_eq!(defender.hp(), 30);
        assert_eq!(report.damage, 0);
        assert_eq!(drawn, 1);
        assert_eq!(
            report.events,
            vec![BattleEvent::Missed {
                attacker: "Pidgey".into(),
                move_name: "Sand Attack".into(),
            }]
        );
    }

    #[test]
    fn dodge_consumes_two_draws() {
        let mut attacker = combatant("Pidgey", 40, 45);
        let mut defender = combatant("Rattata", 30, 56);
        let (report, drawn) = run(vec![0, 4], &mut attacker, &mut defender, &tackle());
        assert_eq!(drawn, 2);
        assert_eq!(defender.hp(), 30);
        assert!(matches!(report.events[0], BattleEvent::Dodged { .. }));
    }

    #[test]
    fn hit_applies_damage_and_narrates() {
        let mut attacker = combatant("Charmander", 39, 52);
        let mut defender = combatant("Bulbasaur", 45, 49);
        defender.types.clear();
        defender.types.push(ElementalType::Grass);
        defender.stats.defense = 49;
        let ember = Move::new("Ember", ElementalType::Fire, 40, 100);

        // accuracy, dodge (99 > 5), crit (99 > 5)
        let (report, drawn) = run(vec![0, 99, 99], &mut attacker, &mut defender, &ember);

        // 52*40/50 = 41.6; *2 = 83.2; *100/149 = 55.8
        assert_eq!(report.damage, 55);
        assert_eq!(defender.hp(), 0);
        assert_eq!(drawn, 3);
        assert_eq!(
            report.events[0].to_string(),
            "Charmander used Ember for 55 damage! It's Super Effective!"
        );
        assert!(report.defender_fainted);
        assert_eq!(report.events[1].to_string(), "Bulbasaur fainted!");
    }

    #[test]
    fn frozen_attacker_forfeits() {
        let mut attacker = combatant("Lapras", 130, 85);
        attacker.status = StatusCondition::Freeze;
        let mut defender = combatant("Dewgong", 90, 70);
        let (report, drawn) = run(vec![50], &mut attacker, &mut defender, &tackle());
        assert!(report.forfeited);
        assert_eq!(drawn, 1);
        assert_eq!(attacker.status, StatusCondition::Freeze);
        assert_eq!(report.events[0].to_string(), "Lapras is frozen solid!");
    }

    #[test]
    fn thaw_consumes_the_turn() {
        let mut attacker = combatant("Lapras", 130, 85);
        attacker.status = StatusCondition::Freeze;
        let mut defender = combatant("Dewgong", 90, 70);
        let (report, _) = run(vec![10], &mut attacker, &mut defender, &tackle());
        assert!(report.forfeited);
        assert_eq!(attacker.status, StatusCondition::Normal);
        assert_eq!(defender.hp(), 90);
        assert_eq!(report.events[0].to_string(), "Lapras thawed out!");
    }

    #[test]
    fn paralysis_can_skip_the_turn() {
        let mut attacker = combatant("Pikachu", 35, 55);
        attacker.status = StatusCondition::Paralyze;
        let mut defender = combatant("Geodude", 40, 80);
        let (report, _) = run(vec![3], &mut attacker, &mut defender, &tackle());
        assert!(report.forfeited);
        assert_eq!(
            report.events[0].to_string(),
            "Pikachu is paralyzed! It can't move!"
        );
        assert_eq!(attacker.status, StatusCondition::Paralyze);
    }

    #[test]
    fn damaging_move_inflicts_on_low_roll() {
        let mut attacker = combatant("Ponyta", 50, 85);
        let mut defender = combatant("Oddish", 200, 50);
        let ember = Move::new("Ember", ElementalType::Fire, 40, 100).with_ailment(MoveAilment::Burn);
        let (report, drawn) = run(vec![0, 99, 99, 10], &mut attacker, &mut defender, &ember);
        assert_eq!(drawn, 4);
        assert_eq!(defender.status, StatusCondition::Burn);
        assert!(matches!(
            report.events[0],
            BattleEvent::Hit {
                inflicted: Some(StatusCondition::Burn),
                ..
            }
        ));
    }

    #[test]
    fn residual_ticks_on_the_attacker_after_hitting() {
        let mut attacker = combatant("Ekans", 35, 60);
        attacker.stats.max_hp = 45;
        attacker.stats.hp = 45;
        attacker.status = StatusCondition::Poison;
        let mut defender = combatant("Spearow", 40, 60);
        let (report, _) = run(vec![0, 99, 99], &mut attacker, &mut defender, &tackle());
        assert_eq!(attacker.hp(), 41);
        assert_eq!(report.events[1].to_string(), "Ekans took 4 damage from its poison!");
    }

    #[test]
    fn residual_ignores_held_item_hp_bonus() {
        let mut attacker = combatant("Ekans", 45, 60);
        attacker.status = StatusCondition::Poison;
        attacker.equipment.push(crate::state::Equipment::new(
            "big-root",
            "Big Root",
            "",
            crate::stats::StatModifiers::new().with(StatKind::MaxHp, 55),
        ));
        assert_eq!(attacker.max_hp(), 100);
        let mut defender = combatant("Spearow", 40, 60);
        let (report, _) = run(vec![0, 99, 99], &mut attacker, &mut defender, &tackle());
        assert_eq!(attacker.hp(), 41);
        assert_eq!(report.events[1].to_string(), "Ekans took 4 damage from its poison!");
    }

    #[test]
    fn no_residual_after_a_miss() {
        let mut attacker = combatant("Ekans", 35, 60);
        attacker.status = StatusCondition::Burn;
        let mut defender = combatant("Spearow", 40, 60);
        let mv = Move::new("Wrap", ElementalType::Normal, 15, 90);
        let (_, _) = run(vec![95], &mut attacker, &mut defender, &mv);
        assert_eq!(attacker.hp(), 35);
    }

    #[test]
    fn critical_multiplies_by_one_and_a_half() {
        let mut attacker = combatant("Machop", 70, 100);
        let mut defender = combatant("Rattata", 500, 56);
        defender.stats.defense = 100;
        let mv = Move::new("Karate Chop", ElementalType::Fighting, 50, 100);
        defender.types.clear();
        defender.types.push(ElementalType::Psychic);
        let (report, _) = run(vec![0, 99, 0], &mut attacker, &mut defender, &mv);
        // 100 * 50 / 50 = 100; * 100/200 = 50; * 1.5 = 75
        assert_eq!(report.damage, 75);
        assert!(matches!(
            report.events[0],
            BattleEvent::Hit { critical: true, .. }
        ));
    }

    #[test]
    fn hp_stays_within_bounds_over_many_turns() {
        let rng = PcgRng;
        let params = CombatParams::new();
        let mut attacker = combatant("Mankey", 40, 80);
        let mut defender = combatant("Onix", 35, 45);
        attacker.status = StatusCondition::Burn;
        for nonce in 0..200 {
            let dice = Dice::new(&rng, 7, nonce, 0);
            resolve_turn(
                &mut attacker,
                &mut defender,
                &tackle(),
                Side::Player,
                &params,
                &dice,
            );
            assert!(attacker.hp() <= attacker.max_hp());
            assert!(defender.hp() <= defender.max_hp());
            if defender.is_fainted() {
                defender.full_heal();
            }
            if attacker.is_fainted() {
                attacker.full_heal();
            }
        }
    }
}
