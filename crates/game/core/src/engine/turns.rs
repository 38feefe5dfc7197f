//! Battle turns and their consequences.

use super::{BattleEngine, BattleStatus, EngineError, TurnOutcome};
use crate::combat::resolve_turn;
use crate::env::{GameEnv, RollKind};
use crate::progression::{ExperienceGain, award_experience, draft_loot};
use crate::state::{Combatant, Move, SessionPhase, Side};

impl BattleEngine<'_> {
    /// Resolves the player's turn with the move at `index`.
    ///
    /// A combatant without moves may only use index 0, which maps to the
    /// catalog's default move.
    pub fn player_move(
        &mut self,
        env: GameEnv<'_>,
        index: usize,
    ) -> Result<TurnOutcome, EngineError> {
        if self.session.phase != SessionPhase::InBattle {
            return Err(self.invalid("player_move"));
        }
        if self.session.turn != Side::Player {
            return Err(EngineError::NotYourTurn);
        }

        let player = self
            .session
            .player
            .as_ref()
            .ok_or(EngineError::MissingCombatant("player"))?;
        let mv = match player.moves.get(index) {
            Some(mv) => mv.clone(),
            None if player.moves.is_empty() && index == 0 => env.catalog()?.default_move(),
            None => {
                return Err(EngineError::InvalidMoveIndex {
                    index,
                    available: player.moves.len(),
                });
            }
        };

        self.run_turn(env, Side::Player, mv)
    }

    /// Resolves the enemy's turn with a uniformly drawn known move.
    pub fn enemy_turn(&mut self, env: GameEnv<'_>) -> Result<TurnOutcome, EngineError> {
        if self.session.phase != SessionPhase::InBattle {
            return Err(self.invalid("enemy_turn"));
        }
        if self.session.turn != Side::Enemy {
            return Err(EngineError::NotEnemyTurn);
        }

        let dice = self.dice(&env, Side::Enemy)?;
        let enemy = self
            .session
            .enemy
            .as_ref()
            .ok_or(EngineError::MissingCombatant("enemy"))?;
        let mv = if enemy.moves.is_empty() {
            env.catalog()?.default_move()
        } else {
            let index = dice.pick(RollKind::EnemyMove, 0, enemy.moves.len());
            enemy.moves[index].clone()
        };

        self.run_turn(env, Side::Enemy, mv)
    }

    fn run_turn(
        &mut self,
        env: GameEnv<'_>,
        side: Side,
        mv: Move,
    ) -> Result<TurnOutcome, EngineError> {
        let combat = env.tables()?.combat();
        let dice = self.dice(&env, side)?;

        let session = &mut *self.session;
        let missing = if session.player.is_none() { "player" } else { "enemy" };
        let (Some(player), Some(enemy)) = (session.player.as_mut(), session.enemy.as_mut()) else {
            return Err(EngineError::MissingCombatant(missing));
        };
        let (attacker, defender) = match side {
            Side::Player => (player, enemy),
            Side::Enemy => (enemy, player),
        };

        let report = resolve_turn(attacker, defender, &mv, side, &combat, &dice);
        session.nonce += 1;
        session.log.extend(report.narration());

        let player_down = session.player.as_ref().is_some_and(Combatant::is_fainted);
        let enemy_down = session.enemy.as_ref().is_some_and(Combatant::is_fainted);

        let mut experience = None;
        let status = if player_down {
            self.conclude_defeat();
            BattleStatus::Defeat
        } else if enemy_down {
            experience = Some(self.conclude_victory(env)?);
            BattleStatus::Victory
        } else {
            self.session.turn = side.opponent();
            BattleStatus::Ongoing
        };

        Ok(TurnOutcome {
            side,
            move_name: mv.name,
            report,
            status,
            experience,
        })
    }

    /// Awards experience and drafts loot; the engine then waits in
    /// `Victory` for the equipment lookup.
    fn conclude_victory(&mut self, env: GameEnv<'_>) -> Result<ExperienceGain, EngineError> {
        let progression = env.tables()?.progression();
        let catalog = env.catalog()?;
        let dice = self.dice(&env, Side::Player)?;

        let session = &mut *self.session;
        let enemy_level = session.enemy.as_ref().map_or(1, |enemy| enemy.level);
        let player = session
            .player
            .as_mut()
            .ok_or(EngineError::MissingCombatant("player"))?;

        let gain = award_experience(player, enemy_level, &progression);
        let draft = draft_loot(player, session.floor, catalog, &progression, &dice);

        if gain.leveled_up {
            session.push_log(format!("Level Up! You are now Lvl {}!", gain.new_level));
        } else {
            session.push_log(format!("You gained {} XP.", gain.xp_gained));
        }
        session.nonce += 1;
        session.loot_draft = Some(draft);
        session.phase = SessionPhase::Victory;
        Ok(gain)
    }

    /// Ends the run, recording a new high score when the floor beats it.
    fn conclude_defeat(&mut self) {
        let session = &mut *self.session;
        session.new_record = session.floor > session.high_score;
        if session.new_record {
            session.high_score = session.floor;
        }
        session.loot_draft = None;
        session.pending_upgrades.clear();
        session.phase = SessionPhase::RunEnded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Env, PcgRng, SequenceRng, TablesSnapshot};
    use crate::state::{BattleSession, ElementalType, StatusCondition};
    use crate::testing::{catalog, combatant};

    fn session_in_battle(player: Combatant, enemy: Combatant, turn: Side) -> BattleSession {
        let mut session = BattleSession::new(7, 0);
        session.phase = SessionPhase::InBattle;
        session.floor = 1;
        session.turn = turn;
        session.player = Some(player);
        session.enemy = Some(enemy);
        session
    }

    fn armed(name: &str, hp: u32, attack: u32, mv: Move) -> Combatant {
        let mut c = combatant(name, hp, attack);
        c.moves.push(mv);
        c
    }

    #[test]
    fn player_input_is_rejected_on_enemy_turn() {
        let tables = TablesSnapshot::default();
        let catalog = catalog();
        let rng = PcgRng;
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let tackle = crate::env::tackle();
        let mut session = session_in_battle(
            armed("Pikachu", 35, 55, tackle.clone()),
            armed("Rattata", 30, 56, tackle),
            Side::Enemy,
        );
        let mut engine = BattleEngine::new(&mut session);

        assert_eq!(engine.player_move(env, 0), Err(EngineError::NotYourTurn));
        assert_eq!(engine.session().nonce, 0);
    }

    #[test]
    fn missed_turn_passes_control() {
        let tables = TablesSnapshot::default();
        let catalog = catalog();
        // accuracy roll 60 against 50% accuracy
        let rng = SequenceRng::new(vec![60]);
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let sloppy = Move::new("Hypnosis", ElementalType::Psychic, 40, 50);
        let mut session = session_in_battle(
            armed("Drowzee", 60, 48, sloppy),
            combatant("Rattata", 30, 56),
            Side::Player,
        );
        let mut engine = BattleEngine::new(&mut session);

        let outcome = engine.player_move(env, 0).unwrap();

        assert_eq!(outcome.status, BattleStatus::Ongoing);
        assert_eq!(outcome.report.damage, 0);
        assert_eq!(session.enemy.as_ref().unwrap().stats.hp, 30);
        assert_eq!(session.turn, Side::Enemy);
        assert_eq!(session.nonce, 1);
        assert_eq!(
            session.log.last().map(String::as_str),
            Some("Drowzee used Hypnosis but missed!")
        );
    }

    #[test]
    fn invalid_move_index_is_rejected() {
        let tables = TablesSnapshot::default();
        let catalog = catalog();
        let rng = PcgRng;
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = session_in_battle(
            armed("Pikachu", 35, 55, crate::env::tackle()),
            combatant("Rattata", 30, 56),
            Side::Player,
        );
        let mut engine = BattleEngine::new(&mut session);
        assert_eq!(
            engine.player_move(env, 3),
            Err(EngineError::InvalidMoveIndex {
                index: 3,
                available: 1
            })
        );
    }

    #[test]
    fn knockout_awards_experience_and_drafts_loot() {
        let tables = TablesSnapshot::default();
        let catalog = catalog();
        // accuracy, dodge, crit; then loot draws
        let rng = SequenceRng::new(vec![0, 99, 99]);
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut player = armed("Pikachu", 35, 200, crate::env::tackle());
        player.xp = 80;
        let mut enemy = combatant("Rattata", 10, 56);
        enemy.level = 2;
        let mut session = session_in_battle(player, enemy, Side::Player);
        let mut engine = BattleEngine::new(&mut session);

        let outcome = engine.player_move(env, 0).unwrap();

        assert_eq!(outcome.status, BattleStatus::Victory);
        let gain = outcome.experience.unwrap();
        assert!(gain.leveled_up);
        assert_eq!(session.phase, SessionPhase::Victory);
        assert_eq!(session.player.as_ref().unwrap().level, 2);
        assert_eq!(session.player.as_ref().unwrap().xp, 80);
        assert!(session.loot_draft.is_some());
        assert!(session.log.iter().any(|line| line == "Rattata fainted!"));
        assert_eq!(
            session.log.last().map(String::as_str),
            Some("Level Up! You are now Lvl 2!")
        );
    }

    #[test]
    fn defeat_records_a_new_high_score() {
        let tables = TablesSnapshot::default();
        let catalog = catalog();
        // a single known move needs no pick; accuracy, dodge, crit
        let rng = SequenceRng::new(vec![0, 99, 99]);
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = session_in_battle(
            combatant("Magikarp", 5, 10),
            armed("Onix", 100, 200, crate::env::tackle()),
            Side::Enemy,
        );
        session.floor = 4;
        session.high_score = 3;
        let mut engine = BattleEngine::new(&mut session);

        let outcome = engine.enemy_turn(env).unwrap();

        assert_eq!(outcome.status, BattleStatus::Defeat);
        assert_eq!(session.phase, SessionPhase::RunEnded);
        assert!(session.new_record);
        assert_eq!(session.high_score, 4);
    }

    #[test]
    fn double_knockout_counts_as_defeat() {
        let tables = TablesSnapshot::default();
        let catalog = catalog();
        // accuracy, dodge, crit
        let rng = SequenceRng::new(vec![0, 99, 99]);
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut player = armed("Charmander", 1, 200, crate::env::tackle());
        player.status = StatusCondition::Burn;
        let mut session = session_in_battle(player, combatant("Oddish", 5, 10), Side::Player);
        let mut engine = BattleEngine::new(&mut session);

        let outcome = engine.player_move(env, 0).unwrap();

        assert!(outcome.report.defender_fainted);
        assert!(outcome.report.attacker_fainted);
        assert_eq!(outcome.status, BattleStatus::Defeat);
        assert_eq!(session.phase, SessionPhase::RunEnded);
    }

    #[test]
    fn moveless_enemy_falls_back_to_tackle() {
        let tables = TablesSnapshot::default();
        let catalog = catalog();
        // accuracy, dodge, crit
        let rng = SequenceRng::new(vec![0, 99, 99]);
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = session_in_battle(
            combatant("Pidgey", 200, 45),
            combatant("Ditto", 48, 48),
            Side::Enemy,
        );
        let mut engine = BattleEngine::new(&mut session);

        let outcome = engine.enemy_turn(env).unwrap();
        assert_eq!(outcome.move_name, "Tackle");
        assert_eq!(session.turn, Side::Player);
    }
}
