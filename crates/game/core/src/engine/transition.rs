//! Phase transitions outside of battle turns.

use super::{BattleEngine, EngineError};
use crate::env::GameEnv;
use crate::progression::{apply_upgrade, finalize_loot};
use crate::spawn::{Tier, any_species, apply_tier, enemy_species, scale_for_floor};
use crate::state::{
    Combatant, Equipment, Evolution, SessionPhase, Side, SpawnTarget, SpeciesId, Upgrade,
};
use crate::stats::{StatKind, combat_stat};

impl BattleEngine<'_> {
    /// Opens a new run and waits for the starter choice.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.session.phase != SessionPhase::NotStarted {
            return Err(self.invalid("start"));
        }
        self.session.reset_run();
        self.session.phase = SessionPhase::SelectingCombatant;
        Ok(())
    }

    /// Species of the first enemy. It is drawn from the whole species range
    /// and fights unscaled at level 1.
    pub fn opening_enemy_species(&self, env: GameEnv<'_>) -> Result<SpeciesId, EngineError> {
        let spawn = env.tables()?.spawn();
        let dice = self.dice(&env, Side::Enemy)?;
        Ok(any_species(&spawn, &dice))
    }

    /// Places both combatants on floor 1 and settles who moves first.
    ///
    /// The faster combatant (by effective speed) acts first; ties go to the
    /// player.
    pub fn begin_battle(&mut self, player: Combatant, enemy: Combatant) -> Result<Side, EngineError> {
        let allowed = matches!(
            self.session.phase,
            SessionPhase::SelectingCombatant
                | SessionPhase::SpawnFailed {
                    target: SpawnTarget::Opening { .. },
                    ..
                }
        );
        if !allowed {
            return Err(self.invalid("begin_battle"));
        }

        let session = &mut *self.session;
        session.floor = 1;
        session.log.clear();
        session.push_log("Welcome to the Dungeon!");
        session.push_log("Battle Start!");

        let first = if combat_stat(&player, StatKind::Speed) >= combat_stat(&enemy, StatKind::Speed)
        {
            session.push_log(format!("{} moves first!", player.name));
            Side::Player
        } else {
            session.push_log(format!("{} is faster!", enemy.name));
            Side::Enemy
        };

        session.player = Some(player);
        session.enemy = Some(enemy);
        session.turn = first;
        session.nonce += 1;
        session.phase = SessionPhase::InBattle;
        Ok(first)
    }

    /// Records a failed creature lookup so it can be retried or abandoned.
    pub fn fail_spawn(
        &mut self,
        reason: impl Into<String>,
        target: SpawnTarget,
    ) -> Result<(), EngineError> {
        let allowed = matches!(
            self.session.phase,
            SessionPhase::SelectingCombatant
                | SessionPhase::AwaitingSpawn
                | SessionPhase::SpawnFailed { .. }
        );
        if !allowed {
            return Err(self.invalid("fail_spawn"));
        }
        let reason = reason.into();
        self.session
            .push_log(format!("Failed to summon a combatant: {reason}"));
        self.session.phase = SessionPhase::SpawnFailed { reason, target };
        Ok(())
    }

    /// What the controller should fetch again after a failed spawn.
    pub fn retry_target(&self) -> Result<SpawnTarget, EngineError> {
        match &self.session.phase {
            SessionPhase::SpawnFailed { target, .. } => Ok(target.clone()),
            _ => Err(self.invalid("retry_target")),
        }
    }

    /// Abandons a run whose spawn failed.
    pub fn abort(&mut self) -> Result<(), EngineError> {
        if !matches!(self.session.phase, SessionPhase::SpawnFailed { .. }) {
            return Err(self.invalid("abort"));
        }
        self.session.reset_run();
        Ok(())
    }

    /// Catalog key of the item the current draft wants looked up.
    pub fn loot_item_key(&self) -> Option<&str> {
        self.session
            .loot_draft
            .as_ref()
            .and_then(|draft| draft.equipment_key.as_deref())
    }

    /// Completes the drafted loot with the looked-up item (or the
    /// placeholder) and presents the offers.
    pub fn offer_loot(
        &mut self,
        env: GameEnv<'_>,
        equipment: Option<Equipment>,
    ) -> Result<&[Upgrade], EngineError> {
        if self.session.phase != SessionPhase::Victory {
            return Err(self.invalid("offer_loot"));
        }
        let catalog = env.catalog()?;
        let draft = self.session.loot_draft.take().unwrap_or_default();
        self.session.pending_upgrades = finalize_loot(draft, equipment, catalog);
        self.session.phase = SessionPhase::LootSelection;
        Ok(&self.session.pending_upgrades)
    }

    /// The evolution behind offer `index`, if that offer is an evolve.
    pub fn pending_evolution(&self, index: usize) -> Option<Evolution> {
        match self.session.pending_upgrades.get(index) {
            Some(Upgrade::Evolve(evolution)) => Some(*evolution),
            _ => None,
        }
    }

    /// Applies offer `index` and advances to the next floor.
    ///
    /// `evolved` must carry the target species when the offer is an evolve.
    /// On error the session stays in `LootSelection`. Returns the new floor.
    pub fn select_upgrade(
        &mut self,
        env: GameEnv<'_>,
        index: usize,
        evolved: Option<Combatant>,
    ) -> Result<u32, EngineError> {
        if self.session.phase != SessionPhase::LootSelection {
            return Err(self.invalid("select_upgrade"));
        }
        let upgrade = self
            .session
            .pending_upgrades
            .get(index)
            .cloned()
            .ok_or(EngineError::InvalidUpgradeIndex {
                index,
                available: self.session.pending_upgrades.len(),
            })?;
        let spawn = env.tables()?.spawn();

        let session = &mut *self.session;
        let player = session
            .player
            .as_mut()
            .ok_or(EngineError::MissingCombatant("player"))?;
        let previous_name = player.name.clone();
        apply_upgrade(player, &upgrade, evolved, &spawn)?;
        let evolved_name = player.name.clone();

        match &upgrade {
            Upgrade::Equip(item) => {
                session.push_log(format!("Equipped {}!", item.name));
                session.push_log("Stat bonuses applied dynamically.");
            }
            Upgrade::Evolve(_) => {
                session.push_log(format!("What? {previous_name} is evolving!"));
                session.push_log(format!("Congratulations! You evolved into {evolved_name}!"));
            }
            Upgrade::StatBoost(_) => {}
        }

        session.pending_upgrades.clear();
        session.floor += 1;
        session.enemy = None;
        session.turn = Side::Player;
        session.phase = SessionPhase::AwaitingSpawn;
        Ok(session.floor)
    }

    /// Species guarding the current floor.
    pub fn next_enemy_species(&self, env: GameEnv<'_>) -> Result<SpeciesId, EngineError> {
        let spawn = env.tables()?.spawn();
        let catalog = env.catalog()?;
        let dice = self.dice(&env, Side::Enemy)?;
        Ok(enemy_species(self.session.floor, catalog, &spawn, &dice)?)
    }

    /// Scales `base` to the current floor and tier and starts the battle.
    /// The player always acts first on a new floor.
    pub fn spawn_enemy(&mut self, env: GameEnv<'_>, base: Combatant) -> Result<Tier, EngineError> {
        let allowed = matches!(
            self.session.phase,
            SessionPhase::AwaitingSpawn
                | SessionPhase::SpawnFailed {
                    target: SpawnTarget::Floor { .. } | SpawnTarget::FloorDraw { .. },
                    ..
                }
        );
        if !allowed {
            return Err(self.invalid("spawn_enemy"));
        }
        let spawn = env.tables()?.spawn();

        let session = &mut *self.session;
        let tier = Tier::for_floor(session.floor, &spawn);
        let mut enemy = scale_for_floor(&base, session.floor, &spawn);
        apply_tier(&mut enemy, tier, &spawn);

        session.push_log(match tier {
            Tier::Boss => format!("A {} appears! It's a BOSS!", base.name),
            Tier::MiniBoss => format!("It's a {} ?! A Mini-Boss!", base.name),
            Tier::Normal => format!("A wild {} appears!", base.name),
        });
        session.enemy = Some(enemy);
        session.turn = Side::Player;
        session.nonce += 1;
        session.phase = SessionPhase::InBattle;
        Ok(tier)
    }

    /// Returns from a finished run to the title state. The high score is kept.
    pub fn acknowledge(&mut self) -> Result<(), EngineError> {
        if self.session.phase != SessionPhase::RunEnded {
            return Err(self.invalid("acknowledge"));
        }
        self.session.reset_run();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BattleStatus;
    use crate::env::{Env, PcgRng, TablesSnapshot, tackle};
    use crate::state::{BattleSession, StatBoost};
    use crate::stats::StatModifiers;
    use crate::testing::{catalog, combatant};

    fn fixtures() -> (TablesSnapshot, crate::env::CatalogSnapshot, PcgRng) {
        (TablesSnapshot::default(), catalog(), PcgRng)
    }

    #[test]
    fn start_requires_not_started() {
        let mut session = BattleSession::new(1, 0);
        let mut engine = BattleEngine::new(&mut session);
        engine.start().unwrap();
        assert_eq!(
            engine.start(),
            Err(EngineError::InvalidPhase {
                operation: "start",
                phase: "selecting_combatant"
            })
        );
    }

    #[test]
    fn faster_enemy_moves_first_and_ties_go_to_player() {
        let mut session = BattleSession::new(1, 0);
        let mut engine = BattleEngine::new(&mut session);
        engine.start().unwrap();

        let player = combatant("Slowpoke", 90, 65);
        let mut enemy = combatant("Jolteon", 65, 65);
        enemy.stats.speed = 130;
        assert_eq!(engine.begin_battle(player, enemy), Ok(Side::Enemy));
        assert_eq!(
            engine.session().log,
            vec!["Welcome to the Dungeon!", "Battle Start!", "Jolteon is faster!"]
        );

        let mut session = BattleSession::new(1, 0);
        let mut engine = BattleEngine::new(&mut session);
        engine.start().unwrap();
        let first = engine
            .begin_battle(combatant("Eevee", 55, 55), combatant("Meowth", 40, 45))
            .unwrap();
        assert_eq!(first, Side::Player);
        assert_eq!(session.floor, 1);
        assert_eq!(session.phase, SessionPhase::InBattle);
    }

    #[test]
    fn spawn_failure_can_be_retried_or_aborted() {
        let (tables, catalog, rng) = fixtures();
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = BattleSession::new(1, 5);
        let mut engine = BattleEngine::new(&mut session);
        engine.start().unwrap();

        let enemy = engine.opening_enemy_species(env).unwrap();
        let target = SpawnTarget::Opening {
            starter: SpeciesId(4),
            enemy,
        };
        engine.fail_spawn("connection refused", target.clone()).unwrap();
        assert_eq!(engine.retry_target(), Ok(target));
        assert!(engine.player_move(env, 0).is_err());

        engine
            .begin_battle(combatant("Charmander", 39, 52), combatant("Zubat", 40, 45))
            .unwrap();
        assert_eq!(engine.session().phase, SessionPhase::InBattle);

        let mut session = BattleSession::new(1, 5);
        let mut engine = BattleEngine::new(&mut session);
        engine.start().unwrap();
        engine
            .fail_spawn(
                "timeout",
                SpawnTarget::Opening {
                    starter: SpeciesId(1),
                    enemy: SpeciesId(19),
                },
            )
            .unwrap();
        engine.abort().unwrap();
        assert_eq!(session.phase, SessionPhase::NotStarted);
        assert_eq!(session.high_score, 5);
    }

    #[test]
    fn loot_cycle_advances_the_floor() {
        let (tables, catalog, rng) = fixtures();
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = BattleSession::new(3, 0);
        session.phase = SessionPhase::Victory;
        session.floor = 4;
        session.player = Some(combatant("Squirtle", 44, 48));
        session.loot_draft = Some(crate::progression::LootDraft {
            offers: vec![Upgrade::StatBoost(StatBoost::new(
                "protein",
                "Protein",
                "+5 Attack",
                StatKind::Attack,
                5,
            ))],
            equipment_key: Some("choice-band".into()),
        });
        let mut engine = BattleEngine::new(&mut session);

        assert_eq!(engine.loot_item_key(), Some("choice-band"));
        let band = Equipment::new(
            "choice-band",
            "Choice Band",
            "",
            StatModifiers::new().with(StatKind::Attack, 15),
        );
        let offers = engine.offer_loot(env, Some(band)).unwrap();
        assert_eq!(offers.len(), 2);

        assert!(matches!(
            engine.select_upgrade(env, 5, None),
            Err(EngineError::InvalidUpgradeIndex { index: 5, .. })
        ));
        assert_eq!(engine.select_upgrade(env, 1, None), Ok(5));

        let player = session.player.as_ref().unwrap();
        assert_eq!(player.equipment.len(), 1);
        assert_eq!(session.phase, SessionPhase::AwaitingSpawn);
        assert!(session.pending_upgrades.is_empty());
        assert_eq!(
            &session.log[session.log.len() - 2..],
            &["Equipped Choice Band!", "Stat bonuses applied dynamically."]
        );
    }

    #[test]
    fn boss_floor_spawns_a_scaled_boss() {
        let (tables, catalog, rng) = fixtures();
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = BattleSession::new(9, 0);
        session.phase = SessionPhase::AwaitingSpawn;
        session.floor = 10;
        session.player = Some(combatant("Venusaur", 80, 82));
        let mut engine = BattleEngine::new(&mut session);

        let species = engine.next_enemy_species(env).unwrap();
        assert!(catalog.boss_pool.contains(&species));

        let tier = engine.spawn_enemy(env, combatant("Mewtwo", 106, 110)).unwrap();
        assert_eq!(tier, Tier::Boss);

        let enemy = session.enemy.as_ref().unwrap();
        assert_eq!(enemy.level, 10);
        assert_eq!(enemy.stats.max_hp, 318);
        assert_eq!(enemy.stats.hp, 318);
        assert_eq!(session.turn, Side::Player);
        assert_eq!(
            session.log.last().map(String::as_str),
            Some("A Mewtwo appears! It's a BOSS!")
        );
    }

    #[test]
    fn failed_species_draw_can_still_spawn() {
        let (tables, mut catalog, rng) = fixtures();
        catalog.boss_pool.clear();
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = BattleSession::new(9, 0);
        session.phase = SessionPhase::AwaitingSpawn;
        session.floor = 10;
        session.player = Some(combatant("Venusaur", 80, 82));
        let mut engine = BattleEngine::new(&mut session);

        let error = engine.next_enemy_species(env).unwrap_err();
        assert_eq!(
            error,
            EngineError::Oracle(crate::env::OracleError::EmptyPool("boss_pool"))
        );
        engine
            .fail_spawn(error.to_string(), SpawnTarget::FloorDraw { floor: 10 })
            .unwrap();
        assert_eq!(
            engine.retry_target(),
            Ok(SpawnTarget::FloorDraw { floor: 10 })
        );

        assert_eq!(
            engine.spawn_enemy(env, combatant("Mewtwo", 106, 110)),
            Ok(Tier::Boss)
        );
        assert_eq!(session.phase, SessionPhase::InBattle);
    }

    #[test]
    fn evolve_needs_the_target_species() {
        let (tables, catalog, rng) = fixtures();
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = BattleSession::new(3, 0);
        session.phase = SessionPhase::LootSelection;
        session.floor = 16;
        let mut player = combatant("Bulbasaur", 45, 49);
        player.level = 16;
        session.player = Some(player);
        session.pending_upgrades = vec![Upgrade::Evolve(Evolution::new(1, 2, 16))];
        let mut engine = BattleEngine::new(&mut session);

        assert_eq!(
            engine.pending_evolution(0),
            Some(Evolution::new(1, 2, 16))
        );
        assert!(engine.select_upgrade(env, 0, None).is_err());
        assert_eq!(engine.session().phase, SessionPhase::LootSelection);

        let mut ivysaur = combatant("Ivysaur", 60, 62);
        ivysaur.species = SpeciesId(2);
        engine.select_upgrade(env, 0, Some(ivysaur)).unwrap();
        assert_eq!(
            &session.log[session.log.len() - 2..],
            &[
                "What? Bulbasaur is evolving!",
                "Congratulations! You evolved into Ivysaur!"
            ]
        );
        assert_eq!(session.floor, 17);
    }

    #[test]
    fn full_run_until_defeat_and_acknowledge() {
        let (tables, catalog, rng) = fixtures();
        let env = Env::with_all(&tables, &catalog, &rng).into_game_env();
        let mut session = BattleSession::new(42, 0);
        let mut engine = BattleEngine::new(&mut session);
        engine.start().unwrap();

        let mut player = combatant("Caterpie", 20, 5);
        player.moves.push(tackle());
        let mut enemy = combatant("Machamp", 300, 130);
        enemy.moves.push(tackle());
        engine.begin_battle(player, enemy).unwrap();

        let mut turns = 0;
        loop {
            turns += 1;
            assert!(turns < 500, "battle did not finish");
            let outcome = if engine.session().turn == Side::Player {
                engine.player_move(env, 0).unwrap()
            } else {
                engine.enemy_turn(env).unwrap()
            };
            for side in [Side::Player, Side::Enemy] {
                let c = engine.session().combatant(side).unwrap();
                assert!(c.stats.hp <= c.max_hp());
            }
            if outcome.status != BattleStatus::Ongoing {
                assert_eq!(outcome.status, BattleStatus::Defeat);
                break;
            }
        }

        assert_eq!(engine.session().phase, SessionPhase::RunEnded);
        assert_eq!(engine.session().high_score, 1);
        engine.acknowledge().unwrap();
        assert_eq!(session.phase, SessionPhase::NotStarted);
        assert_eq!(session.high_score, 1);
        assert!(session.player.is_none());
    }
}
