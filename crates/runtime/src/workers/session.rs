//! Session worker that owns the authoritative [`BattleSession`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives the
//! [`BattleEngine`], performs collaborator lookups between transitions, plays
//! enemy turns on its own schedule, and publishes [`GameEvent`] notifications.
//!
//! Pacing steps (enemy thinking, lunge, impact) are timers polled alongside
//! the command channel, so player input that arrives while the enemy owns the
//! turn is rejected by the engine instead of queueing behind a sleep.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, error, info, warn};

use game_core::spawn::{build_combatant, move_candidates};
use game_core::{
    BattleEngine, BattleSession, Combatant, Dice, GameConfig, SessionPhase, Side, SpawnTarget,
    SpeciesId, Tier, TurnOutcome,
};

use crate::api::providers::{
    CreatureProvider, ItemProvider, LeaderboardEntry, ProviderError, RunRecord, RunSink,
};
use crate::api::{ProviderKind, Result, RuntimeError};
use crate::events::{EventBus, GameEvent, TurnStage};
use crate::oracle::OracleManager;
use crate::repository::HighScoreRepository;
use crate::runtime::RuntimeConfig;

/// Commands that can be sent to the session worker
pub(crate) enum Command {
    Start {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Look up the starter and the first enemy, then begin floor 1.
    ChooseStarter {
        species: SpeciesId,
        reply: oneshot::Sender<Result<SessionPhase>>,
    },
    UseMove {
        index: usize,
        reply: oneshot::Sender<Result<TurnOutcome>>,
    },
    /// Apply a loot offer, then look up the next floor's enemy.
    SelectUpgrade {
        index: usize,
        reply: oneshot::Sender<Result<SessionPhase>>,
    },
    RetrySpawn {
        reply: oneshot::Sender<Result<SessionPhase>>,
    },
    Abort {
        reply: oneshot::Sender<Result<()>>,
    },
    Acknowledge {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current session (read-only).
    QuerySession {
        reply: oneshot::Sender<BattleSession>,
    },
    Leaderboard {
        limit: usize,
        reply: oneshot::Sender<Result<Vec<LeaderboardEntry>>>,
    },
}

/// External services the worker consults between transitions.
#[derive(Clone)]
pub(crate) struct Collaborators {
    pub creatures: Arc<dyn CreatureProvider>,
    pub items: Arc<dyn ItemProvider>,
    pub runs: Arc<dyn RunSink>,
    pub high_scores: Arc<dyn HighScoreRepository>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Enemy finished thinking and starts its lunge.
    EnemyThink,
    /// Lunge finished; the enemy's move resolves.
    EnemyStrike,
    /// Impact settled; act on how the turn left the battle.
    Settle,
}

struct Scheduled {
    step: Step,
    deadline: Instant,
}

/// Background task that processes session commands.
pub(crate) struct SessionWorker {
    session: BattleSession,
    oracles: OracleManager,
    collaborators: Collaborators,
    config: RuntimeConfig,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    scheduled: Option<Scheduled>,
    /// Number of session log lines already published.
    narrated: usize,
    last_phase: SessionPhase,
}

impl SessionWorker {
    pub(crate) fn new(
        session: BattleSession,
        oracles: OracleManager,
        collaborators: Collaborators,
        config: RuntimeConfig,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let last_phase = session.phase.clone();
        Self {
            narrated: session.log.len(),
            session,
            oracles,
            collaborators,
            config,
            command_rx,
            event_bus,
            scheduled: None,
            last_phase,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        loop {
            let deadline = self.scheduled.as_ref().map(|scheduled| scheduled.deadline);
            tokio::select! {
                biased;
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.drive().await;
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        self.handle_command(cmd).await;
                        self.drive().await;
                    }
                    None => {
                        self.flush_settle().await;
                        break;
                    }
                },
            }
        }
        debug!(target: "runtime::worker", "Session worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let result = self.start();
                respond("start", reply, result);
            }
            Command::ChooseStarter { species, reply } => {
                let result = self.choose_starter(species).await;
                respond("choose_starter", reply, result);
            }
            Command::UseMove { index, reply } => {
                let result = self.use_move(index).await;
                respond("use_move", reply, result);
            }
            Command::SelectUpgrade { index, reply } => {
                let result = self.select_upgrade(index).await;
                respond("select_upgrade", reply, result);
            }
            Command::RetrySpawn { reply } => {
                let result = self.retry_spawn().await;
                respond("retry_spawn", reply, result);
            }
            Command::Abort { reply } => {
                let result = self.abort();
                respond("abort", reply, result);
            }
            Command::Acknowledge { reply } => {
                // A run that just ended must be recorded before it is cleared.
                self.flush_settle().await;
                let result = self.acknowledge();
                respond("acknowledge", reply, result);
            }
            Command::QuerySession { reply } => {
                let _ = reply.send(self.session.clone());
            }
            Command::Leaderboard { limit, reply } => {
                let result = self
                    .collaborators
                    .runs
                    .top_scores(limit)
                    .await
                    .map_err(RuntimeError::provider(ProviderKind::RunSink));
                respond("leaderboard", reply, result);
            }
        }
    }

    /// Runs every scheduled step whose deadline has passed.
    async fn drive(&mut self) {
        while let Some(scheduled) = self
            .scheduled
            .take_if(|scheduled| scheduled.deadline <= Instant::now())
        {
            self.advance(scheduled.step).await;
        }
    }

    fn schedule(&mut self, step: Step, delay: Duration) {
        self.scheduled = Some(Scheduled {
            step,
            deadline: Instant::now() + delay,
        });
    }

    async fn advance(&mut self, step: Step) {
        match step {
            Step::EnemyThink => {
                self.pace(Side::Enemy, TurnStage::Lunging);
                self.schedule(Step::EnemyStrike, self.config.lunge_delay);
            }
            Step::EnemyStrike => {
                let result =
                    BattleEngine::new(&mut self.session).enemy_turn(self.oracles.as_game_env());
                match result {
                    Ok(outcome) => self.turn_resolved(&outcome),
                    Err(error) => {
                        error!(target: "runtime::worker", error = %error, "Enemy turn failed");
                    }
                }
            }
            Step::Settle => self.settle().await,
        }
    }

    /// Runs a pending settle right away. Pending enemy steps are left alone.
    async fn flush_settle(&mut self) {
        if matches!(&self.scheduled, Some(Scheduled { step: Step::Settle, .. })) {
            self.scheduled = None;
            self.settle().await;
        }
    }

    async fn settle(&mut self) {
        let phase = self.session.phase.clone();
        match phase {
            SessionPhase::Victory => {
                if let Err(error) = self.present_loot().await {
                    error!(target: "runtime::worker", error = %error, "Failed to present loot");
                }
            }
            SessionPhase::RunEnded => self.record_run().await,
            SessionPhase::InBattle if self.session.turn == Side::Enemy => {
                self.begin_enemy_turn();
            }
            _ => {}
        }
    }

    fn begin_enemy_turn(&mut self) {
        self.pace(Side::Enemy, TurnStage::Thinking);
        self.schedule(Step::EnemyThink, self.config.think_delay);
    }

    fn start(&mut self) -> Result<()> {
        BattleEngine::new(&mut self.session).start()?;
        self.narrated = 0;
        self.sync();
        info!(
            target: "runtime::worker",
            high_score = self.session.high_score,
            "Run started"
        );
        Ok(())
    }

    async fn choose_starter(&mut self, starter: SpeciesId) -> Result<SessionPhase> {
        if self.session.phase != SessionPhase::SelectingCombatant {
            return Err(game_core::EngineError::InvalidPhase {
                operation: "choose_starter",
                phase: self.session.phase.as_str(),
            }
            .into());
        }
        let enemy = BattleEngine::new(&mut self.session)
            .opening_enemy_species(self.oracles.as_game_env())?;
        self.spawn_opening(starter, enemy).await
    }

    async fn spawn_opening(&mut self, starter: SpeciesId, enemy: SpeciesId) -> Result<SessionPhase> {
        let target = SpawnTarget::Opening { starter, enemy };
        let player = match self.summon(starter, Side::Player).await {
            Ok(player) => player,
            Err(error) => return self.fail_spawn(error.to_string(), target),
        };
        let opponent = match self.summon(enemy, Side::Enemy).await {
            Ok(opponent) => opponent,
            Err(error) => return self.fail_spawn(error.to_string(), target),
        };

        let spawned = Box::new(opponent.clone());
        let first = BattleEngine::new(&mut self.session).begin_battle(player, opponent)?;
        self.narrated = 0;
        self.event_bus.publish(GameEvent::EnemySpawned {
            floor: self.session.floor,
            tier: Tier::Normal,
            enemy: spawned,
        });
        self.sync();

        if first == Side::Enemy {
            self.begin_enemy_turn();
        }
        Ok(self.session.phase.clone())
    }

    async fn use_move(&mut self, index: usize) -> Result<TurnOutcome> {
        if self.session.is_player_turn() {
            self.pace(Side::Player, TurnStage::Lunging);
            pause(self.config.lunge_delay).await;
        }
        let outcome =
            BattleEngine::new(&mut self.session).player_move(self.oracles.as_game_env(), index)?;
        self.turn_resolved(&outcome);
        Ok(outcome)
    }

    fn turn_resolved(&mut self, outcome: &TurnOutcome) {
        debug!(
            target: "runtime::worker",
            side = ?outcome.side,
            move_name = %outcome.move_name,
            status = ?outcome.status,
            "Turn resolved"
        );
        self.event_bus
            .publish(GameEvent::TurnResolved(Box::new(outcome.clone())));
        self.pace(outcome.side, TurnStage::Impact);
        self.sync();
        self.schedule(Step::Settle, self.config.impact_delay);
    }

    /// Fetches the drafted item, if any, and presents the loot offers.
    async fn present_loot(&mut self) -> Result<()> {
        let key = BattleEngine::new(&mut self.session)
            .loot_item_key()
            .map(str::to_owned);

        let equipment = match key {
            Some(key) => match self.collaborators.items.item(&key).await {
                Ok(found) => {
                    if found.is_none() {
                        debug!(target: "runtime::worker", item = %key, "Item unknown; using placeholder");
                    }
                    found
                }
                Err(error) => {
                    warn!(
                        target: "runtime::worker",
                        item = %key,
                        error = %error,
                        "Item lookup failed; using placeholder"
                    );
                    None
                }
            },
            None => None,
        };

        let offers = BattleEngine::new(&mut self.session)
            .offer_loot(self.oracles.as_game_env(), equipment)?
            .to_vec();
        self.event_bus.publish(GameEvent::LootOffered { offers });
        self.sync();
        Ok(())
    }

    async fn select_upgrade(&mut self, index: usize) -> Result<SessionPhase> {
        let evolution = BattleEngine::new(&mut self.session).pending_evolution(index);
        let evolved = match evolution {
            Some(evolution) => Some(
                self.summon(evolution.target, Side::Player)
                    .await
                    .map_err(RuntimeError::provider(ProviderKind::Creature))?,
            ),
            None => None,
        };
        let upgrade = self.session.pending_upgrades.get(index).cloned();

        let floor = BattleEngine::new(&mut self.session).select_upgrade(
            self.oracles.as_game_env(),
            index,
            evolved,
        )?;
        if let Some(upgrade) = upgrade {
            self.event_bus
                .publish(GameEvent::UpgradeApplied { upgrade, floor });
        }
        self.sync();

        self.draw_floor_enemy(floor).await
    }

    /// Draws the species guarding `floor` and spawns it.
    async fn draw_floor_enemy(&mut self, floor: u32) -> Result<SessionPhase> {
        let drawn =
            BattleEngine::new(&mut self.session).next_enemy_species(self.oracles.as_game_env());
        match drawn {
            Ok(species) => self.spawn_floor_enemy(floor, species).await,
            Err(error) => self.fail_spawn(error.to_string(), SpawnTarget::FloorDraw { floor }),
        }
    }

    async fn spawn_floor_enemy(&mut self, floor: u32, species: SpeciesId) -> Result<SessionPhase> {
        let target = SpawnTarget::Floor { floor, species };
        let base = match self.summon(species, Side::Enemy).await {
            Ok(base) => base,
            Err(error) => return self.fail_spawn(error.to_string(), target),
        };

        let tier =
            BattleEngine::new(&mut self.session).spawn_enemy(self.oracles.as_game_env(), base)?;
        if let Some(enemy) = &self.session.enemy {
            self.event_bus.publish(GameEvent::EnemySpawned {
                floor,
                tier,
                enemy: Box::new(enemy.clone()),
            });
        }
        self.sync();
        Ok(self.session.phase.clone())
    }

    async fn retry_spawn(&mut self) -> Result<SessionPhase> {
        let target = BattleEngine::new(&mut self.session).retry_target()?;
        info!(target: "runtime::worker", spawn = ?target, "Retrying spawn");
        match target {
            SpawnTarget::Opening { starter, enemy } => self.spawn_opening(starter, enemy).await,
            SpawnTarget::Floor { floor, species } => self.spawn_floor_enemy(floor, species).await,
            SpawnTarget::FloorDraw { floor } => self.draw_floor_enemy(floor).await,
        }
    }

    fn fail_spawn(&mut self, reason: String, target: SpawnTarget) -> Result<SessionPhase> {
        warn!(
            target: "runtime::worker",
            spawn = ?target,
            error = %reason,
            "Enemy spawn failed"
        );
        BattleEngine::new(&mut self.session).fail_spawn(reason.clone(), target.clone())?;
        self.event_bus
            .publish(GameEvent::SpawnFailed { reason, target });
        self.sync();
        Ok(self.session.phase.clone())
    }

    fn abort(&mut self) -> Result<()> {
        BattleEngine::new(&mut self.session).abort()?;
        self.narrated = 0;
        self.sync();
        Ok(())
    }

    fn acknowledge(&mut self) -> Result<()> {
        BattleEngine::new(&mut self.session).acknowledge()?;
        self.narrated = 0;
        self.sync();
        Ok(())
    }

    /// Persists a new record and submits every finished run. Failures are
    /// published as events and never block the session.
    async fn record_run(&mut self) {
        let floor = self.session.floor;
        let high_score = self.session.high_score;
        let new_record = self.session.new_record;
        info!(
            target: "runtime::worker",
            floor,
            high_score,
            new_record,
            "Run ended"
        );
        self.event_bus.publish(GameEvent::RunEnded {
            floor,
            high_score,
            new_record,
        });

        if new_record {
            match self.collaborators.high_scores.save(high_score) {
                Ok(()) => self
                    .event_bus
                    .publish(GameEvent::HighScoreSaved { high_score }),
                Err(error) => {
                    warn!(target: "runtime::worker", error = %error, "Failed to save high score");
                    self.event_bus.publish(GameEvent::HighScoreSaveFailed {
                        high_score,
                        error: error.to_string(),
                    });
                }
            }
        }

        let Some(player) = &self.session.player else {
            return;
        };
        let record = RunRecord {
            player_name: self.config.player_name.clone(),
            species: player.name.clone(),
            species_id: player.species,
            floor,
        };
        match self.collaborators.runs.submit(&record).await {
            Ok(()) => self.event_bus.publish(GameEvent::RunSubmitted { record }),
            Err(error) => {
                warn!(target: "runtime::worker", error = %error, "Run submission failed");
                self.event_bus.publish(GameEvent::SubmissionFailed {
                    record,
                    error: error.to_string(),
                });
            }
        }
    }

    /// Looks up `species` and its moves and builds a level-1 combatant.
    ///
    /// Move references are tried in a shuffled order until four moves are
    /// accepted or the lookup budget runs out. A failing move lookup only
    /// skips that move.
    async fn summon(
        &self,
        species: SpeciesId,
        side: Side,
    ) -> std::result::Result<Combatant, ProviderError> {
        let data = self.collaborators.creatures.creature(species).await?;
        let candidates = {
            let dice = Dice::new(
                self.oracles.rng(),
                self.session.seed,
                self.session.nonce,
                side.actor_id(),
            );
            move_candidates(&data.moves, &dice)
        };

        let mut moves = Vec::with_capacity(GameConfig::MAX_MOVES);
        for reference in candidates.iter().take(self.config.max_move_lookups) {
            if moves.len() == GameConfig::MAX_MOVES {
                break;
            }
            match self.collaborators.creatures.move_detail(reference).await {
                Ok(Some(detail)) => moves.push(detail),
                Ok(None) => {}
                Err(error) => {
                    warn!(
                        target: "runtime::worker",
                        move_name = %reference.name,
                        error = %error,
                        "Skipping move after failed lookup"
                    );
                }
            }
        }

        let tables = self.oracles.tables();
        Ok(build_combatant(
            &data,
            moves,
            &tables.spawn,
            &tables.progression,
        ))
    }

    fn pace(&self, side: Side, stage: TurnStage) {
        self.event_bus.publish(GameEvent::TurnPacing { side, stage });
    }

    /// Publishes new narration lines and phase changes.
    fn sync(&mut self) {
        let log = &self.session.log;
        if self.narrated < log.len() {
            let lines = log[self.narrated..].to_vec();
            self.narrated = log.len();
            self.event_bus.publish(GameEvent::Narration { lines });
        }

        if self.session.phase != self.last_phase {
            self.last_phase = self.session.phase.clone();
            info!(
                target: "runtime::worker",
                phase = self.last_phase.as_str(),
                floor = self.session.floor,
                "Phase changed"
            );
            self.event_bus.publish(GameEvent::PhaseChanged {
                phase: self.last_phase.clone(),
            });
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

fn respond<T>(operation: &'static str, reply: oneshot::Sender<Result<T>>, result: Result<T>) {
    if let Err(error) = &result {
        if error.is_rejection() {
            debug!(target: "runtime::worker", operation, error = %error, "Command rejected");
        } else {
            warn!(target: "runtime::worker", operation, error = %error, "Command failed");
        }
    }
    let _ = reply.send(result);
}
