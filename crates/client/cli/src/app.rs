//! Glue code tying the runtime, the autoplay policy and console output together.
use std::time::Duration;

use anyhow::{Context, Result};

use client_bootstrap::{ClientConfig, RuntimeBuilder, RuntimeSetup};
use game_core::{BattleSession, SessionPhase, Side, SpeciesId, Upgrade};
use runtime::{Runtime, RuntimeError, RuntimeHandle};

use crate::narrator;
use crate::policy;

const MAX_SPAWN_RETRIES: u32 = 3;
const MAX_ACTIONS: usize = 10_000;
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const LEADERBOARD_SIZE: usize = 5;

pub struct CliApp {
    config: ClientConfig,
    runtime: Runtime,
}

pub struct CliAppBuilder {
    bootstrap: RuntimeBuilder,
}

impl CliAppBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            bootstrap: RuntimeBuilder::new(config),
        }
    }

    pub async fn build(self) -> Result<CliApp> {
        let RuntimeSetup { config, runtime } = self.bootstrap.build().await?;
        Ok(CliApp { config, runtime })
    }
}

/// How a run finished.
#[derive(Debug)]
pub struct RunSummary {
    pub floor: u32,
    pub high_score: u32,
    pub new_record: bool,
}

impl CliApp {
    pub fn builder(config: ClientConfig) -> CliAppBuilder {
        CliAppBuilder::new(config)
    }

    /// Plays one run to the end, printing narration along the way.
    pub async fn run(self) -> Result<()> {
        let handle = self.runtime.handle();
        let printers: Vec<_> = handle
            .subscribe_events()
            .into_iter()
            .map(|(topic, rx)| tokio::spawn(narrator::print_events(topic, rx)))
            .collect();

        let starter = pick_starter(self.config.seed)?;
        let outcome = Autoplay::new(handle.clone(), starter).play().await;

        match handle.leaderboard(LEADERBOARD_SIZE).await {
            Ok(entries) if !entries.is_empty() => {
                println!("Leaderboard:");
                for (rank, entry) in entries.iter().enumerate() {
                    println!(
                        "  {}. {} with {} - floor {}",
                        rank + 1,
                        entry.name,
                        entry.pokemon,
                        entry.floor
                    );
                }
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(target: "cli", error = %error, "Leaderboard unavailable")
            }
        }

        drop(handle);
        self.runtime.shutdown().await?;
        for printer in printers {
            if let Err(error) = printer.await {
                tracing::warn!(target: "cli", error = %error, "Event printer panicked");
            }
        }

        let summary = outcome?;
        tracing::info!(
            target: "cli",
            floor = summary.floor,
            high_score = summary.high_score,
            new_record = summary.new_record,
            "Run finished"
        );
        Ok(())
    }
}

fn pick_starter(seed: Option<u64>) -> Result<SpeciesId> {
    let starters = game_content::catalog().starters;
    let index = seed.map_or(0, |seed| (seed % starters.len().max(1) as u64) as usize);
    starters
        .get(index)
        .copied()
        .context("no starter species configured")
}

/// Drives one run with the decisions from [`policy`].
struct Autoplay {
    handle: RuntimeHandle,
    starter: SpeciesId,
    spawn_retries: u32,
}

impl Autoplay {
    fn new(handle: RuntimeHandle, starter: SpeciesId) -> Self {
        Self {
            handle,
            starter,
            spawn_retries: 0,
        }
    }

    async fn play(mut self) -> Result<RunSummary> {
        self.handle.start().await?;

        for _ in 0..MAX_ACTIONS {
            let session = self.awaiting_input().await?;
            match &session.phase {
                SessionPhase::SelectingCombatant => {
                    self.handle.choose_starter(self.starter).await?;
                }
                SessionPhase::InBattle => self.attack(&session).await?,
                SessionPhase::LootSelection => self.loot(&session).await?,
                SessionPhase::SpawnFailed { .. } => {
                    if self.spawn_retries < MAX_SPAWN_RETRIES {
                        self.spawn_retries += 1;
                        tokio::time::sleep(POLL_INTERVAL * self.spawn_retries).await;
                        self.handle.retry_spawn().await?;
                    } else {
                        self.handle.abort().await?;
                        anyhow::bail!("creature lookups keep failing; run abandoned");
                    }
                }
                SessionPhase::RunEnded => {
                    self.handle.acknowledge().await?;
                    return Ok(RunSummary {
                        floor: session.floor,
                        high_score: session.high_score,
                        new_record: session.new_record,
                    });
                }
                SessionPhase::NotStarted => anyhow::bail!("run ended without a result"),
                SessionPhase::Victory | SessionPhase::AwaitingSpawn => {}
            }
        }
        anyhow::bail!("autoplay gave up after {MAX_ACTIONS} actions")
    }

    /// The session once it waits on player input.
    async fn awaiting_input(&self) -> Result<BattleSession> {
        loop {
            let session = self.handle.snapshot().await?;
            let busy = match session.phase {
                SessionPhase::InBattle => session.turn == Side::Enemy,
                SessionPhase::Victory | SessionPhase::AwaitingSpawn => true,
                _ => false,
            };
            if !busy {
                return Ok(session);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn attack(&mut self, session: &BattleSession) -> Result<()> {
        let (Some(player), Some(enemy)) = (&session.player, &session.enemy) else {
            anyhow::bail!("battle without both combatants");
        };
        let index = policy::choose_move(player, enemy);
        match self.handle.use_move(index).await {
            Ok(_) => {
                self.spawn_retries = 0;
                Ok(())
            }
            // Lost a race with the enemy's turn; poll again.
            Err(error) if error.is_rejection() => {
                tracing::debug!(target: "cli", error = %error, "Move rejected");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn loot(&mut self, session: &BattleSession) -> Result<()> {
        let index = policy::choose_upgrade(&session.pending_upgrades, session.player.as_ref());
        match self.handle.select_upgrade(index).await {
            Ok(_) => Ok(()),
            // The evolution target could not be looked up; take something else.
            Err(RuntimeError::Provider { kind, source }) => {
                tracing::warn!(target: "cli", %kind, error = %source, "Upgrade failed");
                let fallback = session
                    .pending_upgrades
                    .iter()
                    .position(|offer| !matches!(offer, Upgrade::Evolve(_)))
                    .unwrap_or(0);
                self.handle.select_upgrade(fallback).await?;
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }
}
