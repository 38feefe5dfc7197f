//! Builds the runtime and its collaborators for front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};
use runtime::{
    FileHighScoreRepository, HighScoreRepository, LeaderboardClient, PokeApiClient, Runtime,
};

use crate::config::ClientConfig;
use crate::oracles::{ContentOracleFactory, OracleFactory};

/// Builder that wires a [`Runtime`] to the HTTP collaborators, the
/// high-score file and the configured content.
pub struct RuntimeBuilder {
    config: ClientConfig,
    oracle_factory: Arc<dyn OracleFactory>,
    high_scores: Option<Arc<dyn HighScoreRepository>>,
}

impl RuntimeBuilder {
    pub fn new(config: ClientConfig) -> Self {
        let default_factory = ContentOracleFactory::from_config(&config);
        Self {
            config,
            oracle_factory: Arc::new(default_factory),
            high_scores: None,
        }
    }

    /// Provide a custom oracle factory.
    pub fn oracle_factory(mut self, factory: impl OracleFactory + 'static) -> Self {
        self.oracle_factory = Arc::new(factory);
        self
    }

    /// Replace the file-backed high-score store.
    pub fn high_scores(mut self, repository: Arc<dyn HighScoreRepository>) -> Self {
        self.high_scores = Some(repository);
        self
    }

    pub async fn build(self) -> Result<RuntimeSetup> {
        let oracles = self
            .oracle_factory
            .build()
            .context("failed to load game content")?;

        let pokeapi = Arc::new(
            PokeApiClient::new(self.config.pokeapi_url.clone())
                .with_items(oracles.catalog().items.clone()),
        );

        let mut leaderboard = LeaderboardClient::new(self.config.leaderboard_url.clone());
        if let Some(token) = &self.config.leaderboard_token {
            leaderboard = leaderboard.with_token(token.clone());
        }

        let high_scores = match self.high_scores {
            Some(repository) => repository,
            None => {
                let repository = match &self.config.save_data_dir {
                    Some(dir) => FileHighScoreRepository::new(dir),
                    None => FileHighScoreRepository::in_default_location(),
                }
                .context("failed to open the high-score store")?;
                tracing::info!(
                    target: "bootstrap",
                    path = %repository.path().display(),
                    "High score file"
                );
                Arc::new(repository)
            }
        };

        let runtime = Runtime::builder()
            .config(self.config.runtime_config())
            .oracles(oracles)
            .creatures(pokeapi.clone())
            .items(pokeapi)
            .run_sink(Arc::new(leaderboard))
            .high_scores(high_scores)
            .build()
            .await?;

        Ok(RuntimeSetup {
            config: self.config,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: ClientConfig,
    pub runtime: Runtime,
}
