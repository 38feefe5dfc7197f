//! Leaderboard service client.

use async_trait::async_trait;
use serde::Serialize;

use crate::api::providers::{LeaderboardEntry, ProviderError, RunRecord, RunSink};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Submits runs to and reads top scores from `{base}/api/leaderboard`.
pub struct LeaderboardClient {
    base_url: String,
    token: Option<String>,
    http_client: reqwest::Client,
}

/// Request body expected by the leaderboard service.
#[derive(Serialize)]
struct Submission<'a> {
    name: &'a str,
    pokemon: &'a str,
    #[serde(rename = "pokemonId")]
    pokemon_id: u32,
    floor: u32,
}

impl<'a> From<&'a RunRecord> for Submission<'a> {
    fn from(record: &'a RunRecord) -> Self {
        Self {
            name: &record.player_name,
            pokemon: &record.species,
            pokemon_id: record.species_id.0,
            floor: record.floor,
        }
    }
}

impl LeaderboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            http_client: reqwest::Client::new(),
        }
    }

    /// Sends `Authorization: Bearer <token>` with submissions.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/leaderboard", self.base_url)
    }
}

#[async_trait]
impl RunSink for LeaderboardClient {
    async fn submit(&self, record: &RunRecord) -> Result<(), ProviderError> {
        let url = self.endpoint();
        let mut request = self
            .http_client
            .post(&url)
            .json(&Submission::from(record));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::Unauthorized(status.as_u16()));
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                url,
                status: status.as_u16(),
            });
        }

        tracing::info!(
            target: "runtime::leaderboard",
            player = %record.player_name,
            floor = record.floor,
            "Run submitted"
        );
        Ok(())
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ProviderError> {
        let url = self.endpoint();
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let mut entries: Vec<LeaderboardEntry> =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        entries.sort_by(|a, b| b.floor.cmp(&a.floor));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::SpeciesId;

    #[test]
    fn submission_uses_service_field_names() {
        let record = RunRecord {
            player_name: "Red".into(),
            species: "Charizard".into(),
            species_id: SpeciesId(6),
            floor: 23,
        };
        let json = serde_json::to_value(Submission::from(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Red", "pokemon": "Charizard", "pokemonId": 6, "floor": 23})
        );
    }

    #[test]
    fn entries_parse_with_and_without_dates() {
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(
            r#"[
                {"_id": "a1", "name": "Red", "pokemon": "Mew", "pokemonId": 151, "floor": 30,
                 "date": "2024-05-01T12:00:00.000Z", "__v": 0},
                {"name": "Blue", "pokemon": "Pidgey", "pokemonId": 16, "floor": 3}
            ]"#,
        )
        .unwrap();

        assert_eq!(entries[0].pokemon_id, 151);
        assert!(entries[0].date.is_some());
        assert!(entries[1].date.is_none());
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = LeaderboardClient::new("http://localhost:5000/");
        assert_eq!(client.endpoint(), "http://localhost:5000/api/leaderboard");
    }
}
