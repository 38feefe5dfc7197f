//! Turns runtime events into console lines.
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use game_core::{SessionPhase, Tier, Upgrade};
use runtime::{GameEvent, Topic};

/// Console lines for one event. Pacing and full turn outcomes are left to
/// the battle log, which already narrates them.
pub fn describe(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::Narration { lines } => lines.clone(),
        GameEvent::EnemySpawned { floor, tier, enemy } => {
            let label = match tier {
                Tier::Normal => "",
                Tier::MiniBoss => " (mini-boss)",
                Tier::Boss => " (BOSS)",
            };
            vec![format!(
                "-- Floor {floor}: {} Lv.{} appears{label} --",
                enemy.name, enemy.level
            )]
        }
        GameEvent::SpawnFailed { reason, .. } => vec![format!("!! Spawn failed: {reason}")],
        GameEvent::LootOffered { offers } => {
            let mut lines = vec!["Loot:".to_string()];
            lines.extend(
                offers
                    .iter()
                    .enumerate()
                    .map(|(index, offer)| format!("  [{index}] {}", offer_label(offer))),
            );
            lines
        }
        GameEvent::UpgradeApplied { upgrade, floor } => {
            vec![format!("Took {} and moved on to floor {floor}", upgrade.name())]
        }
        GameEvent::RunEnded {
            floor,
            high_score,
            new_record,
        } => {
            let mut lines = vec![format!("== Run over on floor {floor} (best: {high_score}) ==")];
            if *new_record {
                lines.push("New record!".to_string());
            }
            lines
        }
        GameEvent::HighScoreSaveFailed { error, .. } => {
            vec![format!("!! Could not save high score: {error}")]
        }
        GameEvent::RunSubmitted { record } => {
            vec![format!("Submitted {} (floor {}) to the leaderboard", record.species, record.floor)]
        }
        GameEvent::SubmissionFailed { error, .. } => {
            vec![format!("!! Leaderboard submission failed: {error}")]
        }
        GameEvent::PhaseChanged { phase } if *phase == SessionPhase::SelectingCombatant => {
            vec!["Choose your starter...".to_string()]
        }
        _ => Vec::new(),
    }
}

fn offer_label(offer: &Upgrade) -> String {
    match offer {
        Upgrade::StatBoost(boost) => format!("{}: {}", boost.name, boost.description),
        Upgrade::Equip(item) => format!("{} (held item): {}", item.name, item.description),
        Upgrade::Evolve(evolution) => format!("Evolve into #{}", evolution.target.0),
    }
}

/// Prints events from one topic until the runtime goes away.
pub async fn print_events(topic: Topic, mut rx: broadcast::Receiver<GameEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                for line in describe(&event) {
                    println!("{line}");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(target: "cli", ?topic, skipped, "Event consumer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::{SpeciesId, StatBoost, StatKind};
    use runtime::RunRecord;

    use super::*;

    #[test]
    fn narration_passes_through() {
        let event = GameEvent::Narration {
            lines: vec!["Pikachu used Thunder Shock!".into()],
        };
        assert_eq!(describe(&event), vec!["Pikachu used Thunder Shock!"]);
    }

    #[test]
    fn loot_lists_indexed_offers() {
        let event = GameEvent::LootOffered {
            offers: vec![Upgrade::StatBoost(StatBoost::new(
                "1",
                "Protein",
                "Increases Attack by 5",
                StatKind::Attack,
                5,
            ))],
        };
        assert_eq!(
            describe(&event),
            vec!["Loot:", "  [0] Protein: Increases Attack by 5"]
        );
    }

    #[test]
    fn record_runs_are_announced() {
        let ended = GameEvent::RunEnded {
            floor: 7,
            high_score: 7,
            new_record: true,
        };
        assert_eq!(describe(&ended).len(), 2);

        let submitted = GameEvent::RunSubmitted {
            record: RunRecord {
                player_name: "Ash".into(),
                species: "Pikachu".into(),
                species_id: SpeciesId(25),
                floor: 7,
            },
        };
        assert!(describe(&submitted)[0].contains("Pikachu"));
    }

    #[test]
    fn pacing_is_silent() {
        let event = GameEvent::PhaseChanged {
            phase: SessionPhase::InBattle,
        };
        assert!(describe(&event).is_empty());
    }
}
