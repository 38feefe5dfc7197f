//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::GameEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase changes, narration, spawns and loot
    Session,
    /// Turn pacing and resolved turns
    Battle,
    /// High-score storage and leaderboard submission
    Persistence,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Session, Topic::Battle, Topic::Persistence];
}

struct Channels {
    session: broadcast::Sender<GameEvent>,
    battle: broadcast::Sender<GameEvent>,
    persistence: broadcast::Sender<GameEvent>,
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they care about. Publishing is
/// best-effort: events sent while nobody listens are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                session: broadcast::channel(capacity).0,
                battle: broadcast::channel(capacity).0,
                persistence: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<GameEvent> {
        match topic {
            Topic::Session => &self.channels.session,
            Topic::Battle => &self.channels.battle,
            Topic::Persistence => &self.channels.persistence,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: GameEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to every topic, one receiver per topic in [`Topic::ALL`] order.
    pub fn subscribe_all(&self) -> Vec<(Topic, broadcast::Receiver<GameEvent>)> {
        Topic::ALL
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut session = bus.subscribe(Topic::Session);
        let mut persistence = bus.subscribe(Topic::Persistence);

        bus.publish(GameEvent::HighScoreSaved { high_score: 4 });

        assert_eq!(
            persistence.try_recv().unwrap(),
            GameEvent::HighScoreSaved { high_score: 4 }
        );
        assert!(session.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(GameEvent::Narration {
            lines: vec!["A wild Pidgey appears!".into()],
        });
    }
}
