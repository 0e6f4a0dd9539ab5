//! Topic-based event bus implementation.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::SimEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Movement, eating, sleep and items of individual monsters
    Monster,
    /// Food and items appearing on the grid
    World,
    /// Messages spoken by monsters
    Speech,
}

/// Event stamped with the simulated time it happened at.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub time_ms: u64,
    pub payload: SimEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        self.payload.topic()
    }
}

struct Channels {
    monster: broadcast::Sender<Event>,
    world: broadcast::Sender<Event>,
    speech: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels exist for every topic from the start.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                monster: broadcast::channel(capacity).0,
                world: broadcast::channel(capacity).0,
                speech: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Monster => &self.channels.monster,
            Topic::World => &self.channels.world,
            Topic::Speech => &self.channels.speech,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
