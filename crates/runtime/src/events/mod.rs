//! Topic-based event bus for runtime events.
//!
//! Every observable transition of the simulation is published to a topic, and
//! consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::SimEvent;
