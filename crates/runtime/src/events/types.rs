//! Simulation event payloads.

use forage_core::{AgentId, Cell, Direction, FoodType, ItemKind};

use super::Topic;

/// Observable transition of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A monster spoke. Display is up to the consumer.
    Said { monster: AgentId, message: String },

    MoveStarted {
        monster: AgentId,
        from: Cell,
        to: Cell,
        swimming: bool,
    },

    /// A move into an occupied or impassable cell was refused.
    Bumped {
        monster: AgentId,
        at: Cell,
        direction: Direction,
    },

    Arrived { monster: AgentId, at: Cell },

    /// The monster had no legal move and waits before deciding again.
    Idled { monster: AgentId, at: Cell },

    Ate {
        monster: AgentId,
        at: Cell,
        food: FoodType,
        gain: u32,
    },

    Picked {
        monster: AgentId,
        at: Cell,
        item: ItemKind,
    },

    /// A held item timed out and reappeared at `at`.
    LostItem {
        monster: AgentId,
        item: ItemKind,
        at: Cell,
    },

    Slowed { monster: AgentId },
    Recovered { monster: AgentId },
    FellAsleep { monster: AgentId, ticks: u32 },
    Slept { monster: AgentId, energy: u32, ticks_remaining: u32 },
    WokeUp { monster: AgentId },

    FoodSpawned { at: Cell, food: FoodType },
    ItemSpawned { at: Cell, item: ItemKind },
}

impl SimEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SimEvent::FoodSpawned { .. } | SimEvent::ItemSpawned { .. } => Topic::World,
            SimEvent::Said { .. } => Topic::Speech,
            _ => Topic::Monster,
        }
    }
}
