use forage_content::BrainKind;
use forage_core::{AgentEvent, AgentState};
use tracing::warn;

use crate::brains::{Brain, narrate_energy};
use crate::events::SimEvent;

/// Running totals kept for the end-of-session summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonsterStats {
    pub meals: u32,
    /// Energy actually gained from food, after clamping.
    pub energy_eaten: u32,
    pub cells_moved: u32,
    pub bumps: u32,
    pub naps: u32,
}

/// A monster on the grid: its state machine, its brain and its tallies.
pub struct Monster {
    pub name: String,
    pub state: AgentState,
    pub brain: Box<dyn Brain>,
    pub stats: MonsterStats,
}

impl Monster {
    pub fn kind(&self) -> BrainKind {
        self.brain.kind()
    }

    /// Turns a timed transition of the state machine into events.
    pub(crate) fn narrate(&mut self, event: AgentEvent, outbox: &mut Vec<SimEvent>) {
        let monster = self.state.id();
        match event {
            AgentEvent::Arrived { to, .. } => {
                self.stats.cells_moved += 1;
                outbox.push(SimEvent::Arrived { monster, at: to });
            }
            AgentEvent::SleepTick {
                energy,
                ticks_remaining,
                change,
            } => {
                outbox.push(said(monster, "Zzz..."));
                outbox.push(SimEvent::Slept {
                    monster,
                    energy,
                    ticks_remaining,
                });
                narrate_energy(monster, change, &mut self.stats, outbox);
            }
            AgentEvent::WokeUp => {
                outbox.push(said(monster, "Good morning!"));
                outbox.push(SimEvent::WokeUp { monster });
            }
            AgentEvent::ItemLost { item, cell } => {
                outbox.push(said(monster, "I have lost the ring."));
                outbox.push(SimEvent::LostItem {
                    monster,
                    item,
                    at: cell,
                });
            }
            AgentEvent::ItemKept { item } => {
                warn!(name = %self.name, %item, "no empty cell to drop a timed-out item");
            }
            AgentEvent::Rested => {}
        }
    }
}

fn said(monster: forage_core::AgentId, message: &str) -> SimEvent {
    SimEvent::Said {
        monster,
        message: message.to_string(),
    }
}
