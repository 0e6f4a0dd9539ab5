//! Decision logic for monsters.
//!
//! A brain runs once per decision cycle: after a move completes, right after a
//! refused move, on waking up and after an idle rest. It acts only through the
//! [`Body`] it is handed.

mod body;
mod explorer;
mod forager;
mod wanderer;

pub use body::Body;
pub(crate) use body::narrate_energy;
pub use explorer::Explorer;
pub use forager::Forager;
pub use wanderer::Wanderer;

use forage_content::BrainKind;
use forage_core::ForageConfig;

use crate::api::Result;

/// Decision logic of one monster.
pub trait Brain: Send {
    fn kind(&self) -> BrainKind;

    fn decide(&mut self, body: &mut Body<'_>) -> Result<()>;
}

/// Creates the brain for `kind` on a grid of `world_size` cells per side.
pub fn brain_for(kind: BrainKind, world_size: u32, config: &ForageConfig) -> Box<dyn Brain> {
    match kind {
        BrainKind::Wanderer => Box::new(Wanderer),
        BrainKind::Forager => Box::new(Forager),
        BrainKind::Explorer => Box::new(Explorer::new(world_size, config.reward_policy)),
    }
}

/// Eats and picks up whatever is under the monster.
fn forage_here(body: &mut Body<'_>) -> Result<()> {
    if body.is_on_food() {
        body.eat_food()?;
    }
    if body.is_on_item() {
        body.pick_item()?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use forage_core::{AgentId, AgentState, Cell, ForageConfig, GridWorld, PcgSource};

    use super::Body;
    use crate::events::SimEvent;
    use crate::simulation::MonsterStats;

    /// Owns everything a [`Body`] borrows, for driving brains in tests.
    pub struct Rig {
        pub agent: AgentState,
        pub world: GridWorld,
        pub rng: PcgSource,
        pub config: ForageConfig,
        pub stats: MonsterStats,
        pub outbox: Vec<SimEvent>,
    }

    impl Rig {
        pub fn new(mut world: GridWorld, at: Cell) -> Self {
            let config = ForageConfig::default();
            world.place_agent(AgentId(0), at).unwrap();
            Self {
                agent: AgentState::new(AgentId(0), at, &config),
                world,
                rng: PcgSource::new(17),
                config,
                stats: MonsterStats::default(),
                outbox: Vec::new(),
            }
        }

        pub fn body(&mut self) -> Body<'_> {
            Body::new(
                &mut self.agent,
                &mut self.world,
                &mut self.rng,
                &self.config,
                &mut self.stats,
                &mut self.outbox,
            )
        }
    }
}
