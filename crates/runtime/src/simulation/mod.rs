//! Deterministic simulation driver.
//!
//! [`Simulation`] owns the authoritative [`GridWorld`], every monster and the
//! session generator. Each [`Simulation::step`] advances simulated time for
//! all monsters in roster order and runs the brain of every monster that asks
//! for a decision. Nothing here touches a wall clock, so a session replays
//! exactly from its seed and the sequence of step sizes.

mod monster;
mod render;
mod summary;

pub use monster::{Monster, MonsterStats};
pub use summary::{MonsterReport, SessionSummary};

use forage_content::MonsterSpec;
use forage_core::{AgentId, AgentState, ForageConfig, GridWorld, ItemKind};
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::brains::{Body, brain_for};
use crate::events::{Event, SimEvent};
use crate::rng::SimRng;

pub struct Simulation {
    world: GridWorld,
    config: ForageConfig,
    monsters: Vec<Monster>,
    rng: SimRng,
    time_ms: u64,
    steps: u64,
    /// Setup events not yet handed out.
    pending: Vec<Event>,
}

impl Simulation {
    /// Populates `world` with food, the rubber ring and the roster.
    ///
    /// Monsters get ids in roster order and start out awaiting a decision,
    /// so every brain runs on the first step.
    pub fn new(
        mut world: GridWorld,
        config: ForageConfig,
        roster: &[MonsterSpec],
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        if roster.is_empty() {
            return Err(RuntimeError::EmptyRoster);
        }

        let mut rng = SimRng::seeded(seed);
        let mut setup = Vec::new();

        for _ in 0..config.initial_food {
            match world.spawn_food(&mut rng, &config.food) {
                Some((at, food)) => setup.push(SimEvent::FoodSpawned { at, food }),
                None => {
                    warn!(wanted = config.initial_food, "grid is full, stopped spawning food");
                    break;
                }
            }
        }

        let ring = world
            .random_empty_cell(&mut rng)
            .ok_or(RuntimeError::NoRoom { what: "rubber ring" })?;
        world.place_item(ring, ItemKind::RubberRing)?;
        setup.push(SimEvent::ItemSpawned {
            at: ring,
            item: ItemKind::RubberRing,
        });

        let mut monsters = Vec::with_capacity(roster.len());
        for (index, spec) in roster.iter().enumerate() {
            let id = AgentId(index as u32);
            let cell = world
                .random_empty_cell(&mut rng)
                .ok_or(RuntimeError::NoRoom { what: "a monster" })?;
            world.place_agent(id, cell)?;

            debug!(name = %spec.name, brain = ?spec.brain, %cell, "monster placed");
            setup.push(SimEvent::Said {
                monster: id,
                message: format!("Hi! I am {}", spec.name),
            });
            monsters.push(Monster {
                name: spec.name.clone(),
                state: AgentState::new(id, cell, &config),
                brain: brain_for(spec.brain, world.size(), &config),
                stats: MonsterStats::default(),
            });
        }

        info!(
            size = world.size(),
            monsters = monsters.len(),
            food = world.food_count(),
            seed,
            "simulation ready"
        );

        Ok(Self {
            world,
            config,
            monsters,
            rng,
            time_ms: 0,
            steps: 0,
            pending: setup
                .into_iter()
                .map(|payload| Event {
                    time_ms: 0,
                    payload,
                })
                .collect(),
        })
    }

    /// Setup events (spawns and greetings) that no step has returned yet.
    pub fn take_pending(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    /// Advances the session by `elapsed_ms` of simulated time.
    ///
    /// Each monster first advances its timers, then decides if it asked to.
    /// A monster's whole cycle completes before the next monster starts, so
    /// every decision sees a consistent world. Returns the events of this
    /// step, preceded by any setup events not yet taken.
    pub fn step(&mut self, elapsed_ms: u64) -> Result<Vec<Event>> {
        self.time_ms = self.time_ms.saturating_add(elapsed_ms);
        self.steps += 1;

        let mut events = self.take_pending();
        let mut outbox = Vec::new();

        let Self {
            world,
            config,
            monsters,
            rng,
            ..
        } = self;

        for monster in monsters.iter_mut() {
            let transitions = monster
                .state
                .advance(&mut *world, &mut *rng, &*config, elapsed_ms)?;
            for transition in transitions {
                monster.narrate(transition, &mut outbox);
            }

            if monster.state.take_decision_request() {
                let mut body = Body::new(
                    &mut monster.state,
                    &mut *world,
                    &mut *rng,
                    &*config,
                    &mut monster.stats,
                    &mut outbox,
                );
                monster.brain.decide(&mut body)?;
            }
        }

        for payload in outbox {
            debug!(time_ms = self.time_ms, event = ?payload, "sim event");
            events.push(Event {
                time_ms: self.time_ms,
                payload,
            });
        }
        Ok(events)
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn config(&self) -> &ForageConfig {
        &self.config
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn render_ascii(&self) -> String {
        render::render_ascii(&self.world, &self.monsters)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            time_ms: self.time_ms,
            steps: self.steps,
            food_on_grid: self.world.food_count(),
            monsters: self
                .monsters
                .iter()
                .map(|monster| MonsterReport {
                    name: monster.name.clone(),
                    brain: monster.kind(),
                    position: monster.state.position(),
                    energy: monster.state.energy(),
                    sleeping: monster.state.is_sleeping(),
                    stats: monster.stats,
                })
                .collect(),
        }
    }
}
