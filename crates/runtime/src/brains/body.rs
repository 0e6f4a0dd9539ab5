//! The monster-facing API used by brains.

use forage_core::{
    AgentId, AgentState, Cell, Direction, EnergyChange, FoodType, ForageConfig, GridWorld,
    ItemKind, Meal, MoveOutcome, RandomSource,
};

use crate::api::Result;
use crate::events::SimEvent;
use crate::simulation::MonsterStats;

/// One monster's view of and hold on the world during a decision cycle.
///
/// Every action goes through the monster's [`AgentState`], and every
/// observable effect is queued as a [`SimEvent`].
pub struct Body<'a> {
    agent: &'a mut AgentState,
    world: &'a mut GridWorld,
    rng: &'a mut dyn RandomSource,
    config: &'a ForageConfig,
    stats: &'a mut MonsterStats,
    outbox: &'a mut Vec<SimEvent>,
}

impl<'a> Body<'a> {
    pub(crate) fn new(
        agent: &'a mut AgentState,
        world: &'a mut GridWorld,
        rng: &'a mut dyn RandomSource,
        config: &'a ForageConfig,
        stats: &'a mut MonsterStats,
        outbox: &'a mut Vec<SimEvent>,
    ) -> Self {
        Self {
            agent,
            world,
            rng,
            config,
            stats,
            outbox,
        }
    }

    pub fn id(&self) -> AgentId {
        self.agent.id()
    }

    pub fn position(&self) -> Cell {
        self.agent.position()
    }

    pub fn energy(&self) -> u32 {
        self.agent.energy()
    }

    pub fn state(&self) -> &AgentState {
        &*self.agent
    }

    pub fn world(&self) -> &GridWorld {
        &*self.world
    }

    pub fn config(&self) -> &ForageConfig {
        self.config
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.outbox.push(SimEvent::Said {
            monster: self.agent.id(),
            message: message.into(),
        });
    }

    pub fn is_on_food(&self) -> bool {
        self.world.food_at(self.agent.position()).is_some()
    }

    pub fn is_on_item(&self) -> bool {
        self.world.item_at(self.agent.position()).is_some()
    }

    pub fn eat_food(&mut self) -> Result<Option<Meal>> {
        let at = self.agent.position();
        let meal = self
            .agent
            .eat_food_here(&mut *self.world, &mut *self.rng, self.config)?;
        let Some(meal) = meal else {
            return Ok(None);
        };

        self.stats.meals += 1;
        self.stats.energy_eaten += meal.gain;
        self.say("Yum, food");
        self.outbox.push(SimEvent::Ate {
            monster: self.agent.id(),
            at,
            food: meal.food,
            gain: meal.gain,
        });
        narrate_energy(self.agent.id(), meal.energy, self.stats, self.outbox);

        match meal.replacement {
            Some((cell, food)) => self.outbox.push(SimEvent::FoodSpawned { at: cell, food }),
            None => tracing::warn!(monster = %self.agent.id(), "no empty cell for replacement food"),
        }
        Ok(Some(meal))
    }

    pub fn pick_item(&mut self) -> Result<Option<ItemKind>> {
        let at = self.agent.position();
        let Some(item) = self.agent.pick_item_here(&mut *self.world)? else {
            return Ok(None);
        };

        if item.grants_swimming() {
            self.say("Wow! I can swim now.");
        }
        self.outbox.push(SimEvent::Picked {
            monster: self.agent.id(),
            at,
            item,
        });
        Ok(Some(item))
    }

    /// Food within the configured smell radius, reachable or not.
    pub fn smell(&self) -> Vec<(Cell, FoodType)> {
        self.world
            .nearby_food(self.agent.position(), self.config.smell_radius)
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        self.agent.can_move(&*self.world, direction)
    }

    pub fn move_in(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let from = self.agent.position();
        let outcome = self
            .agent
            .start_move(&mut *self.world, direction, self.config)?;
        let monster = self.agent.id();

        match outcome {
            MoveOutcome::Started {
                target,
                swimming,
                energy,
                ..
            } => {
                if swimming {
                    self.say("Whoaa! I am swimming");
                }
                self.outbox.push(SimEvent::MoveStarted {
                    monster,
                    from,
                    to: target,
                    swimming,
                });
                narrate_energy(monster, energy, self.stats, self.outbox);
            }
            MoveOutcome::Bumped { direction, energy } => {
                self.stats.bumps += 1;
                self.outbox.push(SimEvent::Bumped {
                    monster,
                    at: from,
                    direction,
                });
                narrate_energy(monster, energy, self.stats, self.outbox);
            }
            MoveOutcome::Asleep | MoveOutcome::Busy => {}
        }
        Ok(outcome)
    }

    /// Moves in a uniformly chosen legal direction, or rests when boxed in.
    pub fn move_randomly(&mut self) -> Result<Option<Direction>> {
        let legal: Vec<Direction> = Direction::PRIORITY
            .into_iter()
            .filter(|direction| self.can_move(*direction))
            .collect();

        if legal.is_empty() {
            self.agent.rest(self.config);
            self.outbox.push(SimEvent::Idled {
                monster: self.agent.id(),
                at: self.agent.position(),
            });
            return Ok(None);
        }

        let direction = legal[self.rng.below(legal.len())];
        self.move_in(direction)?;
        Ok(Some(direction))
    }
}

/// Queues the events and speech that follow an energy change.
pub(crate) fn narrate_energy(
    monster: AgentId,
    change: EnergyChange,
    stats: &mut MonsterStats,
    outbox: &mut Vec<SimEvent>,
) {
    match change {
        EnergyChange::Steady => {}
        EnergyChange::Slowed => {
            outbox.push(SimEvent::Said {
                monster,
                message: "Low on energy".to_string(),
            });
            outbox.push(SimEvent::Slowed { monster });
        }
        EnergyChange::Recovered => outbox.push(SimEvent::Recovered { monster }),
        EnergyChange::Exhausted { sleep_ticks } => {
            stats.naps += 1;
            outbox.push(SimEvent::Said {
                monster,
                message: "No energy left. Good night!".to_string(),
            });
            outbox.push(SimEvent::FellAsleep {
                monster,
                ticks: sleep_ticks,
            });
        }
    }
}
