//! Per-monster resource and motion state machine.
//!
//! A monster is either idle, moving into a reserved cell or resting after it
//! found no legal move. Orthogonally it is awake or asleep. All timing is
//! driven by [`AgentState::advance`], which the driver calls with the
//! simulated time that passed since the previous call.

use arrayvec::ArrayVec;

use crate::config::ForageConfig;
use crate::content::{ContentMask, FoodType, ItemKind, Terrain};
use crate::error::WorldError;
use crate::rng::RandomSource;

use super::{AgentId, Cell, Direction, GridWorld};

/// Maximum number of items a monster can hold at once.
pub const MAX_CARRIED_ITEMS: usize = 4;

/// Movement speed of a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedFactor {
    #[default]
    Normal,
    /// Energy dropped below the critical level.
    Slow,
}

impl SpeedFactor {
    /// Speed as a percentage of normal speed.
    pub fn percent(self, config: &ForageConfig) -> u32 {
        match self {
            SpeedFactor::Normal => 100,
            SpeedFactor::Slow => config.slow_speed_percent,
        }
    }
}

/// Side effect of an energy change on speed and sleep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnergyChange {
    /// Neither speed nor sleep changed.
    Steady,
    /// Energy fell below the critical level; the monster is now slow.
    Slowed,
    /// Energy rose above the critical level; normal speed is restored.
    Recovered,
    /// Energy reached zero; the monster fell asleep.
    Exhausted { sleep_ticks: u32 },
}

/// Result of asking a monster to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Sleeping monsters ignore move requests.
    Asleep,
    /// A move or a rest is already in progress.
    Busy,
    Started {
        direction: Direction,
        target: Cell,
        duration_ms: u64,
        /// The destination is water.
        swimming: bool,
        energy: EnergyChange,
    },
    /// The destination could not be entered; the penalty was charged.
    Bumped {
        direction: Direction,
        energy: EnergyChange,
    },
}

/// A food eaten by a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meal {
    pub food: FoodType,
    /// Energy actually gained, after clamping to the maximum.
    pub gain: u32,
    pub energy: EnergyChange,
    /// Replacement food, unless the grid had no empty cell left.
    pub replacement: Option<(Cell, FoodType)>,
}

/// Timed transition reported by [`AgentState::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentEvent {
    Arrived { from: Cell, to: Cell },
    SleepTick {
        energy: u32,
        ticks_remaining: u32,
        change: EnergyChange,
    },
    WokeUp,
    /// A held item timed out and was dropped at `cell`.
    ItemLost { item: ItemKind, cell: Cell },
    /// A held item timed out but the grid had no room for it.
    ItemKept { item: ItemKind },
    Rested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Sleep {
    ticks_remaining: u32,
    since_tick_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Motion {
    target: Cell,
    elapsed_ms: u64,
    duration_ms: u64,
}

/// An item held by a monster together with its possession timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarriedItem {
    pub kind: ItemKind,
    pub held_ms: u64,
}

/// State of one monster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentState {
    id: AgentId,
    position: Cell,
    energy: u32,
    speed: SpeedFactor,
    sleep: Option<Sleep>,
    motion: Option<Motion>,
    /// Remaining rest after a decision found no legal move.
    rest_ms: Option<u64>,
    carried: ArrayVec<CarriedItem, MAX_CARRIED_ITEMS>,
    awaiting_decision: bool,
}

impl AgentState {
    /// Creates an awake monster with full energy that wants to decide.
    pub fn new(id: AgentId, position: Cell, config: &ForageConfig) -> Self {
        Self {
            id,
            position,
            energy: config.energy_max,
            speed: SpeedFactor::Normal,
            sleep: None,
            motion: None,
            rest_ms: None,
            carried: ArrayVec::new(),
            awaiting_decision: true,
        }
    }

    /// Overrides the starting energy, clamped to the maximum.
    pub fn with_energy(mut self, energy: u32, config: &ForageConfig) -> Self {
        self.energy = energy.min(config.energy_max);
        self.speed = if self.energy < config.energy_critical_level {
            SpeedFactor::Slow
        } else {
            SpeedFactor::Normal
        };
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn speed(&self) -> SpeedFactor {
        self.speed
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleep.is_some()
    }

    pub fn sleep_ticks_remaining(&self) -> u32 {
        self.sleep.map_or(0, |sleep| sleep.ticks_remaining)
    }

    /// Destination of the move in flight, if any.
    pub fn target_position(&self) -> Option<Cell> {
        self.motion.map(|motion| motion.target)
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    pub fn is_resting(&self) -> bool {
        self.rest_ms.is_some()
    }

    pub fn carried_items(&self) -> &[CarriedItem] {
        &self.carried
    }

    pub fn can_swim(&self) -> bool {
        self.carried.iter().any(|item| item.kind.grants_swimming())
    }

    pub fn awaiting_decision(&self) -> bool {
        self.awaiting_decision
    }

    /// Clears and returns the pending decision request.
    pub fn take_decision_request(&mut self) -> bool {
        std::mem::take(&mut self.awaiting_decision)
    }

    /// Whether the neighbour in `direction` can be entered right now.
    ///
    /// Other monsters and their reservations always block, even for a
    /// swimmer. Water needs a swim item. Food and items never block.
    pub fn can_move(&self, world: &GridWorld, direction: Direction) -> bool {
        let target = self.position.step(direction);
        let Some(terrain) = world.terrain_at(target) else {
            return false;
        };

        let mask = world.mask_at(target);
        if mask.intersects(ContentMask::AGENT | ContentMask::TARGET) {
            return false;
        }

        match terrain {
            Terrain::Grass => true,
            Terrain::Pond => self.can_swim(),
            Terrain::Rock(_) => false,
        }
    }

    /// Starts a move, or charges the bump penalty when the move is illegal.
    pub fn start_move(
        &mut self,
        world: &mut GridWorld,
        direction: Direction,
        config: &ForageConfig,
    ) -> Result<MoveOutcome, WorldError> {
        if self.is_sleeping() {
            return Ok(MoveOutcome::Asleep);
        }
        if self.motion.is_some() || self.rest_ms.is_some() {
            return Ok(MoveOutcome::Busy);
        }

        if !self.can_move(world, direction) {
            let energy = self.reduce_energy(config.energy_penalty_occupied, config);
            // Waking up requests the next decision for a monster that just fell asleep.
            self.awaiting_decision = !self.is_sleeping();
            return Ok(MoveOutcome::Bumped { direction, energy });
        }

        let target = self.position.step(direction);
        world.reserve_target(self.id, target)?;

        let duration_ms = config.move_duration_at(self.speed.percent(config));
        self.motion = Some(Motion {
            target,
            elapsed_ms: 0,
            duration_ms,
        });
        self.awaiting_decision = false;

        let swimming = matches!(world.terrain_at(target), Some(Terrain::Pond));
        let energy = self.reduce_energy(config.energy_per_move, config);

        Ok(MoveOutcome::Started {
            direction,
            target,
            duration_ms,
            swimming,
            energy,
        })
    }

    /// Waits `idle_retry_ms` before asking for another decision.
    pub fn rest(&mut self, config: &ForageConfig) {
        if self.motion.is_none() {
            self.rest_ms = Some(config.idle_retry_ms);
            self.awaiting_decision = false;
        }
    }

    pub fn increase_energy(&mut self, amount: u32, config: &ForageConfig) -> EnergyChange {
        self.energy = self.energy.saturating_add(amount).min(config.energy_max);

        if self.speed == SpeedFactor::Slow && self.energy > config.energy_critical_level {
            self.speed = SpeedFactor::Normal;
            return EnergyChange::Recovered;
        }
        EnergyChange::Steady
    }

    pub fn reduce_energy(&mut self, amount: u32, config: &ForageConfig) -> EnergyChange {
        self.energy = self.energy.saturating_sub(amount);

        if self.energy == 0 {
            if self.is_sleeping() {
                return EnergyChange::Steady;
            }
            let sleep_ticks = config.full_recovery_ticks();
            self.sleep = Some(Sleep {
                ticks_remaining: sleep_ticks,
                since_tick_ms: 0,
            });
            return EnergyChange::Exhausted { sleep_ticks };
        }

        if self.energy < config.energy_critical_level && self.speed == SpeedFactor::Normal {
            self.speed = SpeedFactor::Slow;
            return EnergyChange::Slowed;
        }
        EnergyChange::Steady
    }

    /// Eats the food on the current cell and spawns a replacement.
    ///
    /// Returns `None` when there is nothing to eat here.
    pub fn eat_food_here<R>(
        &mut self,
        world: &mut GridWorld,
        rng: &mut R,
        config: &ForageConfig,
    ) -> Result<Option<Meal>, WorldError>
    where
        R: RandomSource + ?Sized,
    {
        if world.food_at(self.position).is_none() {
            return Ok(None);
        }

        let food = world.remove_food(self.position)?;
        let before = self.energy;
        let energy = self.increase_energy(config.food.energy(food), config);
        let replacement = world.spawn_food(rng, &config.food);

        Ok(Some(Meal {
            food,
            gain: self.energy - before,
            energy,
            replacement,
        }))
    }

    /// Picks up the item on the current cell, if there is room to carry it.
    pub fn pick_item_here(&mut self, world: &mut GridWorld) -> Result<Option<ItemKind>, WorldError> {
        if world.item_at(self.position).is_none() || self.carried.is_full() {
            return Ok(None);
        }

        let kind = world.remove_item(self.position)?;
        self.carried.push(CarriedItem { kind, held_ms: 0 });
        Ok(Some(kind))
    }

    /// Advances animation, rest, sleep and item timers by `elapsed_ms`.
    ///
    /// At most one move completes per call; time past the arrival is not
    /// carried into the next move.
    pub fn advance<R>(
        &mut self,
        world: &mut GridWorld,
        rng: &mut R,
        config: &ForageConfig,
        elapsed_ms: u64,
    ) -> Result<Vec<AgentEvent>, WorldError>
    where
        R: RandomSource + ?Sized,
    {
        let mut events = Vec::new();

        self.advance_motion(world, elapsed_ms, &mut events)?;
        self.advance_rest(elapsed_ms, &mut events);
        self.advance_sleep(config, elapsed_ms, &mut events);
        self.advance_items(world, rng, config, elapsed_ms, &mut events)?;

        Ok(events)
    }

    fn advance_motion(
        &mut self,
        world: &mut GridWorld,
        elapsed_ms: u64,
        events: &mut Vec<AgentEvent>,
    ) -> Result<(), WorldError> {
        let Some(motion) = self.motion.as_mut() else {
            return Ok(());
        };

        motion.elapsed_ms = motion.elapsed_ms.saturating_add(elapsed_ms);
        if motion.elapsed_ms < motion.duration_ms {
            return Ok(());
        }

        let from = self.position;
        let to = motion.target;
        world.commit_agent(self.id, from, to)?;
        self.position = to;
        self.motion = None;
        if !self.is_sleeping() {
            self.awaiting_decision = true;
        }
        events.push(AgentEvent::Arrived { from, to });
        Ok(())
    }

    fn advance_rest(&mut self, elapsed_ms: u64, events: &mut Vec<AgentEvent>) {
        let Some(remaining) = self.rest_ms else {
            return;
        };

        if elapsed_ms >= remaining {
            self.rest_ms = None;
            if !self.is_sleeping() {
                self.awaiting_decision = true;
            }
            events.push(AgentEvent::Rested);
        } else {
            self.rest_ms = Some(remaining - elapsed_ms);
        }
    }

    fn advance_sleep(&mut self, config: &ForageConfig, elapsed_ms: u64, events: &mut Vec<AgentEvent>) {
        let Some(sleep) = self.sleep.as_mut() else {
            return;
        };
        sleep.since_tick_ms = sleep.since_tick_ms.saturating_add(elapsed_ms);

        loop {
            let Some(sleep) = self.sleep.as_mut() else {
                break;
            };
            if sleep.since_tick_ms < config.sleep_tick_ms {
                break;
            }
            sleep.since_tick_ms -= config.sleep_tick_ms;

            if sleep.ticks_remaining > 0 {
                sleep.ticks_remaining -= 1;
                let ticks_remaining = sleep.ticks_remaining;
                let change = self.increase_energy(config.energy_per_sleep_tick, config);
                events.push(AgentEvent::SleepTick {
                    energy: self.energy,
                    ticks_remaining,
                    change,
                });
            } else {
                self.sleep = None;
                if self.motion.is_none() && self.rest_ms.is_none() {
                    self.awaiting_decision = true;
                }
                events.push(AgentEvent::WokeUp);
            }
        }
    }

    fn advance_items<R>(
        &mut self,
        world: &mut GridWorld,
        rng: &mut R,
        config: &ForageConfig,
        elapsed_ms: u64,
        events: &mut Vec<AgentEvent>,
    ) -> Result<(), WorldError>
    where
        R: RandomSource + ?Sized,
    {
        let mut index = 0;
        while index < self.carried.len() {
            let item = &mut self.carried[index];
            item.held_ms = item.held_ms.saturating_add(elapsed_ms);
            if item.held_ms < config.item_owner_timeout_ms {
                index += 1;
                continue;
            }

            let kind = item.kind;
            match world.random_empty_cell(rng) {
                Some(cell) => {
                    world.place_item(cell, kind)?;
                    self.carried.remove(index);
                    events.push(AgentEvent::ItemLost { item: kind, cell });
                }
                None => {
                    item.held_ms = 0;
                    events.push(AgentEvent::ItemKept { item: kind });
                    index += 1;
                }
            }
        }
        Ok(())
    }
}
