//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a session.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

use forage_content::{MonsterSpec, Scenario};
use forage_core::{ForageConfig, GridWorld};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::clock::{Clock, FixedStep, WallClock};
use crate::events::{Event, EventBus, Topic};
use crate::simulation::{SessionSummary, Simulation};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub forage: ForageConfig,
    /// Seed of the session generator.
    pub seed: u64,
    /// Simulated milliseconds per step, and the tick period when paced.
    pub step_ms: u64,
    /// Number of steps [`Runtime::run`] performs.
    pub max_steps: u64,
    /// Advance in real time instead of as fast as possible.
    pub paced: bool,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            forage: ForageConfig::default(),
            seed: 0,
            step_ms: 50,
            max_steps: 2000,
            paced: false,
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates a foraging session
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    config: RuntimeConfig,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Runs the configured number of steps and returns the session summary.
    ///
    /// Paced runs tick every `step_ms` of wall time and advance the simulation
    /// by the time that really passed; otherwise every step advances exactly
    /// `step_ms`.
    pub async fn run(&self) -> Result<SessionSummary> {
        let step_ms = self.config.step_ms.max(1);
        info!(
            steps = self.config.max_steps,
            step_ms,
            paced = self.config.paced,
            "session started"
        );

        if self.config.paced {
            let mut interval = time::interval(Duration::from_millis(step_ms));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;
            let mut clock = WallClock::start();
            for _ in 0..self.config.max_steps {
                interval.tick().await;
                self.handle.step(clock.tick()).await?;
            }
        } else {
            let mut clock = FixedStep::new(step_ms);
            for _ in 0..self.config.max_steps {
                self.handle.step(clock.tick()).await?;
            }
        }

        let summary = self.handle.summary().await?;
        info!(
            steps = summary.steps,
            time_ms = summary.time_ms,
            "session finished"
        );
        Ok(summary)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<GridWorld>,
    roster: Option<Vec<MonsterSpec>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            roster: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the grid the session runs on (required)
    pub fn world(mut self, world: GridWorld) -> Self {
        self.world = Some(world);
        self
    }

    /// Monsters to release, in roster order.
    ///
    /// Defaults to [`Scenario::default_roster`].
    pub fn roster(mut self, roster: Vec<MonsterSpec>) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let roster = self.roster.unwrap_or_else(Scenario::default_roster);

        let simulation = Simulation::new(
            world,
            self.config.forage.clone(),
            &roster,
            self.config.seed,
        )?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(simulation, command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            config: self.config,
            sim_worker_handle,
        })
    }
}
