//! Simulation worker that owns the authoritative [`Simulation`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the simulation and publishes every resulting event to the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::api::Result;
use crate::events::{Event, EventBus};
use crate::simulation::{SessionSummary, Simulation};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance simulated time. Replies with the number of events published.
    Step {
        elapsed_ms: u64,
        reply: oneshot::Sender<Result<usize>>,
    },
    /// Snapshot of the session so far.
    Summary { reply: oneshot::Sender<SessionSummary> },
    /// Text map of the grid.
    Render { reply: oneshot::Sender<String> },
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    simulation: Simulation,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        simulation: Simulation,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            monsters = simulation.monsters().len(),
            size = simulation.world().size(),
            "SimulationWorker initialized"
        );

        Self {
            simulation,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every command sender is dropped.
    ///
    /// Setup events go out with the first step, so subscribers that attach
    /// before stepping see them.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(steps = self.simulation.steps(), "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Step { elapsed_ms, reply } => {
                let result = self.handle_step(elapsed_ms);
                if reply.send(result).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::Summary { reply } => {
                if reply.send(self.simulation.summary()).is_err() {
                    debug!("Summary reply channel closed (caller dropped)");
                }
            }
            Command::Render { reply } => {
                if reply.send(self.simulation.render_ascii()).is_err() {
                    debug!("Render reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_step(&mut self, elapsed_ms: u64) -> Result<usize> {
        let events = self.simulation.step(elapsed_ms).inspect_err(|err| {
            error!(
                time_ms = self.simulation.time_ms(),
                "simulation step failed: {err}"
            );
        })?;
        let count = events.len();
        self.publish(events);
        Ok(count)
    }

    fn publish(&self, events: Vec<Event>) {
        for event in events {
            self.event_bus.publish(event);
        }
    }
}
