//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the world and executes stepping commands.

mod simulation;

pub use simulation::{Command, SimulationWorker};
