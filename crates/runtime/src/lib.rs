//! Runtime orchestration for foraging sessions.
//!
//! This crate wires the deterministic engine from `forage-core` into a
//! steppable [`Simulation`], gives every monster a [`Brain`], and runs the
//! whole thing behind a worker task. Consumers embed [`Runtime`] to drive a
//! session, subscribe to events, and query summaries through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`simulation`] owns the world and steps every monster
//! - [`brains`] holds the decision logic of each kind of monster
//! - [`clock`] turns wall or fixed time into simulated milliseconds
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod brains;
pub mod clock;
pub mod events;
pub mod rng;
pub mod runtime;
pub mod simulation;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use brains::{Body, Brain, Explorer, Forager, Wanderer, brain_for};
pub use clock::{Clock, FixedStep, WallClock};
pub use events::{Event, EventBus, SimEvent, Topic};
pub use rng::SimRng;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use simulation::{Monster, MonsterReport, MonsterStats, SessionSummary, Simulation};
