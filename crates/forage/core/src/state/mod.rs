//! Authoritative simulation state.
//!
//! [`GridWorld`] is the single shared resource; each monster owns its
//! [`AgentState`] and mutates the grid only through the named operations.
mod agent;
mod common;
mod world;

pub use agent::{
    AgentEvent, AgentState, CarriedItem, EnergyChange, MAX_CARRIED_ITEMS, Meal, MoveOutcome,
    SpeedFactor,
};
pub use common::{AgentId, Cell, Direction};
pub use world::GridWorld;
