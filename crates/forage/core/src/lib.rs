//! Deterministic decision engine for foraging monsters.
//!
//! `forage-core` defines the authoritative grid ([`GridWorld`]), the per-monster
//! resource and motion state machine ([`AgentState`]) and the exploration
//! machinery used by the smartest monsters: a [`KnowledgeMap`] of what has been
//! sensed, a [`ValueModel`] of learned food yields and the
//! [`ExplorationPlanner`] that turns both into a direction.
//!
//! The crate performs no I/O and never reads a wall clock. Time advances only
//! when a driver calls [`AgentState::advance`], and randomness is drawn through
//! [`RandomSource`] so every session can be replayed from its seed.
pub mod config;
pub mod content;
pub mod error;
pub mod explore;
pub mod rng;
pub mod state;

pub use config::{FoodSpec, FoodTable, ForageConfig, RewardPolicy};
pub use content::{CellContent, ContentMask, FoodType, ItemKind, RockKind, Terrain};
pub use error::{ConfigError, WorldError};
pub use explore::{
    DistanceField, ExplorationPlanner, FieldCell, Knowledge, KnowledgeMap, Plan, PlanTarget,
    ValueModel,
};
pub use rng::{PcgSource, RandomSource};
pub use state::{
    AgentEvent, AgentId, AgentState, Cell, Direction, EnergyChange, GridWorld, Meal, MoveOutcome,
    SpeedFactor,
};
