//! Error types for forage-core.
//!
//! Routine conditions of the simulation (probing off the grid, bumping into a
//! rock, running out of energy, having nowhere to go) are *not* errors: they
//! are reported as outcome values such as [`MoveOutcome`](crate::MoveOutcome)
//! or `None`. The types here cover misuse by the driver and invalid
//! configuration, both of which the caller should surface before the
//! simulation runs.

use crate::content::FoodType;
use crate::state::{AgentId, Cell};

/// Rejected mutation of the shared grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("grid size must be positive")]
    EmptyGrid,

    #[error("terrain has {actual} cells, expected {expected}")]
    TerrainSize { expected: usize, actual: usize },

    #[error("cell {cell} is outside the {size}x{size} grid")]
    OutOfBounds { cell: Cell, size: u32 },

    #[error("cell {cell} is not empty")]
    NotEmpty { cell: Cell },

    #[error("cell {cell} is blocked")]
    Blocked { cell: Cell },

    #[error("cell {cell} holds no food")]
    NoFood { cell: Cell },

    #[error("cell {cell} holds no item")]
    NoItem { cell: Cell },

    #[error("agent {agent} is not at {cell}")]
    AgentNotFound { agent: AgentId, cell: Cell },

    #[error("cell {cell} is not reserved by agent {agent}")]
    NotReserved { agent: AgentId, cell: Cell },
}

/// Invalid engine configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("spawn probability for {food} is {value}, expected a value in [0, 1]")]
    InvalidProbability { food: FoodType, value: f64 },

    #[error("spawn probabilities sum to {sum}, expected 1")]
    ProbabilitySum { sum: f64 },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("critical energy level {critical} must be below the maximum {max}")]
    CriticalAboveMax { critical: u32, max: u32 },

    #[error("slow speed must be within 1..=100 percent, got {0}")]
    SlowSpeed(u32),
}
