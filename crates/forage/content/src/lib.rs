//! World layouts, monster rosters and the loaders that read them from disk.
//!
//! - World files: a plain-text grid, one character per cell
//! - Engine configuration: TOML mapped onto [`forage_core::ForageConfig`]
//! - Scenarios: RON files naming the world and the monster roster
//!
//! Content is read once before a session starts and never changes afterwards.

pub mod scenario;
pub mod world;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{BrainKind, MonsterSpec, Scenario};
pub use world::{DEMO_WORLD, WorldParseError, parse_world, rock_variant};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, ScenarioLoader, WorldLoader};
