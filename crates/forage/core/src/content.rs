//! Closed vocabularies for what a grid cell can hold.
//!
//! Terrain is fixed when the world is built. Food, items and monsters come and
//! go while the simulation runs; [`CellContent`] is the merged view reported
//! by [`GridWorld::content_at`](crate::GridWorld::content_at).

use bitflags::bitflags;

use crate::state::AgentId;

/// Kinds of food that can spawn on the grid, in spawn-table order.
///
/// The declaration order is significant: the spawn draw partitions `[0, 1)`
/// into consecutive intervals following it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum FoodType {
    Berry,
    Apple,
    Pear,
    Melon,
}

/// Pickable items. Only one exists per world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    /// Lets its carrier enter water cells.
    RubberRing,
}

impl ItemKind {
    pub fn grants_swimming(self) -> bool {
        matches!(self, ItemKind::RubberRing)
    }
}

/// Boulder variant. Cosmetic only; every rock blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RockKind(u8);

impl RockKind {
    pub const VARIANTS: u8 = 4;

    /// Creates a rock variant, wrapping into `1..=VARIANTS`.
    pub fn new(variant: u8) -> Self {
        Self(variant.saturating_sub(1) % Self::VARIANTS + 1)
    }

    pub fn variant(self) -> u8 {
        self.0
    }
}

/// Static terrain of a cell, fixed for the lifetime of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Grass,
    Rock(RockKind),
    Pond,
}

/// Merged, exclusive view of a cell at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    Obstacle(RockKind),
    Water,
    Food(FoodType),
    Item(ItemKind),
    AgentOccupied(AgentId),
    /// Reserved by a monster that is animating into the cell.
    AgentTarget(AgentId),
}

impl CellContent {
    /// The mask bit this content belongs to, or empty for [`CellContent::Empty`].
    pub fn mask(self) -> ContentMask {
        match self {
            CellContent::Empty => ContentMask::empty(),
            CellContent::Obstacle(_) => ContentMask::OBSTACLE,
            CellContent::Water => ContentMask::WATER,
            CellContent::Food(_) => ContentMask::FOOD,
            CellContent::Item(_) => ContentMask::ITEM,
            CellContent::AgentOccupied(_) => ContentMask::AGENT,
            CellContent::AgentTarget(_) => ContentMask::TARGET,
        }
    }
}

bitflags! {
    /// Selects categories for [`GridWorld::occupied_cells`](crate::GridWorld::occupied_cells).
    ///
    /// Unlike [`CellContent`], categories overlap: a cell can hold food and a
    /// monster at the same time, and matches the mask if any selected category
    /// is present.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ContentMask: u8 {
        const OBSTACLE = 1 << 0;
        const WATER    = 1 << 1;
        const FOOD     = 1 << 2;
        const ITEM     = 1 << 3;
        const AGENT    = 1 << 4;
        const TARGET   = 1 << 5;

        /// Everything a monster without a swim item cannot enter.
        const BLOCKING = Self::OBSTACLE.bits()
            | Self::WATER.bits()
            | Self::AGENT.bits()
            | Self::TARGET.bits();

        /// Everything that disqualifies a cell from receiving a new spawn.
        const SPAWN_BLOCKING = Self::BLOCKING.bits() | Self::FOOD.bits() | Self::ITEM.bits();
    }
}
