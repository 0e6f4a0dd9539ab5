use std::collections::{BTreeMap, BTreeSet};

use crate::config::FoodTable;
use crate::content::{CellContent, ContentMask, FoodType, ItemKind, Terrain};
use crate::error::WorldError;
use crate::rng::RandomSource;

use super::{AgentId, Cell};

/// Authoritative square grid shared by every monster.
///
/// Terrain is fixed at construction. Food, items, monster positions and move
/// reservations change only through the named mutation methods, so no reader
/// ever observes a half-updated cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWorld {
    size: u32,
    terrain: Vec<Terrain>,
    food: BTreeMap<Cell, FoodType>,
    items: BTreeMap<Cell, ItemKind>,
    agents: BTreeMap<Cell, AgentId>,
    reservations: BTreeMap<Cell, AgentId>,
}

impl GridWorld {
    /// Creates an all-grass world.
    pub fn new(size: u32) -> Result<Self, WorldError> {
        let cells = (size as usize) * (size as usize);
        Self::with_terrain(size, vec![Terrain::Grass; cells])
    }

    /// Creates a world from row-major terrain.
    pub fn with_terrain(size: u32, terrain: Vec<Terrain>) -> Result<Self, WorldError> {
        if size == 0 {
            return Err(WorldError::EmptyGrid);
        }
        let expected = (size as usize) * (size as usize);
        if terrain.len() != expected {
            return Err(WorldError::TerrainSize {
                expected,
                actual: terrain.len(),
            });
        }

        Ok(Self {
            size,
            terrain,
            food: BTreeMap::new(),
            items: BTreeMap::new(),
            agents: BTreeMap::new(),
            reservations: BTreeMap::new(),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let size = self.size as i32;
        if cell.x < 0 || cell.y < 0 || cell.x >= size || cell.y >= size {
            return None;
        }
        Some(cell.y as usize * self.size as usize + cell.x as usize)
    }

    fn ensure_in_bounds(&self, cell: Cell) -> Result<(), WorldError> {
        if self.is_in_bounds(cell) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Cell::new(x, y)))
    }

    pub fn terrain_at(&self, cell: Cell) -> Option<Terrain> {
        self.index(cell).map(|index| self.terrain[index])
    }

    /// Merged content of a cell, or `None` off the grid.
    ///
    /// When several things share a cell the report follows the precedence
    /// obstacle, water, monster, reservation, food, item.
    pub fn content_at(&self, cell: Cell) -> Option<CellContent> {
        let terrain = self.terrain_at(cell)?;
        let content = match terrain {
            Terrain::Rock(kind) => CellContent::Obstacle(kind),
            Terrain::Pond => CellContent::Water,
            Terrain::Grass => {
                if let Some(agent) = self.agents.get(&cell) {
                    CellContent::AgentOccupied(*agent)
                } else if let Some(agent) = self.reservations.get(&cell) {
                    CellContent::AgentTarget(*agent)
                } else if let Some(food) = self.food.get(&cell) {
                    CellContent::Food(*food)
                } else if let Some(item) = self.items.get(&cell) {
                    CellContent::Item(*item)
                } else {
                    CellContent::Empty
                }
            }
        };
        Some(content)
    }

    /// Categories present on a cell. Overlapping facts are all reported.
    pub fn mask_at(&self, cell: Cell) -> ContentMask {
        let Some(terrain) = self.terrain_at(cell) else {
            return ContentMask::empty();
        };

        let mut mask = match terrain {
            Terrain::Grass => ContentMask::empty(),
            Terrain::Rock(_) => ContentMask::OBSTACLE,
            Terrain::Pond => ContentMask::WATER,
        };
        mask.set(ContentMask::AGENT, self.agents.contains_key(&cell));
        mask.set(ContentMask::TARGET, self.reservations.contains_key(&cell));
        mask.set(ContentMask::FOOD, self.food.contains_key(&cell));
        mask.set(ContentMask::ITEM, self.items.contains_key(&cell));
        mask
    }

    /// Cells matching any category in `filter`, in row-major order.
    pub fn occupied_cells(&self, filter: ContentMask) -> BTreeSet<Cell> {
        let mut cells = BTreeSet::new();

        if filter.intersects(ContentMask::OBSTACLE | ContentMask::WATER) {
            cells.extend(self.cells().filter(|cell| match self.terrain_at(*cell) {
                Some(Terrain::Rock(_)) => filter.contains(ContentMask::OBSTACLE),
                Some(Terrain::Pond) => filter.contains(ContentMask::WATER),
                _ => false,
            }));
        }
        if filter.contains(ContentMask::FOOD) {
            cells.extend(self.food.keys().copied());
        }
        if filter.contains(ContentMask::ITEM) {
            cells.extend(self.items.keys().copied());
        }
        if filter.contains(ContentMask::AGENT) {
            cells.extend(self.agents.keys().copied());
        }
        if filter.contains(ContentMask::TARGET) {
            cells.extend(self.reservations.keys().copied());
        }
        cells
    }

    /// Cells that can receive a new spawn: grass with nothing on it.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells()
            .filter(|cell| !self.mask_at(*cell).intersects(ContentMask::SPAWN_BLOCKING))
            .collect()
    }

    pub fn random_empty_cell<R>(&self, rng: &mut R) -> Option<Cell>
    where
        R: RandomSource + ?Sized,
    {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.below(empty.len())])
    }

    pub fn food_at(&self, cell: Cell) -> Option<FoodType> {
        self.food.get(&cell).copied()
    }

    pub fn item_at(&self, cell: Cell) -> Option<ItemKind> {
        self.items.get(&cell).copied()
    }

    pub fn agent_at(&self, cell: Cell) -> Option<AgentId> {
        self.agents.get(&cell).copied()
    }

    pub fn food(&self) -> impl Iterator<Item = (Cell, FoodType)> + '_ {
        self.food.iter().map(|(cell, food)| (*cell, *food))
    }

    pub fn items(&self) -> impl Iterator<Item = (Cell, ItemKind)> + '_ {
        self.items.iter().map(|(cell, item)| (*cell, *item))
    }

    pub fn food_count(&self) -> usize {
        self.food.len()
    }

    /// Food within Manhattan `radius` of `position`, regardless of whether it
    /// can be reached. Ordered row-major.
    pub fn nearby_food(&self, position: Cell, radius: u32) -> Vec<(Cell, FoodType)> {
        self.food()
            .filter(|(cell, _)| cell.manhattan(position) <= radius)
            .collect()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn place_food(&mut self, cell: Cell, food: FoodType) -> Result<(), WorldError> {
        self.ensure_spawnable(cell)?;
        self.food.insert(cell, food);
        Ok(())
    }

    pub fn remove_food(&mut self, cell: Cell) -> Result<FoodType, WorldError> {
        self.food.remove(&cell).ok_or(WorldError::NoFood { cell })
    }

    /// Places food of a type drawn from `table` on a random empty cell.
    ///
    /// Returns `None` when the grid has no empty cell left.
    pub fn spawn_food<R>(&mut self, rng: &mut R, table: &FoodTable) -> Option<(Cell, FoodType)>
    where
        R: RandomSource + ?Sized,
    {
        let food = table.select(rng.unit());
        let cell = self.random_empty_cell(rng)?;
        self.food.insert(cell, food);
        Some((cell, food))
    }

    pub fn place_item(&mut self, cell: Cell, item: ItemKind) -> Result<(), WorldError> {
        self.ensure_spawnable(cell)?;
        self.items.insert(cell, item);
        Ok(())
    }

    pub fn remove_item(&mut self, cell: Cell) -> Result<ItemKind, WorldError> {
        self.items.remove(&cell).ok_or(WorldError::NoItem { cell })
    }

    /// Puts a monster on the grid. Food and items may share its cell.
    pub fn place_agent(&mut self, agent: AgentId, cell: Cell) -> Result<(), WorldError> {
        self.ensure_enterable(cell)?;
        self.agents.insert(cell, agent);
        Ok(())
    }

    /// Claims `cell` for a monster about to animate into it.
    ///
    /// Water is accepted here: whether a monster may swim is decided by the
    /// monster before it asks for the reservation.
    pub fn reserve_target(&mut self, agent: AgentId, cell: Cell) -> Result<(), WorldError> {
        self.ensure_in_bounds(cell)?;
        let mask = self.mask_at(cell);
        if mask.intersects(ContentMask::OBSTACLE | ContentMask::AGENT | ContentMask::TARGET) {
            return Err(WorldError::Blocked { cell });
        }
        self.reservations.insert(cell, agent);
        Ok(())
    }

    pub fn release_target(&mut self, agent: AgentId, cell: Cell) -> Result<(), WorldError> {
        match self.reservations.get(&cell) {
            Some(owner) if *owner == agent => {
                self.reservations.remove(&cell);
                Ok(())
            }
            _ => Err(WorldError::NotReserved { agent, cell }),
        }
    }

    /// Completes a move: the monster leaves `from`, its reservation on `to`
    /// is released and it occupies `to`.
    pub fn commit_agent(&mut self, agent: AgentId, from: Cell, to: Cell) -> Result<(), WorldError> {
        match self.agents.get(&from) {
            Some(occupant) if *occupant == agent => {}
            _ => return Err(WorldError::AgentNotFound { agent, cell: from }),
        }
        self.release_target(agent, to)?;
        self.agents.remove(&from);
        self.agents.insert(to, agent);
        Ok(())
    }

    fn ensure_spawnable(&self, cell: Cell) -> Result<(), WorldError> {
        self.ensure_in_bounds(cell)?;
        if self.mask_at(cell).intersects(ContentMask::SPAWN_BLOCKING) {
            return Err(WorldError::NotEmpty { cell });
        }
        Ok(())
    }

    fn ensure_enterable(&self, cell: Cell) -> Result<(), WorldError> {
        self.ensure_in_bounds(cell)?;
        if self.mask_at(cell).intersects(ContentMask::BLOCKING) {
            return Err(WorldError::Blocked { cell });
        }
        Ok(())
    }
}
