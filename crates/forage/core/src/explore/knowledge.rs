//! A monster's private map of which cells it has found free or blocked.

use crate::state::{AgentState, Cell, Direction, GridWorld};

/// What a monster has learned about one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Knowledge {
    #[default]
    Unknown,
    Free,
    Blocked,
}

/// A monster's private map of the grid built from its own senses.
///
/// Classification is write-once: the first observation of a cell sticks, even
/// if the cell was only blocked by another monster at that moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeMap {
    size: u32,
    cells: Vec<Knowledge>,
}

impl KnowledgeMap {
    pub fn new(size: u32) -> Self {
        let len = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![Knowledge::Unknown; len],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let size = self.size as i32;
        if cell.x < 0 || cell.y < 0 || cell.x >= size || cell.y >= size {
            return None;
        }
        Some(cell.y as usize * self.size as usize + cell.x as usize)
    }

    /// Classification of `cell`, or `None` off the grid.
    pub fn get(&self, cell: Cell) -> Option<Knowledge> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Records an observation. Returns `true` if the cell was newly classified.
    pub fn observe(&mut self, cell: Cell, knowledge: Knowledge) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };
        if knowledge == Knowledge::Unknown || self.cells[index] != Knowledge::Unknown {
            return false;
        }
        self.cells[index] = knowledge;
        true
    }

    /// Senses the four neighbours of `agent` with its movement check and
    /// records its own cell as free. Returns the number of new classifications.
    pub fn sense(&mut self, agent: &AgentState, world: &GridWorld) -> usize {
        let origin = agent.position();
        let mut learned = usize::from(self.observe(origin, Knowledge::Free));

        for direction in Direction::PRIORITY {
            let knowledge = if agent.can_move(world, direction) {
                Knowledge::Free
            } else {
                Knowledge::Blocked
            };
            learned += usize::from(self.observe(origin.step(direction), knowledge));
        }
        learned
    }

    pub fn count(&self, knowledge: Knowledge) -> usize {
        self.cells.iter().filter(|cell| **cell == knowledge).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForageConfig;
    use crate::content::{RockKind, Terrain};
    use crate::state::AgentId;

    #[test]
    fn classification_is_write_once() {
        let mut map = KnowledgeMap::new(3);
        let cell = Cell::new(1, 1);

        assert!(map.observe(cell, Knowledge::Blocked));
        assert!(!map.observe(cell, Knowledge::Free));
        assert_eq!(map.get(cell), Some(Knowledge::Blocked));
        assert!(!map.observe(Cell::new(1, 2), Knowledge::Unknown));
    }

    #[test]
    fn off_grid_cells_are_ignored() {
        let mut map = KnowledgeMap::new(2);
        assert!(!map.observe(Cell::new(-1, 0), Knowledge::Free));
        assert_eq!(map.get(Cell::new(2, 0)), None);
    }

    #[test]
    fn sense_classifies_neighbours_and_own_cell() {
        let config = ForageConfig::default();
        let mut terrain = vec![Terrain::Grass; 9];
        terrain[5] = Terrain::Rock(RockKind::new(3));
        let mut world = GridWorld::with_terrain(3, terrain).unwrap();
        world.place_agent(AgentId(0), Cell::new(1, 1)).unwrap();
        let agent = AgentState::new(AgentId(0), Cell::new(1, 1), &config);

        let mut map = KnowledgeMap::new(3);
        assert_eq!(map.sense(&agent, &world), 5);
        assert_eq!(map.get(Cell::new(1, 1)), Some(Knowledge::Free));
        assert_eq!(map.get(Cell::new(1, 0)), Some(Knowledge::Free));
        assert_eq!(map.get(Cell::new(2, 1)), Some(Knowledge::Blocked));
        assert_eq!(map.get(Cell::new(0, 0)), Some(Knowledge::Unknown));
        assert_eq!(map.count(Knowledge::Unknown), 4);

        assert_eq!(map.sense(&agent, &world), 0);
    }

    #[test]
    fn neighbour_blocked_by_a_monster_stays_blocked_after_it_leaves() {
        let config = ForageConfig::default();
        let mut world = GridWorld::new(3).unwrap();
        world.place_agent(AgentId(0), Cell::new(1, 1)).unwrap();
        world.place_agent(AgentId(1), Cell::new(2, 1)).unwrap();
        let agent = AgentState::new(AgentId(0), Cell::new(1, 1), &config);

        let mut map = KnowledgeMap::new(3);
        map.sense(&agent, &world);
        assert_eq!(map.get(Cell::new(2, 1)), Some(Knowledge::Blocked));

        world.reserve_target(AgentId(1), Cell::new(2, 2)).unwrap();
        world
            .commit_agent(AgentId(1), Cell::new(2, 1), Cell::new(2, 2))
            .unwrap();
        assert!(agent.can_move(&world, Direction::East));

        assert_eq!(map.sense(&agent, &world), 0);
        assert_eq!(map.get(Cell::new(2, 1)), Some(Knowledge::Blocked));
    }
}
