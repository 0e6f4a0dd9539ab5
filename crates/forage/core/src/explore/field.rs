//! Breadth-first distance waves over a monster's known free cells.

use std::collections::VecDeque;

use crate::state::Cell;

use super::{Knowledge, KnowledgeMap};

/// Value of one cell in a [`DistanceField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCell {
    /// Known to be impassable.
    Blocked,
    /// Never sensed; the wave does not enter it.
    Unknown,
    /// Known free but not connected to the origin through known free cells.
    Unreached,
    /// Wave number, 1 at the origin.
    Distance(u32),
}

/// Lee-style wave expansion over a monster's knowledge.
///
/// Built fresh for every planning call and dropped afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    size: u32,
    origin: Cell,
    cells: Vec<FieldCell>,
}

impl DistanceField {
    /// Expands waves from `origin` through known free cells.
    ///
    /// The origin is seeded with 1 whatever the map says about it.
    pub fn build(knowledge: &KnowledgeMap, origin: Cell) -> Self {
        let size = knowledge.size();
        let len = (size as usize) * (size as usize);
        let mut field = Self {
            size,
            origin,
            cells: Vec::with_capacity(len),
        };

        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let cell = match knowledge.get(Cell::new(x, y)) {
                    Some(Knowledge::Free) => FieldCell::Unreached,
                    Some(Knowledge::Blocked) => FieldCell::Blocked,
                    Some(Knowledge::Unknown) | None => FieldCell::Unknown,
                };
                field.cells.push(cell);
            }
        }

        let Some(index) = field.index(origin) else {
            return field;
        };
        field.cells[index] = FieldCell::Distance(1);

        let mut queue = VecDeque::from([(origin, 1u32)]);
        while let Some((current, distance)) = queue.pop_front() {
            for (_, next) in current.neighbors() {
                let Some(index) = field.index(next) else {
                    continue;
                };
                if field.cells[index] == FieldCell::Unreached {
                    field.cells[index] = FieldCell::Distance(distance + 1);
                    queue.push_back((next, distance + 1));
                }
            }
        }

        field
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let size = self.size as i32;
        if cell.x < 0 || cell.y < 0 || cell.x >= size || cell.y >= size {
            return None;
        }
        Some(cell.y as usize * self.size as usize + cell.x as usize)
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn get(&self, cell: Cell) -> Option<FieldCell> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Wave number of `cell`, if the wave reached it.
    pub fn distance(&self, cell: Cell) -> Option<u32> {
        match self.get(cell)? {
            FieldCell::Distance(distance) => Some(distance),
            _ => None,
        }
    }

    /// Reached cells other than the origin, row-major.
    pub fn reached(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        let size = self.size as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| match cell {
                FieldCell::Distance(distance) if *distance > 1 => {
                    Some((Cell::new((index % size) as i32, (index / size) as i32), *distance))
                }
                _ => None,
            })
    }

    /// Closest reached cell next to at least one unknown cell.
    ///
    /// Ties go to the first cell in row-major order.
    pub fn nearest_frontier(&self) -> Option<(Cell, u32)> {
        let mut best: Option<(Cell, u32)> = None;
        for (cell, distance) in self.reached() {
            let borders_unknown = cell
                .neighbors()
                .any(|(_, next)| self.get(next) == Some(FieldCell::Unknown));
            if !borders_unknown {
                continue;
            }
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((cell, distance));
            }
        }
        best
    }

    /// The cell adjacent to the origin on a shortest path to `target`.
    ///
    /// Walks back from `target` one wave at a time, taking the first
    /// neighbour in direction priority order. Returns `None` if the target
    /// was not reached or is the origin itself.
    pub fn step_toward(&self, target: Cell) -> Option<Cell> {
        let mut distance = self.distance(target)?;
        if distance < 2 {
            return None;
        }

        let mut current = target;
        while distance > 2 {
            let (_, previous) = current
                .neighbors()
                .find(|(_, next)| self.distance(*next) == Some(distance - 1))?;
            current = previous;
            distance -= 1;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_map(size: u32) -> KnowledgeMap {
        let mut map = KnowledgeMap::new(size);
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                map.observe(Cell::new(x, y), Knowledge::Free);
            }
        }
        map
    }

    #[test]
    fn origin_is_one_and_waves_grow_by_manhattan_distance() {
        let field = DistanceField::build(&open_map(4), Cell::new(1, 1));
        assert_eq!(field.distance(Cell::new(1, 1)), Some(1));
        assert_eq!(field.distance(Cell::new(1, 0)), Some(2));
        assert_eq!(field.distance(Cell::new(3, 3)), Some(5));
    }

    #[test]
    fn every_reached_cell_has_a_predecessor() {
        let mut map = KnowledgeMap::new(5);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (4, 4)] {
            map.observe(Cell::new(x, y), Knowledge::Free);
        }
        map.observe(Cell::new(1, 1), Knowledge::Blocked);
        let field = DistanceField::build(&map, Cell::new(0, 0));

        for (cell, distance) in field.reached() {
            assert!(
                cell.neighbors()
                    .any(|(_, next)| field.distance(next) == Some(distance - 1)),
                "{cell} at {distance} has no predecessor"
            );
        }
        assert_eq!(field.distance(Cell::new(1, 2)), Some(6));
        assert_eq!(field.get(Cell::new(4, 4)), Some(FieldCell::Unreached));
        assert_eq!(field.get(Cell::new(1, 1)), Some(FieldCell::Blocked));
        assert_eq!(field.get(Cell::new(3, 3)), Some(FieldCell::Unknown));
    }

    #[test]
    fn unknown_cells_stop_the_wave() {
        let mut map = KnowledgeMap::new(3);
        map.observe(Cell::new(0, 0), Knowledge::Free);
        map.observe(Cell::new(2, 0), Knowledge::Free);
        let field = DistanceField::build(&map, Cell::new(0, 0));
        assert_eq!(field.distance(Cell::new(2, 0)), None);
    }

    #[test]
    fn frontier_prefers_nearest_then_row_major() {
        let mut map = KnowledgeMap::new(3);
        for (x, y) in [(1, 1), (1, 0), (0, 1), (2, 1), (1, 2)] {
            map.observe(Cell::new(x, y), Knowledge::Free);
        }
        let field = DistanceField::build(&map, Cell::new(1, 1));
        assert_eq!(field.nearest_frontier(), Some((Cell::new(1, 0), 2)));
    }

    #[test]
    fn fully_known_map_has_no_frontier() {
        let field = DistanceField::build(&open_map(3), Cell::new(0, 0));
        assert_eq!(field.nearest_frontier(), None);
    }

    #[test]
    fn step_toward_follows_priority_order() {
        let field = DistanceField::build(&open_map(3), Cell::new(1, 1));
        // (2, 2) is reachable through (2, 1) and (1, 2); north of it wins.
        assert_eq!(field.step_toward(Cell::new(2, 2)), Some(Cell::new(2, 1)));
        assert_eq!(field.step_toward(Cell::new(1, 0)), Some(Cell::new(1, 0)));
        assert_eq!(field.step_toward(Cell::new(1, 1)), None);
    }
}
