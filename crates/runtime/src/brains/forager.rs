use forage_content::BrainKind;
use forage_core::Direction;

use super::{Body, Brain, forage_here};
use crate::api::Result;

/// Walks greedily toward the nearest food it can smell.
///
/// The gap is closed East, West, North, South in that order, taking the first
/// direction that both reduces it and is legal. Blocked or with nothing in
/// range, the forager moves at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct Forager;

impl Brain for Forager {
    fn kind(&self) -> BrainKind {
        BrainKind::Forager
    }

    fn decide(&mut self, body: &mut Body<'_>) -> Result<()> {
        forage_here(body)?;

        let here = body.position();
        let nearest = body
            .smell()
            .into_iter()
            .min_by_key(|(cell, _)| cell.manhattan(here));

        let Some((target, _)) = nearest else {
            body.move_randomly()?;
            return Ok(());
        };

        let toward = [
            (here.x < target.x, Direction::East),
            (here.x > target.x, Direction::West),
            (here.y > target.y, Direction::North),
            (here.y < target.y, Direction::South),
        ]
        .into_iter()
        .find(|(closer, direction)| *closer && body.can_move(*direction));

        match toward {
            Some((_, direction)) => {
                body.move_in(direction)?;
            }
            None => {
                body.move_randomly()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brains::testing::Rig;
    use forage_core::{Cell, FoodType, GridWorld, RockKind, Terrain};

    #[test]
    fn heads_east_first() {
        let mut world = GridWorld::new(5).unwrap();
        world.place_food(Cell::new(4, 0), FoodType::Apple).unwrap();
        world.place_food(Cell::new(0, 4), FoodType::Melon).unwrap();
        let mut rig = Rig::new(world, Cell::new(2, 1));

        Forager.decide(&mut rig.body()).unwrap();

        assert_eq!(rig.agent.target_position(), Some(Cell::new(3, 1)));
    }

    #[test]
    fn goes_around_a_rock() {
        let mut terrain = vec![Terrain::Grass; 25];
        terrain[2 * 5 + 3] = Terrain::Rock(RockKind::new(2));
        let mut world = GridWorld::with_terrain(5, terrain).unwrap();
        world.place_food(Cell::new(4, 1), FoodType::Pear).unwrap();
        let mut rig = Rig::new(world, Cell::new(2, 2));

        Forager.decide(&mut rig.body()).unwrap();

        // East is blocked, so the forager closes the vertical gap instead.
        assert_eq!(rig.agent.target_position(), Some(Cell::new(2, 1)));
    }
}
