use forage_content::BrainKind;

use super::{Body, Brain, forage_here};
use crate::api::Result;

/// Eats what it finds and otherwise strolls at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wanderer;

impl Brain for Wanderer {
    fn kind(&self) -> BrainKind {
        BrainKind::Wanderer
    }

    fn decide(&mut self, body: &mut Body<'_>) -> Result<()> {
        forage_here(body)?;
        body.move_randomly()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brains::testing::Rig;
    use crate::events::SimEvent;
    use forage_core::{Cell, FoodType, GridWorld, RockKind, Terrain};

    #[test]
    fn eats_then_moves() {
        let mut world = GridWorld::new(3).unwrap();
        world.place_food(Cell::new(1, 1), FoodType::Berry).unwrap();
        let mut rig = Rig::new(world, Cell::new(1, 1));

        Wanderer.decide(&mut rig.body()).unwrap();

        assert_eq!(rig.stats.meals, 1);
        assert!(rig.agent.is_moving());
        assert!(
            rig.outbox
                .iter()
                .any(|event| matches!(event, SimEvent::MoveStarted { .. }))
        );
    }

    #[test]
    fn rests_when_boxed_in() {
        let mut terrain = vec![Terrain::Rock(RockKind::new(1)); 9];
        terrain[4] = Terrain::Grass;
        let world = GridWorld::with_terrain(3, terrain).unwrap();
        let mut rig = Rig::new(world, Cell::new(1, 1));
        rig.agent.take_decision_request();

        Wanderer.decide(&mut rig.body()).unwrap();

        assert!(rig.agent.is_resting());
        assert_eq!(rig.agent.energy(), rig.config.energy_max);
        assert!(matches!(rig.outbox.as_slice(), [SimEvent::Idled { .. }]));
    }
}
