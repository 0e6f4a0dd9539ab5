use forage_content::BrainKind;
use forage_core::{ExplorationPlanner, KnowledgeMap, RewardPolicy, ValueModel};
use tracing::debug;

use super::{Body, Brain, forage_here};
use crate::api::Result;

/// Builds its own map of the grid, learns what each food is worth and plans
/// paths with the [`ExplorationPlanner`].
#[derive(Clone, Debug)]
pub struct Explorer {
    knowledge: KnowledgeMap,
    values: ValueModel,
    planner: ExplorationPlanner,
}

impl Explorer {
    pub fn new(world_size: u32, policy: RewardPolicy) -> Self {
        Self {
            knowledge: KnowledgeMap::new(world_size),
            values: ValueModel::new(),
            planner: ExplorationPlanner::new(policy),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeMap {
        &self.knowledge
    }

    pub fn values(&self) -> &ValueModel {
        &self.values
    }
}

impl Brain for Explorer {
    fn kind(&self) -> BrainKind {
        BrainKind::Explorer
    }

    fn decide(&mut self, body: &mut Body<'_>) -> Result<()> {
        if body.is_on_food()
            && let Some(meal) = body.eat_food()?
        {
            self.values.record(meal.food, f64::from(meal.gain));
        }
        forage_here(body)?;

        self.knowledge.sense(body.state(), body.world());

        let smell = body.smell();
        let plan = self
            .planner
            .plan(body.position(), &self.knowledge, &self.values, &smell);

        match plan {
            Some(plan) if body.can_move(plan.direction) => {
                debug!(monster = %body.id(), ?plan, "following plan");
                body.move_in(plan.direction)?;
            }
            _ => {
                debug!(monster = %body.id(), "no usable plan, moving at random");
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
    use forage_core::{Cell, FoodType, GridWorld, Knowledge};

    #[test]
    fn records_realised_gain() {
        let mut world = GridWorld::new(4).unwrap();
        world.place_food(Cell::new(1, 1), FoodType::Melon).unwrap();
        let mut rig = Rig::new(world, Cell::new(1, 1));
        rig.agent = rig.agent.clone().with_energy(40, &rig.config);
        let mut explorer = Explorer::new(4, RewardPolicy::Nearest);

        explorer.decide(&mut rig.body()).unwrap();

        assert_eq!(explorer.values().value_of(FoodType::Melon), 10.0);
        assert_eq!(rig.stats.meals, 1);
    }

    #[test]
    fn senses_before_planning() {
        let world = GridWorld::new(5).unwrap();
        let mut rig = Rig::new(world, Cell::new(2, 2));
        let mut explorer = Explorer::new(5, RewardPolicy::Nearest);

        explorer.decide(&mut rig.body()).unwrap();

        let knowledge = explorer.knowledge();
        assert_eq!(knowledge.get(Cell::new(2, 2)), Some(Knowledge::Free));
        for cell in [(2, 1), (3, 2), (1, 2), (2, 3)] {
            assert_eq!(
                knowledge.get(Cell::new(cell.0, cell.1)),
                Some(Knowledge::Free)
            );
        }
        // Every neighbour is a frontier at distance 2; row-major order picks north.
        assert_eq!(rig.agent.target_position(), Some(Cell::new(2, 1)));
    }

    #[test]
    fn ignores_food_beyond_known_cells() {
        let mut world = GridWorld::new(5).unwrap();
        world.place_food(Cell::new(2, 4), FoodType::Pear).unwrap();
        let mut rig = Rig::new(world, Cell::new(2, 2));
        let mut explorer = Explorer::new(5, RewardPolicy::Nearest);

        explorer.decide(&mut rig.body()).unwrap();

        // The food sits on unexplored cells, so the frontier is the only target.
        assert_eq!(rig.agent.target_position(), Some(Cell::new(2, 1)));
    }
}
