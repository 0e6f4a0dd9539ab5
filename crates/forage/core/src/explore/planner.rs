//! Picks the next direction from knowledge, learned values and smell.

use crate::config::RewardPolicy;
use crate::content::FoodType;
use crate::state::{Cell, Direction};

use super::{DistanceField, Knowledge, KnowledgeMap, ValueModel};

/// What a plan is heading for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanTarget {
    /// An adjacent cell that has never been sensed.
    Sense { cell: Cell },
    Food { cell: Cell, food: FoodType },
    /// The closest known cell bordering unexplored territory.
    Frontier { cell: Cell },
}

/// Direction chosen by the planner and the reason for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    pub direction: Direction,
    pub target: PlanTarget,
    /// Moves from the monster to the target along known free cells.
    pub steps: u32,
}

/// Turns a monster's knowledge into its next direction.
///
/// Stateless apart from the reward policy: the distance field is rebuilt on
/// every call, so identical inputs always produce identical plans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExplorationPlanner {
    policy: RewardPolicy,
}

impl ExplorationPlanner {
    pub fn new(policy: RewardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RewardPolicy {
        self.policy
    }

    /// Chooses a direction, or `None` when nothing known is worth reaching.
    ///
    /// `smell` lists food within the smell radius; food the monster cannot
    /// reach through known free cells is ignored.
    pub fn plan(
        &self,
        origin: Cell,
        knowledge: &KnowledgeMap,
        values: &ValueModel,
        smell: &[(Cell, FoodType)],
    ) -> Option<Plan> {
        for (direction, cell) in origin.neighbors() {
            if knowledge.get(cell) == Some(Knowledge::Unknown) {
                return Some(Plan {
                    direction,
                    target: PlanTarget::Sense { cell },
                    steps: 1,
                });
            }
        }

        let field = DistanceField::build(knowledge, origin);
        let reward = self.select_reward(&field, values, smell);
        let frontier = field.nearest_frontier();

        let (target, distance) = match (reward, frontier) {
            (Some((cell, food, reward_distance)), Some((frontier_cell, frontier_distance))) => {
                if frontier_distance < reward_distance {
                    (PlanTarget::Frontier { cell: frontier_cell }, frontier_distance)
                } else {
                    (PlanTarget::Food { cell, food }, reward_distance)
                }
            }
            (Some((cell, food, distance)), None) => (PlanTarget::Food { cell, food }, distance),
            (None, Some((cell, distance))) => (PlanTarget::Frontier { cell }, distance),
            (None, None) => return None,
        };

        let goal = match target {
            PlanTarget::Sense { cell }
            | PlanTarget::Food { cell, .. }
            | PlanTarget::Frontier { cell } => cell,
        };
        let next = field.step_toward(goal)?;
        let direction = Direction::between(origin, next)?;

        Some(Plan {
            direction,
            target,
            steps: distance - 1,
        })
    }

    fn select_reward(
        &self,
        field: &DistanceField,
        values: &ValueModel,
        smell: &[(Cell, FoodType)],
    ) -> Option<(Cell, FoodType, u32)> {
        let reachable = smell.iter().filter_map(|(cell, food)| {
            field
                .distance(*cell)
                .filter(|distance| *distance > 1)
                .map(|distance| (*cell, *food, distance))
        });

        match self.policy {
            RewardPolicy::Nearest => reachable.min_by(|a, b| (a.2, a.0).cmp(&(b.2, b.0))),
            RewardPolicy::MostValuable => reachable.min_by(|a, b| {
                values
                    .value_of(b.1)
                    .total_cmp(&values.value_of(a.1))
                    .then_with(|| a.2.cmp(&b.2))
                    .then_with(|| a.0.cmp(&b.0))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explored(size: u32) -> KnowledgeMap {
        let mut map = KnowledgeMap::new(size);
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                map.observe(Cell::new(x, y), Knowledge::Free);
            }
        }
        map
    }

    #[test]
    fn unknown_neighbour_is_sensed_north_first() {
        let planner = ExplorationPlanner::default();
        let map = KnowledgeMap::new(5);
        let plan = planner
            .plan(Cell::new(2, 2), &map, &ValueModel::new(), &[])
            .unwrap();
        assert_eq!(plan.direction, Direction::North);
        assert_eq!(
            plan.target,
            PlanTarget::Sense {
                cell: Cell::new(2, 1)
            }
        );
    }

    #[test]
    fn sense_order_skips_known_neighbours() {
        let planner = ExplorationPlanner::default();
        let mut map = KnowledgeMap::new(5);
        map.observe(Cell::new(2, 1), Knowledge::Blocked);
        map.observe(Cell::new(3, 2), Knowledge::Free);
        let plan = planner
            .plan(Cell::new(2, 2), &map, &ValueModel::new(), &[])
            .unwrap();
        assert_eq!(plan.direction, Direction::West);
    }

    #[test]
    fn nearest_food_is_approached() {
        let planner = ExplorationPlanner::default();
        let map = explored(5);
        let smell = [
            (Cell::new(4, 4), FoodType::Melon),
            (Cell::new(0, 2), FoodType::Berry),
        ];
        let plan = planner
            .plan(Cell::new(2, 2), &map, &ValueModel::new(), &smell)
            .unwrap();
        assert_eq!(plan.direction, Direction::West);
        assert_eq!(plan.steps, 2);
        assert_eq!(
            plan.target,
            PlanTarget::Food {
                cell: Cell::new(0, 2),
                food: FoodType::Berry
            }
        );
    }

    #[test]
    fn most_valuable_policy_prefers_learned_value() {
        let planner = ExplorationPlanner::new(RewardPolicy::MostValuable);
        let map = explored(5);
        let mut values = ValueModel::new();
        values.record(FoodType::Melon, 20.0);
        values.record(FoodType::Berry, 5.0);
        let smell = [
            (Cell::new(4, 4), FoodType::Melon),
            (Cell::new(0, 2), FoodType::Berry),
        ];
        let plan = planner.plan(Cell::new(2, 2), &map, &values, &smell).unwrap();
        assert_eq!(
            plan.target,
            PlanTarget::Food {
                cell: Cell::new(4, 4),
                food: FoodType::Melon
            }
        );
        assert_eq!(plan.direction, Direction::East);
    }

    #[test]
    fn food_under_the_monster_is_ignored() {
        let planner = ExplorationPlanner::default();
        let map = explored(3);
        let smell = [(Cell::new(1, 1), FoodType::Apple)];
        assert_eq!(
            planner.plan(Cell::new(1, 1), &map, &ValueModel::new(), &smell),
            None
        );
    }

    #[test]
    fn unreachable_food_falls_back_to_frontier() {
        let planner = ExplorationPlanner::default();
        let mut map = KnowledgeMap::new(4);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (2, 1)] {
            map.observe(Cell::new(x, y), Knowledge::Free);
        }
        map.observe(Cell::new(0, 2), Knowledge::Blocked);
        map.observe(Cell::new(1, 2), Knowledge::Blocked);
        let smell = [(Cell::new(3, 3), FoodType::Pear)];

        let plan = planner
            .plan(Cell::new(0, 0), &map, &ValueModel::new(), &smell)
            .unwrap();
        assert_eq!(
            plan.target,
            PlanTarget::Frontier {
                cell: Cell::new(1, 0)
            }
        );
        assert_eq!(plan.direction, Direction::East);
    }

    #[test]
    fn reward_wins_a_distance_tie_with_frontier() {
        let planner = ExplorationPlanner::default();
        let mut map = KnowledgeMap::new(4);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (2, 0), (1, 1)] {
            map.observe(Cell::new(x, y), Knowledge::Free);
        }
        // (0, 1) borders unknown (0, 2) at distance 2; food at (1, 0) is also 2 away.
        let smell = [(Cell::new(1, 0), FoodType::Apple)];
        let plan = planner
            .plan(Cell::new(0, 0), &map, &ValueModel::new(), &smell)
            .unwrap();
        assert!(matches!(plan.target, PlanTarget::Food { .. }));
        assert_eq!(plan.direction, Direction::East);
    }

    #[test]
    fn fully_known_map_without_food_yields_nothing() {
        let planner = ExplorationPlanner::default();
        assert_eq!(
            planner.plan(Cell::new(0, 0), &explored(4), &ValueModel::new(), &[]),
            None
        );
    }

    #[test]
    fn identical_inputs_give_identical_plans() {
        let planner = ExplorationPlanner::default();
        let mut map = KnowledgeMap::new(6);
        for (x, y) in [(2, 2), (2, 1), (1, 2), (3, 2), (2, 3), (3, 3), (4, 3)] {
            map.observe(Cell::new(x, y), Knowledge::Free);
        }
        map.observe(Cell::new(3, 1), Knowledge::Blocked);
        let smell = [(Cell::new(4, 3), FoodType::Melon)];
        let values = ValueModel::new();

        let first = planner.plan(Cell::new(2, 2), &map, &values, &smell);
        for _ in 0..10 {
            assert_eq!(planner.plan(Cell::new(2, 2), &map, &values, &smell), first);
        }
        assert!(first.is_some());
    }
}
