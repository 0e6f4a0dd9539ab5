//! Exploration machinery for monsters that learn the grid as they go.
//!
//! A monster senses its neighbours into a [`KnowledgeMap`], remembers what each
//! food type was worth in a [`ValueModel`] and asks the [`ExplorationPlanner`]
//! for a direction. The planner floods a [`DistanceField`] over the known free
//! cells and heads either for smelled food or for the nearest frontier.
mod field;
mod knowledge;
mod planner;
mod value;

pub use field::{DistanceField, FieldCell};
pub use knowledge::{Knowledge, KnowledgeMap};
pub use planner::{ExplorationPlanner, Plan, PlanTarget};
pub use value::ValueModel;
