//! Learned energy yield per food type.

use std::collections::BTreeMap;

use crate::content::FoodType;

/// Learned net energy gain per food type.
///
/// Each observation replaces the previous one; there is no averaging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueModel {
    values: BTreeMap<FoodType, f64>,
}

impl ValueModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed gain for `food`, or 0 if it was never eaten.
    pub fn value_of(&self, food: FoodType) -> f64 {
        self.values.get(&food).copied().unwrap_or(0.0)
    }

    pub fn record(&mut self, food: FoodType, gain: f64) {
        self.values.insert(food, gain);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodType, f64)> + '_ {
        self.values.iter().map(|(food, value)| (*food, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_food_is_worth_nothing() {
        let model = ValueModel::new();
        assert_eq!(model.value_of(FoodType::Melon), 0.0);
    }

    #[test]
    fn record_overwrites() {
        let mut model = ValueModel::new();
        model.record(FoodType::Pear, 15.0);
        model.record(FoodType::Pear, 3.0);
        assert_eq!(model.value_of(FoodType::Pear), 3.0);
        assert_eq!(model.iter().count(), 1);
    }

    #[test]
    fn types_are_tracked_separately_and_overwritten_not_averaged() {
        let mut model = ValueModel::new();
        model.record(FoodType::Berry, 5.0);
        model.record(FoodType::Melon, 20.0);
        assert_eq!(model.value_of(FoodType::Berry), 5.0);
        assert_eq!(model.value_of(FoodType::Melon), 20.0);

        model.record(FoodType::Melon, 8.0);
        assert_eq!(model.value_of(FoodType::Melon), 8.0);
        assert_eq!(model.value_of(FoodType::Berry), 5.0);
        assert_eq!(model.iter().count(), 2);
    }
}
