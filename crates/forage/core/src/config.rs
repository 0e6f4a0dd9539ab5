//! Engine constants and tunable parameters.
//!
//! A single immutable [`ForageConfig`] is built before the simulation starts
//! and passed by reference to every operation that needs a constant. Nothing
//! in the engine reads process-wide state.

use strum::IntoEnumIterator;

use crate::content::FoodType;
use crate::error::ConfigError;

/// Tolerance when checking that spawn probabilities add up to one.
const PROBABILITY_EPSILON: f64 = 1e-6;

/// How the explorer ranks smelled food before comparing it with the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RewardPolicy {
    /// Closest reachable food by field distance.
    #[default]
    Nearest,
    /// Highest learned value first, then field distance.
    MostValuable,
}

/// Spawn weight and energy yield of one food type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodSpec {
    pub probability: f64,
    pub energy: u32,
}

impl FoodSpec {
    pub const fn new(probability: f64, energy: u32) -> Self {
        Self {
            probability,
            energy,
        }
    }
}

/// Spawn probabilities and yields for every [`FoodType`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FoodTable {
    pub berry: FoodSpec,
    pub apple: FoodSpec,
    pub pear: FoodSpec,
    pub melon: FoodSpec,
}

impl FoodTable {
    pub fn spec(&self, food: FoodType) -> FoodSpec {
        match food {
            FoodType::Berry => self.berry,
            FoodType::Apple => self.apple,
            FoodType::Pear => self.pear,
            FoodType::Melon => self.melon,
        }
    }

    pub fn energy(&self, food: FoodType) -> u32 {
        self.spec(food).energy
    }

    /// Maps a uniform draw in `[0, 1)` to a food type.
    ///
    /// Intervals are laid out in declaration order of [`FoodType`]. Draws that
    /// land past the last interval because of rounding select the last type.
    pub fn select(&self, draw: f64) -> FoodType {
        let mut upper = 0.0;
        let mut last = FoodType::Berry;
        for food in FoodType::iter() {
            upper += self.spec(food).probability;
            last = food;
            if draw < upper {
                return food;
            }
        }
        last
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut sum = 0.0;
        for food in FoodType::iter() {
            let value = self.spec(food).probability;
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { food, value });
            }
            sum += value;
        }
        if (sum - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(ConfigError::ProbabilitySum { sum });
        }
        Ok(())
    }
}

impl Default for FoodTable {
    fn default() -> Self {
        Self {
            berry: FoodSpec::new(0.4, 5),
            apple: FoodSpec::new(0.3, 10),
            pear: FoodSpec::new(0.2, 15),
            melon: FoodSpec::new(0.1, 20),
        }
    }
}

/// Engine configuration shared by the grid, every monster and the planner.
///
/// Durations are expressed in milliseconds of simulated time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForageConfig {
    pub energy_max: u32,
    pub energy_per_move: u32,
    /// Spent when a monster tries to walk into a cell it cannot enter.
    pub energy_penalty_occupied: u32,
    /// Below this level a monster slows down.
    pub energy_critical_level: u32,
    /// Restored on each sleep tick.
    pub energy_per_sleep_tick: u32,
    /// Speed of a tired monster as a percentage of normal speed.
    pub slow_speed_percent: u32,
    /// Manhattan radius of the smell query.
    pub smell_radius: u32,
    /// Duration of a single move at normal speed.
    pub move_duration_ms: u64,
    pub sleep_tick_ms: u64,
    /// How long an item stays with its carrier before it is lost.
    pub item_owner_timeout_ms: u64,
    /// Pause before deciding again when a monster has no legal move.
    pub idle_retry_ms: u64,
    pub initial_food: usize,
    pub food: FoodTable,
    pub reward_policy: RewardPolicy,
}

impl ForageConfig {
    pub const DEFAULT_ENERGY_MAX: u32 = 50;
    pub const DEFAULT_ENERGY_PER_MOVE: u32 = 1;
    pub const DEFAULT_ENERGY_PENALTY_OCCUPIED: u32 = 5;
    pub const DEFAULT_ENERGY_CRITICAL_LEVEL: u32 = 10;
    pub const DEFAULT_ENERGY_PER_SLEEP_TICK: u32 = 10;
    pub const DEFAULT_SLOW_SPEED_PERCENT: u32 = 30;
    pub const DEFAULT_SMELL_RADIUS: u32 = 15;
    pub const DEFAULT_MOVE_DURATION_MS: u64 = 200;
    pub const DEFAULT_SLEEP_TICK_MS: u64 = 1000;
    pub const DEFAULT_ITEM_OWNER_TIMEOUT_MS: u64 = 5000;
    pub const DEFAULT_IDLE_RETRY_MS: u64 = 100;
    pub const DEFAULT_INITIAL_FOOD: usize = 5;

    pub fn new() -> Self {
        Self {
            energy_max: Self::DEFAULT_ENERGY_MAX,
            energy_per_move: Self::DEFAULT_ENERGY_PER_MOVE,
            energy_penalty_occupied: Self::DEFAULT_ENERGY_PENALTY_OCCUPIED,
            energy_critical_level: Self::DEFAULT_ENERGY_CRITICAL_LEVEL,
            energy_per_sleep_tick: Self::DEFAULT_ENERGY_PER_SLEEP_TICK,
            slow_speed_percent: Self::DEFAULT_SLOW_SPEED_PERCENT,
            smell_radius: Self::DEFAULT_SMELL_RADIUS,
            move_duration_ms: Self::DEFAULT_MOVE_DURATION_MS,
            sleep_tick_ms: Self::DEFAULT_SLEEP_TICK_MS,
            item_owner_timeout_ms: Self::DEFAULT_ITEM_OWNER_TIMEOUT_MS,
            idle_retry_ms: Self::DEFAULT_IDLE_RETRY_MS,
            initial_food: Self::DEFAULT_INITIAL_FOOD,
            food: FoodTable::default(),
            reward_policy: RewardPolicy::default(),
        }
    }

    /// Number of sleep ticks needed to refill an empty monster.
    ///
    /// Rounds up, so a tick larger than the whole pool still buys one tick.
    pub fn full_recovery_ticks(&self) -> u32 {
        self.energy_max.div_ceil(self.energy_per_sleep_tick.max(1))
    }

    /// Move duration for a monster travelling at `speed_percent` of normal speed.
    pub fn move_duration_at(&self, speed_percent: u32) -> u64 {
        self.move_duration_ms * 100 / u64::from(speed_percent.max(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("energy_max", self.energy_max as u64),
            ("energy_per_sleep_tick", self.energy_per_sleep_tick as u64),
            ("move_duration_ms", self.move_duration_ms),
            ("sleep_tick_ms", self.sleep_tick_ms),
            ("idle_retry_ms", self.idle_retry_ms),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        if self.energy_critical_level >= self.energy_max {
            return Err(ConfigError::CriticalAboveMax {
                critical: self.energy_critical_level,
                max: self.energy_max,
            });
        }

        if !(1..=100).contains(&self.slow_speed_percent) {
            return Err(ConfigError::SlowSpeed(self.slow_speed_percent));
        }

        self.food.validate()
    }
}

impl Default for ForageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ForageConfig::default().validate(), Ok(()));
    }

    #[test]
    fn select_partitions_unit_interval_in_declaration_order() {
        let table = FoodTable::default();
        assert_eq!(table.select(0.0), FoodType::Berry);
        assert_eq!(table.select(0.39), FoodType::Berry);
        assert_eq!(table.select(0.4), FoodType::Apple);
        assert_eq!(table.select(0.69), FoodType::Apple);
        assert_eq!(table.select(0.75), FoodType::Pear);
        assert_eq!(table.select(0.95), FoodType::Melon);
        assert_eq!(table.select(0.999_999), FoodType::Melon);
    }

    #[test]
    fn zero_weight_types_are_never_selected() {
        let table = FoodTable {
            berry: FoodSpec::new(0.0, 5),
            apple: FoodSpec::new(1.0, 10),
            pear: FoodSpec::new(0.0, 15),
            melon: FoodSpec::new(0.0, 20),
        };
        assert_eq!(table.select(0.0), FoodType::Apple);
        assert_eq!(table.select(0.5), FoodType::Apple);
    }

    #[test]
    fn rejects_probabilities_not_summing_to_one() {
        let mut table = FoodTable::default();
        table.melon.probability = 0.3;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::ProbabilitySum { .. })
        ));
    }

    #[test]
    fn rejects_negative_probability() {
        let mut table = FoodTable::default();
        table.berry.probability = -0.1;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::InvalidProbability {
                food: FoodType::Berry,
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_sleep_increment() {
        let config = ForageConfig {
            energy_per_sleep_tick: 0,
            ..ForageConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "energy_per_sleep_tick"
            })
        );
    }

    #[test]
    fn recovery_and_slow_move_duration() {
        let config = ForageConfig::default();
        assert_eq!(config.full_recovery_ticks(), 5);
        assert_eq!(config.move_duration_at(100), 200);
        assert_eq!(config.move_duration_at(30), 666);
    }

    #[test]
    fn recovery_ticks_round_up() {
        let config = ForageConfig {
            energy_max: 5,
            energy_per_sleep_tick: 10,
            energy_critical_level: 2,
            ..ForageConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.full_recovery_ticks(), 1);

        let config = ForageConfig {
            energy_max: 25,
            energy_per_sleep_tick: 10,
            ..ForageConfig::default()
        };
        assert_eq!(config.full_recovery_ticks(), 3);
    }
}
