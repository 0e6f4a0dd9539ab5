//! Session setup: which world to load and which monsters to release into it.

/// Decision logic run by a monster at each decision cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrainKind {
    /// Eats and picks what it stands on, otherwise moves at random.
    Wanderer,
    /// Heads greedily for the nearest smelled food.
    Forager,
    /// Maps the grid, learns food values and plans paths.
    Explorer,
}

/// One monster of the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSpec {
    pub name: String,
    pub brain: BrainKind,
}

impl MonsterSpec {
    pub fn new(name: impl Into<String>, brain: BrainKind) -> Self {
        Self {
            name: name.into(),
            brain,
        }
    }
}

/// World file and roster for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Scenario {
    /// Path to a world layout, relative to the scenario file. The built-in
    /// demo world is used when absent.
    pub world: Option<String>,
    pub monsters: Vec<MonsterSpec>,
}

impl Scenario {
    /// Two foragers, a wanderer and an explorer on the demo world.
    pub fn default_roster() -> Vec<MonsterSpec> {
        vec![
            MonsterSpec::new("Forager-1", BrainKind::Forager),
            MonsterSpec::new("Forager-2", BrainKind::Forager),
            MonsterSpec::new("Wanderer", BrainKind::Wanderer),
            MonsterSpec::new("Explorer", BrainKind::Explorer),
        ]
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            world: None,
            monsters: Self::default_roster(),
        }
    }
}
