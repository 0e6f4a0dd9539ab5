use std::fmt;

use forage_content::BrainKind;
use forage_core::Cell;

use super::MonsterStats;

/// Final state of one monster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterReport {
    pub name: String,
    pub brain: BrainKind,
    pub position: Cell,
    pub energy: u32,
    pub sleeping: bool,
    pub stats: MonsterStats,
}

/// Snapshot of a session, printed by the CLI when the run ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub time_ms: u64,
    pub steps: u64,
    pub food_on_grid: usize,
    pub monsters: Vec<MonsterReport>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} steps, {:.1}s simulated, {} food on the grid",
            self.steps,
            self.time_ms as f64 / 1000.0,
            self.food_on_grid
        )?;
        writeln!(
            f,
            "{:<14} {:<9} {:>8} {:>6} {:>6} {:>7} {:>6} {:>6} {:>5}",
            "monster", "brain", "cell", "energy", "meals", "gained", "moved", "bumps", "naps"
        )?;
        for report in &self.monsters {
            let energy = if report.sleeping {
                format!("{}z", report.energy)
            } else {
                report.energy.to_string()
            };
            writeln!(
                f,
                "{:<14} {:<9} {:>8} {:>6} {:>6} {:>7} {:>6} {:>6} {:>5}",
                report.name,
                format!("{:?}", report.brain),
                report.position.to_string(),
                energy,
                report.stats.meals,
                report.stats.energy_eaten,
                report.stats.cells_moved,
                report.stats.bumps,
                report.stats.naps,
            )?;
        }
        Ok(())
    }
}
