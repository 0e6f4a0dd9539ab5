//! Command line flags.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

/// Release a handful of foraging monsters on a grid and report how they fared.
#[derive(Parser, Debug)]
#[command(name = "monsters")]
#[command(version, long_about = None)]
pub struct Args {
    /// World layout file (defaults to the scenario's world, then the built-in demo)
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// Engine configuration in TOML
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scenario in RON: world file and monster roster
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Session seed (falls back to MONSTERS_SEED, then the current time)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulation steps to run
    #[arg(long, default_value_t = 2000)]
    pub ticks: u64,

    /// Simulated milliseconds per step
    #[arg(long, default_value_t = 50)]
    pub step_ms: u64,

    /// Advance in real time instead of as fast as possible
    #[arg(long)]
    pub pace: bool,

    /// Log to the session file only
    #[arg(long)]
    pub quiet: bool,

    /// Print the grid before and after the run
    #[arg(long)]
    pub print_map: bool,
}

impl Args {
    /// Seed from the flag, the environment, or the clock, in that order.
    pub fn resolve_seed(&self) -> u64 {
        self.seed
            .or_else(|| read_env("MONSTERS_SEED"))
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_secs())
                    .unwrap_or_default()
            })
    }
}

/// Reads and parses an environment variable, ignoring unset or malformed values.
pub fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
