//! `monsters` entry point.
mod args;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use forage_content::{
    ConfigLoader, DEMO_WORLD, Scenario, ScenarioLoader, WorldLoader, parse_world,
};
use forage_core::{ForageConfig, GridWorld};
use runtime::{Runtime, RuntimeConfig, SimEvent, Topic};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let _guard = logging::setup_logging(args.quiet)?;

    let forage = match &args.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ForageConfig::default(),
    };

    let (scenario, scenario_world) = match &args.scenario {
        Some(path) => ScenarioLoader::load(path)?,
        None => (Scenario::default(), None),
    };

    let world = load_world(args.world.clone().or(scenario_world))?;
    let seed = args.resolve_seed();

    let config = RuntimeConfig {
        forage,
        seed,
        step_ms: args.step_ms,
        max_steps: args.ticks,
        paced: args.pace,
        ..RuntimeConfig::default()
    };

    let runtime = Runtime::builder()
        .config(config)
        .world(world)
        .roster(scenario.monsters)
        .build()
        .await
        .context("Failed to start the simulation")?;
    let handle = runtime.handle();

    let speech = tokio::spawn(log_speech(runtime.subscribe(Topic::Speech)));

    if args.print_map {
        println!("{}", handle.render().await?);
    }

    info!(seed, "running session");
    tokio::select! {
        result = runtime.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, stopping early");
        }
    }

    let summary = handle.summary().await?;
    if args.print_map {
        println!("{}", handle.render().await?);
    }
    println!("seed {seed}");
    print!("{summary}");

    drop(handle);
    runtime.shutdown().await?;
    speech.abort();

    Ok(())
}

fn load_world(path: Option<PathBuf>) -> Result<GridWorld> {
    match path {
        Some(path) => WorldLoader::load(&path),
        None => parse_world(DEMO_WORLD).context("Built-in demo world is invalid"),
    }
}

/// Logs what the monsters say until the session ends.
async fn log_speech(mut speech: broadcast::Receiver<runtime::Event>) {
    loop {
        match speech.recv().await {
            Ok(event) => {
                if let SimEvent::Said { monster, message } = event.payload {
                    info!(time_ms = event.time_ms, %monster, "{message}");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "speech log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
