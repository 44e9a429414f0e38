#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner for Spice Defence.

mod runner;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use spice_defence_core::Config;
use tracing_subscriber::EnvFilter;

use crate::runner::{Autopilot, Outcome};

/// Plays a full game with a scripted builder and prints the tallies.
#[derive(Debug, Parser)]
#[command(name = "spice-defence", version, about)]
struct Args {
    /// TOML file overriding the default configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Simulated milliseconds advanced by each tick.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    dt_ms: u64,
    /// Tick limit after which the run stops regardless of phase.
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,
    /// Guard towers the autopilot attempts to add during each build phase.
    #[arg(long, default_value_t = 2)]
    towers_per_wave: u32,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let mut autopilot = Autopilot::new(config, args.towers_per_wave)?;
    let outcome = autopilot.run(args.dt_ms, args.max_ticks);
    tracing::info!(?outcome, ticks = autopilot.ticks(), "run finished");

    print!("{}", autopilot.summary());
    if outcome == Outcome::TickLimit {
        eprintln!("stopped after {} ticks without a result", args.max_ticks);
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
