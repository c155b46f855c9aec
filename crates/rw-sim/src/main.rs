//! Reelwright headless driver
//!
//! Usage:
//!   rw-sim play --spins 5             - Play rounds, print grid and score
//!   rw-sim play --json                - Print each round's stage trace as JSON
//!   rw-sim batch --sessions 8         - Seeded parallel simulation report
//!
//! Logging follows `RUST_LOG` (e.g. `RUST_LOG=rw_reels=debug`).

mod batch;
mod driver;
mod play;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rw_reels::SlotConfig;

#[derive(Parser)]
#[command(name = "rw-sim", about = "Reelwright headless slot driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Machine config file (JSON, or YAML by .yaml/.yml extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the turbo preset when no config file is given
    #[arg(long, global = true)]
    turbo: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play rounds with a simulated frame clock
    Play {
        /// Number of rounds
        #[arg(short, long, default_value_t = 1)]
        spins: u32,
        /// RNG seed (OS entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Print stage traces as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Run independent seeded sessions in parallel
    Batch {
        /// Number of sessions
        #[arg(long, default_value_t = 8)]
        sessions: u64,
        /// Rounds per session
        #[arg(short, long, default_value_t = 1000)]
        spins: u32,
        /// Base seed; session i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None if cli.turbo => SlotConfig::turbo(),
        None => SlotConfig::classic(),
    };

    match cli.command {
        Commands::Play {
            spins,
            seed,
            fps,
            json,
        } => play::run(config, spins, seed, fps, json),
        Commands::Batch {
            sessions,
            spins,
            seed,
            fps,
        } => batch::run(config, sessions, spins, seed, fps),
    }
}

fn load_config(path: &Path) -> Result<SlotConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let config = if is_yaml {
        SlotConfig::from_yaml(&text)
    } else {
        SlotConfig::from_json(&text)
    };
    let config = config.with_context(|| format!("Invalid config {}", path.display()))?;

    log::info!("Loaded config from {}", path.display());
    Ok(config)
}
