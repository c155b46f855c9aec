//! `batch`: many independent sessions, merged statistics

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use rw_reels::{SessionStats, SlotConfig, SpinController};

use crate::driver::FrameDriver;

/// Aggregated outcome of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub sessions: u64,
    pub spins_per_session: u32,
    pub base_seed: u64,
    pub hit_rate: f64,
    pub mean_score: f64,
    pub mean_frames_per_round: f64,
    pub stats: SessionStats,
}

pub fn run(config: SlotConfig, sessions: u64, spins: u32, seed: u64, fps: f64) -> Result<()> {
    let report = simulate(&config, sessions, spins, seed, fps)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Run `sessions` machines in parallel, session `i` seeded with `seed + i`
pub fn simulate(
    config: &SlotConfig,
    sessions: u64,
    spins: u32,
    seed: u64,
    fps: f64,
) -> Result<BatchReport> {
    log::info!("Batch: {sessions} sessions x {spins} spins, base seed {seed}");

    let results: Vec<(SessionStats, u64)> = (0..sessions)
        .into_par_iter()
        .map(|i| run_session(config.clone(), seed.wrapping_add(i), spins, fps))
        .collect::<Result<_>>()?;

    let mut stats = SessionStats::default();
    let mut frames = 0u64;
    for (session, session_frames) in &results {
        stats.merge(session);
        frames += session_frames;
    }

    let mean_frames_per_round = if stats.rounds > 0 {
        frames as f64 / stats.rounds as f64
    } else {
        0.0
    };

    Ok(BatchReport {
        sessions,
        spins_per_session: spins,
        base_seed: seed,
        hit_rate: stats.hit_rate(),
        mean_score: stats.mean_score(),
        mean_frames_per_round,
        stats,
    })
}

fn run_session(config: SlotConfig, seed: u64, spins: u32, fps: f64) -> Result<(SessionStats, u64)> {
    let mut machine = SpinController::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
        .context("Failed to build machine")?;
    let mut driver = FrameDriver::new(fps)?;

    let mut frames = 0;
    for _ in 0..spins {
        frames += driver
            .run_round(&mut machine)
            .with_context(|| format!("Session seeded {seed} failed"))?;
    }
    log::debug!("Session {seed} done: score {}", machine.stats().total_score);
    Ok((machine.stats().clone(), frames))
}
