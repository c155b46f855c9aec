//! `play`: interactive-style rounds on the console

use anyhow::{Context, Result};
use rand::Rng;

use rw_reels::{REEL_COUNT, ROW_COUNT, SlotConfig, SpinController};
use rw_stage::{Stage, StageEvent};

use crate::driver::FrameDriver;

pub fn run(config: SlotConfig, spins: u32, seed: Option<u64>, fps: f64, json: bool) -> Result<()> {
    let machine = match seed {
        Some(seed) => SpinController::seeded(config, seed),
        None => SpinController::new(config),
    }
    .context("Failed to build machine")?;
    let mut machine = machine.with_listener(Box::new(log_stage));
    let mut driver = FrameDriver::new(fps)?;

    for _ in 0..spins {
        let frames = driver.run_round(&mut machine)?;
        if json {
            println!("{}", serde_json::to_string(machine.last_trace())?);
        } else {
            print_round(&machine, frames);
        }
    }

    let stats = machine.stats();
    log::info!(
        "Session: {} rounds, hit rate {:.1}%, mean score {:.1}",
        stats.rounds,
        stats.hit_rate(),
        stats.mean_score()
    );
    Ok(())
}

/// Stand-in for the audio/UI collaborators: every stage becomes a log line
fn log_stage(event: &StageEvent) {
    match &event.stage {
        Stage::ReelStop { reel_index, .. } => {
            log::debug!("[{:>8.1}ms] reel {} stop (click)", event.timestamp_ms, reel_index)
        }
        Stage::WinPresent { score, .. } => {
            log::debug!("[{:>8.1}ms] win {} (fanfare)", event.timestamp_ms, score)
        }
        stage => log::trace!("[{:>8.1}ms] {}", event.timestamp_ms, stage.type_name()),
    }
}

fn print_round<R: Rng>(machine: &SpinController<R>, frames: u64) {
    let config = machine.config();
    println!(
        "Round {} ({} frames, offsets {:?})",
        machine.round().spin_id,
        frames,
        machine.round().top_offsets
    );

    let visible = machine.visible_symbols();
    for row in visible.iter().take(ROW_COUNT) {
        let cells: Vec<String> = row
            .iter()
            .take(REEL_COUNT)
            .map(|cell| match cell {
                Some(symbol) => format!("{:<9}", config.symbol_name(*symbol)),
                None => format!("{:<9}", "?"),
            })
            .collect();
        println!("  | {} |", cells.join(" "));
    }

    for win in machine.winning_lines() {
        println!(
            "  line {:>2}: {} x{} = {}",
            win.line_index,
            config.symbol_name(win.symbol),
            win.run_length,
            win.score
        );
    }
    println!("  score: {}", machine.score());
}
