//! Frame loop shared by `play` and `batch`

use anyhow::{Result, bail, ensure};
use rand::Rng;

use rw_reels::SpinController;

/// Frames after which a round counts as stalled (ten minutes at 60 fps)
const MAX_FRAMES_PER_ROUND: u64 = 36_000;

/// Simulated animation-frame source
#[derive(Debug, Clone)]
pub struct FrameDriver {
    frame_ms: f64,
    timestamp_ms: f64,
}

impl FrameDriver {
    pub fn new(fps: f64) -> Result<Self> {
        ensure!(fps.is_finite() && fps > 0.0, "fps must be positive, got {fps}");
        Ok(Self {
            frame_ms: 1000.0 / fps,
            timestamp_ms: 0.0,
        })
    }

    /// Start a round and tick frames until the machine is idle again
    ///
    /// Returns the number of frames the round took.
    pub fn run_round<R: Rng>(&mut self, machine: &mut SpinController<R>) -> Result<u64> {
        if !machine.request_spin() {
            bail!("Machine rejected the spin request: round still in progress");
        }

        let mut frames = 0u64;
        while !machine.can_spin() {
            self.timestamp_ms += self.frame_ms;
            machine.update(self.timestamp_ms);
            frames += 1;
            if frames > MAX_FRAMES_PER_ROUND {
                bail!(
                    "Round {} did not settle within {} frames (active reel {:?})",
                    machine.round().spin_id,
                    MAX_FRAMES_PER_ROUND,
                    machine.active_reel()
                );
            }
        }
        Ok(frames)
    }
}
