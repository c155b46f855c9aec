//! Frame clock: turns animation-frame timestamps into frame deltas

/// Converts monotonically increasing timestamps (ms) into `dt` seconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
    max_step: Option<f64>,
}

impl FrameClock {
    /// Create a clock with no baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp every delta to `max_step` seconds
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = Some(max_step.max(0.0));
        self
    }

    /// Record a frame timestamp and return the elapsed seconds
    ///
    /// The first call only records the baseline and returns 0. A timestamp
    /// earlier than the previous one yields 0 rather than a negative delta.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let Some(last) = self.last_timestamp_ms.replace(timestamp_ms) else {
            return 0.0;
        };

        let dt = ((timestamp_ms - last) / 1000.0).max(0.0);
        match self.max_step {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Forget the baseline; the next tick returns 0 again
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }

    /// Has the clock seen a frame yet?
    pub fn is_started(&self) -> bool {
        self.last_timestamp_ms.is_some()
    }
}
