//! StageEvent: A stage occurrence with its timestamp

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A stage event as emitted by the reel core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Simulated session time in milliseconds (sum of all frame deltas)
    pub timestamp_ms: f64,
}

impl StageEvent {
    /// Create a new stage event
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
        }
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}
