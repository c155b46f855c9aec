//! StageTrace: The complete sequence of stage events for one round

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::StageEvent;
use crate::stage::{Stage, StageCategory};

/// A complete trace of stage events for one spin round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Round number within the session
    pub spin_id: u64,

    /// All events in emission order
    pub events: Vec<StageEvent>,

    /// When this round started (wall clock)
    pub recorded_at: DateTime<Utc>,
}

impl StageTrace {
    /// Empty trace for round `spin_id`, stamped now
    pub fn new(spin_id: u64) -> Self {
        Self {
            spin_id,
            events: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Simulated time between the first and last event
    pub fn duration_ms(&self) -> f64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0.0,
        }
    }

    pub fn events_by_category(&self, category: StageCategory) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.category() == category)
            .collect()
    }

    /// Was a stage with this snake_case type name emitted?
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    /// `reel_stop` events, left to right
    pub fn reel_stops(&self) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e.stage, Stage::ReelStop { .. }))
            .collect()
    }

    /// Round score, once the round has ended
    pub fn final_score(&self) -> Option<u64> {
        self.events.iter().rev().find_map(|e| match e.stage {
            Stage::SpinEnd { score } => Some(score),
            _ => None,
        })
    }

    /// Has the round reached SPIN_END?
    pub fn is_complete(&self) -> bool {
        self.events.last().is_some_and(|e| e.stage.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> StageTrace {
        let mut trace = StageTrace::new(7);
        trace.push(StageEvent::new(Stage::SpinStart { spin_id: 7 }, 100.0));
        for reel in 0..5u8 {
            trace.push(StageEvent::new(
                Stage::ReelStop {
                    reel_index: reel,
                    symbols: vec![reel, reel, reel],
                },
                1100.0 + reel as f64 * 400.0,
            ));
        }
        trace.push(StageEvent::new(Stage::EvaluateWins, 2700.0));
        trace.push(StageEvent::new(Stage::SpinEnd { score: 1000 }, 2700.0));
        trace
    }

    #[test]
    fn test_trace_queries() {
        let trace = sample_trace();
        assert_eq!(trace.reel_stops().len(), 5);
        assert!(trace.has_stage("evaluate_wins"));
        assert!(!trace.has_stage("win_present"));
        assert_eq!(trace.duration_ms(), 2600.0);
        assert_eq!(trace.final_score(), Some(1000));
        assert!(trace.is_complete());
        assert_eq!(
            trace
                .events_by_category(StageCategory::SpinLifecycle)
                .len(),
            3
        );
    }

    #[test]
    fn test_empty_trace() {
        let trace = StageTrace::new(1);
        assert_eq!(trace.duration_ms(), 0.0);
        assert_eq!(trace.final_score(), None);
        assert!(!trace.is_complete());
    }
}
