//! Session statistics

use serde::{Deserialize, Serialize};

use crate::paytable::{EvaluationResult, MIN_WINNING_RUN};
use crate::config::REEL_COUNT;

/// Running totals over scored rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds: u64,
    pub wins: u64,
    pub total_score: u64,
    pub best_score: u64,
    pub line_wins: u64,
    /// Winning lines by run length 3, 4, 5
    pub run_histogram: [u64; REEL_COUNT - MIN_WINNING_RUN as usize + 1],
}

impl SessionStats {
    /// Fold one scored round into the totals
    pub fn record(&mut self, result: &EvaluationResult) {
        self.rounds += 1;
        self.total_score += result.total_score;
        self.best_score = self.best_score.max(result.total_score);
        if result.is_win() {
            self.wins += 1;
        }
        for win in &result.line_wins {
            self.line_wins += 1;
            let bucket = (win.run_length - MIN_WINNING_RUN) as usize;
            if let Some(count) = self.run_histogram.get_mut(bucket) {
                *count += 1;
            }
        }
    }

    /// Combine totals from another session
    pub fn merge(&mut self, other: &SessionStats) {
        self.rounds += other.rounds;
        self.wins += other.wins;
        self.total_score += other.total_score;
        self.best_score = self.best_score.max(other.best_score);
        self.line_wins += other.line_wins;
        for (mine, theirs) in self.run_histogram.iter_mut().zip(other.run_histogram) {
            *mine += theirs;
        }
    }

    /// Percentage of rounds with a non-zero score
    pub fn hit_rate(&self) -> f64 {
        if self.rounds > 0 {
            (self.wins as f64 / self.rounds as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Average score per round
    pub fn mean_score(&self) -> f64 {
        if self.rounds > 0 {
            self.total_score as f64 / self.rounds as f64
        } else {
            0.0
        }
    }
}
