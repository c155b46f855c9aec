//! Stage: The enum defining every phase of a spin round
//!
//! A Stage is NOT an animation frame and NOT a sound.
//! A Stage is the SEMANTIC MEANING of a moment in the round.

use serde::{Deserialize, Serialize};

/// Canonical round stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin request accepted, round initiated
    SpinStart {
        /// Sequential round number (1-based)
        spin_id: u64,
    },

    /// All reel motion finished, wins being evaluated
    EvaluateWins,

    /// Round scored, machine ready for the next spin
    SpinEnd {
        /// Total score of the round
        #[serde(default)]
        score: u64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // REEL MOTION
    // ═══════════════════════════════════════════════════════════════════════
    /// Reel set in motion
    ReelSpinning {
        /// Which reel (0-indexed, left to right)
        reel_index: u8,
    },

    /// Reel settled on its final symbols
    ReelStop {
        /// Which reel stopped (0-indexed)
        reel_index: u8,
        /// Visible symbol types on this reel (top to bottom)
        #[serde(default)]
        symbols: Vec<u8>,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // WIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Individual winning line
    WinLineShow {
        /// Payline index
        line_index: u8,
        /// Matched cells counted from the leftmost reel
        run_length: u8,
        /// Score contributed by this line
        #[serde(default)]
        score: u64,
    },

    /// Round produced a non-zero score
    WinPresent {
        /// Total score
        score: u64,
        /// Number of winning lines
        #[serde(default)]
        line_count: u8,
    },
}

impl Stage {
    /// Category of this stage
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SpinStart { .. } | Stage::EvaluateWins | Stage::SpinEnd { .. } => {
                StageCategory::SpinLifecycle
            }
            Stage::ReelSpinning { .. } | Stage::ReelStop { .. } => StageCategory::ReelMotion,
            Stage::WinLineShow { .. } | Stage::WinPresent { .. } => StageCategory::WinLifecycle,
        }
    }

    /// Stable snake_case name, matches the serde tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart { .. } => "spin_start",
            Stage::EvaluateWins => "evaluate_wins",
            Stage::SpinEnd { .. } => "spin_end",
            Stage::ReelSpinning { .. } => "reel_spinning",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::WinLineShow { .. } => "win_line_show",
            Stage::WinPresent { .. } => "win_present",
        }
    }

    /// Reel this stage refers to, if any
    pub fn reel_index(&self) -> Option<u8> {
        match self {
            Stage::ReelSpinning { reel_index } | Stage::ReelStop { reel_index, .. } => {
                Some(*reel_index)
            }
            _ => None,
        }
    }

    /// Does this stage close a round?
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::SpinEnd { .. })
    }
}

/// Stage grouping for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageCategory {
    SpinLifecycle,
    ReelMotion,
    WinLifecycle,
}

impl StageCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SpinLifecycle => "Spin Lifecycle",
            Self::ReelMotion => "Reel Motion",
            Self::WinLifecycle => "Win Lifecycle",
        }
    }
}
