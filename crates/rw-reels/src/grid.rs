//! Result grid: which unit occupies each visible cell

use serde::{Deserialize, Serialize};

use crate::config::{REEL_COUNT, ROW_COUNT};

/// 3×5 map of visible cells to reel-local unit indices
///
/// All cells are assigned when a round starts. A reel's column only counts
/// as a result once that reel has settled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultGrid {
    cells: [[usize; REEL_COUNT]; ROW_COUNT],
    settled: [bool; REEL_COUNT],
}

impl ResultGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every settled column (cell assignments are overwritten per round)
    pub fn reset(&mut self) {
        self.settled = [false; REEL_COUNT];
    }

    /// Record that `unit` will land on `row` of `reel`
    pub fn assign(&mut self, row: usize, reel: usize, unit: usize) {
        self.cells[row][reel] = unit;
    }

    /// Unit assigned to a cell, settled or not
    pub fn unit_at(&self, row: usize, reel: usize) -> usize {
        self.cells[row][reel]
    }

    pub fn mark_settled(&mut self, reel: usize) {
        self.settled[reel] = true;
    }

    pub fn is_settled(&self, reel: usize) -> bool {
        self.settled[reel]
    }

    /// Settled column of a reel, top to bottom
    pub fn column(&self, reel: usize) -> Option<[usize; ROW_COUNT]> {
        self.settled[reel].then(|| std::array::from_fn(|row| self.cells[row][reel]))
    }

    /// Number of settled reels
    pub fn settled_count(&self) -> usize {
        self.settled.iter().filter(|&&s| s).count()
    }

    /// True once every reel has settled
    pub fn is_complete(&self) -> bool {
        self.settled.iter().all(|&s| s)
    }
}
