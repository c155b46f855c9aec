//! Paylines and win evaluation

use serde::{Deserialize, Serialize};

use crate::config::{REEL_COUNT, ROW_COUNT};
use crate::error::{ConfigError, ConfigResult};

/// Shortest run (from the leftmost reel) that pays
pub const MIN_WINNING_RUN: u8 = 3;

/// A line pays `SCORE_BASE ^ run_length`
pub const SCORE_BASE: u64 = 10;

/// A payline definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Row for each reel (e.g., [0, 1, 2, 1, 0] for a "V" shape)
    pub positions: Vec<u8>,
}

impl Payline {
    /// Create a line from its row pattern
    pub fn new(index: u8, positions: [u8; REEL_COUNT]) -> Self {
        Self {
            index,
            positions: positions.to_vec(),
        }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(index: u8, row: u8) -> Self {
        Self::new(index, [row; REEL_COUNT])
    }

    /// One row per reel, every row visible
    pub fn validate(&self) -> ConfigResult<()> {
        if self.positions.len() != REEL_COUNT {
            return Err(ConfigError::InvalidPayline {
                index: self.index,
                reason: format!("{} positions, expected {}", self.positions.len(), REEL_COUNT),
            });
        }
        if let Some(row) = self.positions.iter().find(|&&r| r as usize >= ROW_COUNT) {
            return Err(ConfigError::InvalidPayline {
                index: self.index,
                reason: format!("row {row} outside 0..{ROW_COUNT}"),
            });
        }
        Ok(())
    }

    /// Row on a given reel
    pub fn row(&self, reel: usize) -> usize {
        self.positions[reel] as usize
    }
}

/// The 25 fixed lines of the classic 5×3 machine
pub fn standard_25_paylines() -> Vec<Payline> {
    const PATTERNS: [[u8; REEL_COUNT]; 25] = [
        // Straight lines
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 0],
        [2, 2, 2, 2, 2],
        // V shapes
        [0, 1, 2, 1, 0],
        [2, 1, 0, 1, 2],
        // Dips
        [0, 0, 1, 0, 0],
        [2, 2, 1, 2, 2],
        [1, 0, 0, 0, 1],
        [1, 2, 2, 2, 1],
        // Zigzag
        [1, 0, 1, 0, 1],
        [1, 2, 1, 2, 1],
        [0, 1, 0, 1, 0],
        [2, 1, 2, 1, 2],
        // Steps
        [1, 1, 0, 1, 1],
        [1, 1, 2, 1, 1],
        [0, 1, 1, 1, 0],
        [2, 1, 1, 1, 2],
        // Slopes
        [0, 1, 2, 2, 2],
        [2, 1, 0, 0, 0],
        // Complex
        [0, 2, 0, 2, 0],
        [2, 0, 2, 0, 2],
        [1, 0, 2, 0, 1],
        [1, 2, 0, 2, 1],
        [0, 0, 1, 2, 2],
        [2, 2, 1, 0, 0],
    ];

    PATTERNS
        .iter()
        .enumerate()
        .map(|(i, &rows)| Payline::new(i as u8, rows))
        .collect()
}

/// A point in reel pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What the evaluator needs to know about one visible cell
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridCell {
    /// Symbol type in the cell
    pub symbol: u8,
    /// Centre of the drawn symbol
    pub center: Point,
}

/// Visible cells indexed `[row][reel]`
pub type CellGrid = [[GridCell; REEL_COUNT]; ROW_COUNT];

/// Build a cell grid from bare symbol types (centres left at the origin)
pub fn cells_from_symbols(symbols: &[[u8; REEL_COUNT]; ROW_COUNT]) -> CellGrid {
    let mut cells = [[GridCell::default(); REEL_COUNT]; ROW_COUNT];
    for (row, line) in symbols.iter().enumerate() {
        for (reel, &symbol) in line.iter().enumerate() {
            cells[row][reel].symbol = symbol;
        }
    }
    cells
}

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline index
    pub line_index: u8,
    /// Symbol the run resolved to (the wild only if the whole run is wild)
    pub symbol: u8,
    /// Number of matched cells from the leftmost reel
    pub run_length: u8,
    /// Score contributed by this line
    pub score: u64,
    /// Centre points of all five cells on the line
    pub trace: Vec<Point>,
    /// Cells of the matched run (reel, row)
    pub positions: Vec<(u8, u8)>,
}

/// Result of evaluating a grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Winning lines in payline order
    pub line_wins: Vec<LineWin>,
    /// Sum of all line scores
    pub total_score: u64,
}

impl EvaluationResult {
    /// Check if this is a winning round
    pub fn is_win(&self) -> bool {
        self.total_score > 0
    }

    /// Point traces of every winning line
    pub fn traces(&self) -> Vec<&[Point]> {
        self.line_wins.iter().map(|w| w.trace.as_slice()).collect()
    }
}

/// Scores a settled grid against the configured paylines
#[derive(Debug, Clone)]
pub struct PaylineEvaluator {
    paylines: Vec<Payline>,
    wild_symbol: u8,
}

impl PaylineEvaluator {
    /// Create an evaluator; paylines must already be validated
    pub fn new(paylines: Vec<Payline>, wild_symbol: u8) -> Self {
        Self {
            paylines,
            wild_symbol,
        }
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    pub fn wild_symbol(&self) -> u8 {
        self.wild_symbol
    }

    /// Evaluate every payline
    pub fn evaluate(&self, cells: &CellGrid) -> EvaluationResult {
        let line_wins: Vec<LineWin> = self
            .paylines
            .iter()
            .filter_map(|payline| self.evaluate_line(cells, payline))
            .collect();
        let total_score = line_wins.iter().map(|w| w.score).sum();

        EvaluationResult {
            line_wins,
            total_score,
        }
    }

    /// Matched run length and resolved symbol for one line
    ///
    /// A wild reference adopts the next cell's symbol; any other reference
    /// accepts only itself or the wild. Scanning stops at the first mismatch.
    pub fn scan(&self, cells: &CellGrid, payline: &Payline) -> (u8, u8) {
        let mut reference = cells[payline.row(0)][0].symbol;
        let mut run = 1u8;

        for reel in 1..REEL_COUNT {
            let current = cells[payline.row(reel)][reel].symbol;
            if reference == self.wild_symbol {
                reference = current;
            } else if current != reference && current != self.wild_symbol {
                break;
            }
            run += 1;
        }

        (run, reference)
    }

    /// Matched run length for one line
    pub fn run_length(&self, cells: &CellGrid, payline: &Payline) -> u8 {
        self.scan(cells, payline).0
    }

    fn evaluate_line(&self, cells: &CellGrid, payline: &Payline) -> Option<LineWin> {
        let (run_length, symbol) = self.scan(cells, payline);
        if run_length < MIN_WINNING_RUN {
            return None;
        }

        let trace = (0..REEL_COUNT)
            .map(|reel| cells[payline.row(reel)][reel].center)
            .collect();
        let positions = (0..run_length as usize)
            .map(|reel| (reel as u8, payline.positions[reel]))
            .collect();

        Some(LineWin {
            line_index: payline.index,
            symbol,
            run_length,
            score: SCORE_BASE.pow(run_length as u32),
            trace,
            positions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WILD: u8 = 5;

    fn evaluator() -> PaylineEvaluator {
        PaylineEvaluator::new(standard_25_paylines(), WILD)
    }

    /// Neighbouring reels share no symbol and there is no wild
    fn losing_symbols() -> [[u8; REEL_COUNT]; ROW_COUNT] {
        [[0, 3, 0, 3, 0], [1, 4, 1, 4, 1], [2, 6, 2, 6, 2]]
    }

    #[test]
    fn test_standard_paylines_are_valid() {
        let lines = standard_25_paylines();
        assert_eq!(lines.len(), 25);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.index as usize, i);
            assert!(line.validate().is_ok());
        }
        assert_eq!(lines[0], Payline::straight(0, 1));
    }

    #[test]
    fn test_payline_validation() {
        let short = Payline {
            index: 4,
            positions: vec![0, 1],
        };
        assert!(short.validate().is_err());
        assert!(Payline::new(2, [0, 1, 3, 1, 0]).validate().is_err());
    }

    #[test]
    fn test_all_wild_row_scores_five() {
        let mut symbols = losing_symbols();
        symbols[0] = [WILD; REEL_COUNT];
        let cells = cells_from_symbols(&symbols);
        let eval = evaluator();

        let top = &eval.paylines()[1];
        assert_eq!(eval.scan(&cells, top), (5, WILD));

        let result = eval.evaluate(&cells);
        let top_win = result.line_wins.iter().find(|w| w.line_index == 1).unwrap();
        assert_eq!(top_win.score, 100_000);
        assert_eq!(top_win.positions.len(), 5);
    }

    #[test]
    fn test_wild_reference_adopts_next_symbol() {
        let mut symbols = losing_symbols();
        symbols[1] = [WILD, 7, 7, 7, 7];
        let cells = cells_from_symbols(&symbols);
        let eval = evaluator();

        let middle = &eval.paylines()[0];
        assert_eq!(eval.scan(&cells, middle), (5, 7));
    }

    #[test]
    fn test_wild_substitutes_mid_line() {
        let mut symbols = losing_symbols();
        symbols[1] = [7, WILD, 7, 8, 7];
        let cells = cells_from_symbols(&symbols);
        let eval = evaluator();

        assert_eq!(eval.run_length(&cells, &eval.paylines()[0]), 3);
    }

    #[test]
    fn test_wild_then_mismatch() {
        // Wild adopts 7, the next 8 breaks the run at two
        let mut symbols = losing_symbols();
        symbols[1] = [WILD, 7, 8, 8, 8];
        let cells = cells_from_symbols(&symbols);
        let eval = evaluator();

        assert_eq!(eval.run_length(&cells, &eval.paylines()[0]), 2);
    }

    #[test]
    fn test_run_of_two_never_wins() {
        let mut symbols = losing_symbols();
        symbols[1] = [9, 9, 6, 9, 9];
        let cells = cells_from_symbols(&symbols);
        let eval = evaluator();

        assert_eq!(eval.run_length(&cells, &eval.paylines()[0]), 2);
        let result = eval.evaluate(&cells);
        assert!(!result.line_wins.iter().any(|w| w.line_index == 0));
    }

    #[test]
    fn test_losing_grid_scores_zero() {
        let cells = cells_from_symbols(&losing_symbols());
        let result = evaluator().evaluate(&cells);
        assert!(!result.is_win());
        assert!(result.traces().is_empty());
    }

    #[test]
    fn test_every_line_independently() {
        // For each line, paint only its cells with one symbol: that line
        // must read five, and the score must include 10^5 for it.
        let eval = evaluator();
        for payline in eval.paylines() {
            let mut symbols = losing_symbols();
            for reel in 0..REEL_COUNT {
                symbols[payline.row(reel)][reel] = 8;
            }
            let cells = cells_from_symbols(&symbols);
            assert_eq!(eval.run_length(&cells, payline), 5, "line {}", payline.index);

            let result = eval.evaluate(&cells);
            let win = result
                .line_wins
                .iter()
                .find(|w| w.line_index == payline.index)
                .unwrap();
            assert_eq!(win.score, 100_000);
            assert_eq!(
                result.total_score,
                result.line_wins.iter().map(|w| w.score).sum::<u64>()
            );
        }
    }

    #[test]
    fn test_trace_uses_all_five_centres() {
        let mut symbols = losing_symbols();
        symbols[2] = [3, 3, 3, 0, 1];
        let mut cells = cells_from_symbols(&symbols);
        for (row, line) in cells.iter_mut().enumerate() {
            for (reel, cell) in line.iter_mut().enumerate() {
                cell.center = Point::new(reel as f64 * 10.0, row as f64 * 100.0);
            }
        }

        let result = evaluator().evaluate(&cells);
        let bottom = result.line_wins.iter().find(|w| w.line_index == 2).unwrap();
        assert_eq!(bottom.run_length, 3);
        assert_eq!(bottom.score, 1000);
        assert_eq!(bottom.trace.len(), 5);
        assert_eq!(bottom.trace[4], Point::new(40.0, 200.0));
        assert_eq!(bottom.positions, vec![(0, 2), (1, 2), (2, 2)]);
    }
}
