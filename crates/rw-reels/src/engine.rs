//! Spin controller: orchestrates one machine and its rounds
//!
//! ```text
//! request_spin ──> launch all reels, mark reel 0 stopper
//!      │
//! advance_frame ──> every unit advances; a stopper arriving returns ReelSettled
//!      │
//! on_reel_settled(i) ──> halt reel i, mark reel i+1 stopper ... reel 4 ──> score
//! ```
//!
//! Everything runs synchronously on the caller's thread. A settlement is
//! handled inside the same frame pass that produced it.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use rw_stage::{NullListener, Stage, StageEvent, StageListener, StageTrace};

use crate::config::{MIDDLE_ROW, REEL_COUNT, ROW_COUNT, ReelGeometry, SLOTS_PER_REEL, SlotConfig};
use crate::error::ConfigResult;
use crate::grid::ResultGrid;
use crate::paytable::{CellGrid, EvaluationResult, GridCell, LineWin, PaylineEvaluator, Point};
use crate::stats::SessionStats;
use crate::timing::FrameClock;
use crate::unit::{SymbolUnit, relabel_symbols};

/// Render-facing snapshot of one unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub symbol: u8,
    pub reel_index: usize,
    pub x: f64,
    pub y: f64,
}

/// Transient state of the current (or last finished) round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpinRound {
    /// Round number within the session (1-based, 0 before the first spin)
    pub spin_id: u64,
    /// Random top offset drawn per reel
    pub top_offsets: [usize; REEL_COUNT],
    /// Reel whose stopper is currently armed
    pub active_reel: Option<usize>,
    /// Evaluation of the settled grid, once all reels stopped
    pub result: EvaluationResult,
}

/// The slot machine core
pub struct SpinController<R = StdRng> {
    /// Configuration (validated)
    config: SlotConfig,
    /// Derived pixel geometry
    geometry: ReelGeometry,
    /// Payline scorer
    evaluator: PaylineEvaluator,
    /// Ten units per reel, fixed for the machine's lifetime
    reels: Vec<Vec<SymbolUnit>>,
    /// Visible cell assignment of the current round
    grid: ResultGrid,
    /// Current round state
    round: SpinRound,
    /// Gate against overlapping rounds
    can_spin: bool,
    /// Random number generator
    rng: R,
    /// Notification hook
    listener: Box<dyn StageListener + Send>,
    /// Stage events of the current round
    trace: StageTrace,
    /// Timestamp-to-delta conversion for `update`
    clock: FrameClock,
    /// Simulated time in milliseconds
    session_ms: f64,
    /// Session statistics
    stats: SessionStats,
}

impl SpinController<StdRng> {
    /// Create a machine seeded from the OS
    pub fn new(config: SlotConfig) -> ConfigResult<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a machine with reproducible randomness
    pub fn seeded(config: SlotConfig, seed: u64) -> ConfigResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpinController<R> {
    /// Create a machine with a caller-supplied generator
    ///
    /// Fails fast on an invalid configuration.
    pub fn with_rng(config: SlotConfig, mut rng: R) -> ConfigResult<Self> {
        config.validate()?;
        let geometry = config.geometry();
        let evaluator = PaylineEvaluator::new(config.paylines.clone(), config.wild_symbol);

        let mut reels: Vec<Vec<SymbolUnit>> = (0..REEL_COUNT)
            .map(|reel| {
                (0..SLOTS_PER_REEL)
                    .map(|slot| {
                        let symbol = (slot % config.symbol_kinds as usize) as u8;
                        SymbolUnit::new(symbol, reel, slot, geometry)
                    })
                    .collect()
            })
            .collect();

        if config.shuffle_on_init {
            for units in &mut reels {
                relabel_symbols(units, &mut rng);
            }
        }

        log::debug!(
            "Machine ready: {} symbol kinds, wild {}, {} paylines, shuffled: {}",
            config.symbol_kinds,
            config.wild_symbol,
            config.paylines.len(),
            config.shuffle_on_init
        );

        Ok(Self {
            config,
            geometry,
            evaluator,
            reels,
            grid: ResultGrid::new(),
            round: SpinRound::default(),
            can_spin: true,
            rng,
            listener: Box::new(NullListener),
            trace: StageTrace::new(0),
            clock: FrameClock::new(),
            session_ms: 0.0,
            stats: SessionStats::default(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Attach a notification listener (builder style)
    pub fn with_listener(mut self, listener: Box<dyn StageListener + Send>) -> Self {
        self.listener = listener;
        self
    }

    /// Replace the notification listener
    pub fn set_listener(&mut self, listener: Box<dyn StageListener + Send>) {
        self.listener = listener;
    }

    /// Get current config
    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a round with random reel offsets
    ///
    /// Ignored (returns false, changes nothing) while a round is running.
    pub fn request_spin(&mut self) -> bool {
        if !self.can_spin {
            log::debug!("Spin request ignored: round {} in progress", self.round.spin_id);
            return false;
        }
        let offsets = std::array::from_fn(|_| self.rng.random_range(0..SLOTS_PER_REEL));
        self.start_round(offsets);
        true
    }

    /// Start a round with chosen top offsets (replays, tests)
    ///
    /// Offsets are reduced modulo the reel cycle. Gated like
    /// [`request_spin`](Self::request_spin).
    pub fn spin_forced(&mut self, top_offsets: [usize; REEL_COUNT]) -> bool {
        if !self.can_spin {
            log::debug!("Forced spin ignored: round {} in progress", self.round.spin_id);
            return false;
        }
        self.start_round(top_offsets.map(|offset| offset % SLOTS_PER_REEL));
        true
    }

    fn start_round(&mut self, top_offsets: [usize; REEL_COUNT]) {
        let spin_id = self.round.spin_id + 1;
        self.round = SpinRound {
            spin_id,
            top_offsets,
            active_reel: Some(0),
            result: EvaluationResult::default(),
        };
        self.trace = StageTrace::new(spin_id);
        self.grid.reset();
        self.can_spin = false;

        self.emit(Stage::SpinStart { spin_id });

        let runway = self.config.stop_runway_slots as usize;
        for (reel, units) in self.reels.iter_mut().enumerate() {
            let top = top_offsets[reel] as isize;
            for (index, unit) in units.iter_mut().enumerate() {
                let relative = (index as isize - top).rem_euclid(SLOTS_PER_REEL as isize) as usize;
                if relative < ROW_COUNT {
                    self.grid.assign(relative, reel, index);
                }
                unit.launch((relative + runway) % SLOTS_PER_REEL, self.config.spin_speed);
            }
        }
        for reel in 0..REEL_COUNT {
            self.emit(Stage::ReelSpinning {
                reel_index: reel as u8,
            });
        }

        self.arm_stopper(0);
        log::debug!("Round {spin_id} started, offsets {top_offsets:?}");
    }

    /// Mark the middle-row unit of `reel` as its stopper
    fn arm_stopper(&mut self, reel: usize) {
        let index = self.grid.unit_at(MIDDLE_ROW, reel);
        self.reels[reel][index].mark_as_stopper(self.config.min_spin_duration);
        self.round.active_reel = Some(reel);
    }

    /// Advance by an animation-frame timestamp in milliseconds
    ///
    /// The first call only records the clock baseline.
    pub fn update(&mut self, timestamp_ms: f64) {
        let dt = self.clock.tick(timestamp_ms);
        self.advance_frame(dt);
    }

    /// Advance all units by `dt` seconds
    pub fn advance_frame(&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid frame delta {dt}");
            0.0
        };
        self.session_ms += dt * 1000.0;

        for reel in 0..REEL_COUNT {
            for index in 0..SLOTS_PER_REEL {
                if let Some(settled) = self.reels[reel][index].advance(dt, self.geometry) {
                    self.on_reel_settled(settled.reel_index);
                }
            }
        }
    }

    /// Stop reel `reel_index` and pass the stop chain to the next reel
    ///
    /// Only the currently active reel is accepted; any other call is ignored
    /// so each reel settles exactly once per round.
    pub fn on_reel_settled(&mut self, reel_index: usize) {
        if self.round.active_reel != Some(reel_index) {
            log::warn!(
                "Unexpected settle signal for reel {reel_index} (active: {:?})",
                self.round.active_reel
            );
            return;
        }

        for unit in &mut self.reels[reel_index] {
            unit.halt(self.geometry);
        }
        self.grid.mark_settled(reel_index);

        let symbols = (0..ROW_COUNT)
            .map(|row| self.reels[reel_index][self.grid.unit_at(row, reel_index)].symbol())
            .collect();
        self.emit(Stage::ReelStop {
            reel_index: reel_index as u8,
            symbols,
        });
        log::debug!("Reel {reel_index} settled at {:.0}ms", self.session_ms);

        if reel_index + 1 < REEL_COUNT {
            self.arm_stopper(reel_index + 1);
        } else {
            self.round.active_reel = None;
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        self.emit(Stage::EvaluateWins);

        let result = self.evaluator.evaluate(&self.cells());
        for win in &result.line_wins {
            self.emit(Stage::WinLineShow {
                line_index: win.line_index,
                run_length: win.run_length,
                score: win.score,
            });
        }
        if result.is_win() {
            self.emit(Stage::WinPresent {
                score: result.total_score,
                line_count: result.line_wins.len() as u8,
            });
        }

        let score = result.total_score;
        self.stats.record(&result);
        self.round.result = result;
        self.can_spin = true;
        self.emit(Stage::SpinEnd { score });

        log::info!(
            "Round {} scored {} ({} winning lines)",
            self.round.spin_id,
            score,
            self.round.result.line_wins.len()
        );
    }

    /// Resolve the grid's unit references into evaluator cells
    fn cells(&self) -> CellGrid {
        let half = self.config.symbol_size / 2.0;
        std::array::from_fn(|row| {
            std::array::from_fn(|reel| {
                let unit = &self.reels[reel][self.grid.unit_at(row, reel)];
                GridCell {
                    symbol: unit.symbol(),
                    center: Point::new(unit.x() + half, unit.position() + half),
                }
            })
        })
    }

    fn emit(&mut self, stage: Stage) {
        let event = StageEvent::new(stage, self.session_ms);
        self.listener.on_stage(&event);
        self.trace.push(event);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Is the machine idle and ready for a spin?
    pub fn can_spin(&self) -> bool {
        self.can_spin
    }

    /// Reel whose stopper is currently armed
    pub fn active_reel(&self) -> Option<usize> {
        self.round.active_reel
    }

    /// Score of the last finished round (0 while spinning)
    pub fn score(&self) -> u64 {
        self.round.result.total_score
    }

    /// Winning lines of the last finished round
    pub fn winning_lines(&self) -> &[LineWin] {
        &self.round.result.line_wins
    }

    /// Point traces of the winning lines
    pub fn line_traces(&self) -> Vec<&[Point]> {
        self.round.result.traces()
    }

    /// Current or last round
    pub fn round(&self) -> &SpinRound {
        &self.round
    }

    pub fn result_grid(&self) -> &ResultGrid {
        &self.grid
    }

    /// Symbol types of settled cells, `[row][reel]`
    pub fn visible_symbols(&self) -> [[Option<u8>; REEL_COUNT]; ROW_COUNT] {
        std::array::from_fn(|row| {
            std::array::from_fn(|reel| {
                self.grid
                    .is_settled(reel)
                    .then(|| self.reels[reel][self.grid.unit_at(row, reel)].symbol())
            })
        })
    }

    /// Stage events of the current or last round
    pub fn last_trace(&self) -> &StageTrace {
        &self.trace
    }

    /// Every unit, reel by reel
    pub fn units(&self) -> impl Iterator<Item = UnitView> + '_ {
        self.reels.iter().flatten().map(|unit| UnitView {
            symbol: unit.symbol(),
            reel_index: unit.reel_index(),
            x: unit.x(),
            y: unit.position(),
        })
    }

    /// Units of one reel
    pub fn reel(&self, reel: usize) -> &[SymbolUnit] {
        &self.reels[reel]
    }

    /// Pixel offset of the first visible row once reels have settled
    pub fn visible_window_top(&self) -> f64 {
        self.geometry.slot_offset(self.config.stop_runway_slots as usize)
    }

    /// Simulated session time in milliseconds
    pub fn session_ms(&self) -> f64 {
        self.session_ms
    }
}
