//! Symbol units: the moving pieces of a reel
//!
//! A unit owns its own motion. Each frame it advances, wraps around the reel
//! cycle and, when it is the reel's designated stopper, detects arrival at
//! its target slot. Arrival is reported as a return value; the unit never
//! reaches into the controller.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::{ReelGeometry, SLOTS_PER_REEL};

/// Emitted once by the stopper unit when its reel has settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelSettled {
    pub reel_index: usize,
}

/// One symbol on one reel
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolUnit {
    symbol: u8,
    reel_index: usize,
    x: f64,
    position: f64,
    previous_position: f64,
    velocity: f64,
    target_slot: usize,
    is_stopper: bool,
    min_spin_duration: f64,
    elapsed: f64,
}

impl SymbolUnit {
    /// Create an idle unit resting on `slot`
    pub fn new(symbol: u8, reel_index: usize, slot: usize, geometry: ReelGeometry) -> Self {
        let position = geometry.slot_offset(slot);
        Self {
            symbol,
            reel_index,
            x: geometry.slot_spacing * reel_index as f64,
            position,
            previous_position: position,
            velocity: 0.0,
            target_slot: slot,
            is_stopper: false,
            min_spin_duration: 0.0,
            elapsed: 0.0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MOTION
    // ═══════════════════════════════════════════════════════════════════════

    /// Start spinning towards `target_slot`
    pub fn launch(&mut self, target_slot: usize, speed: f64) {
        self.target_slot = target_slot % SLOTS_PER_REEL;
        self.velocity = speed;
        self.is_stopper = false;
        self.previous_position = self.position;
    }

    /// Flag this unit as the one whose arrival ends its reel's spin
    pub fn mark_as_stopper(&mut self, min_duration: f64) {
        self.is_stopper = true;
        self.min_spin_duration = min_duration;
        self.elapsed = 0.0;
    }

    /// Stop now and snap onto the target slot
    ///
    /// Idempotent. Also drops the stopper flag so a unit halted from outside
    /// can never report a second settlement.
    pub fn halt(&mut self, geometry: ReelGeometry) {
        self.velocity = 0.0;
        self.is_stopper = false;
        self.position = geometry.slot_offset(self.target_slot);
    }

    /// Advance one frame of `dt` seconds
    pub fn advance(&mut self, dt: f64, geometry: ReelGeometry) -> Option<ReelSettled> {
        if !self.is_spinning() {
            return None;
        }

        self.elapsed += dt;
        if self.is_stopper && self.elapsed > self.min_spin_duration {
            let target = geometry.slot_offset(self.target_slot);
            if crossed(self.previous_position, self.position, target) {
                self.halt(geometry);
                self.previous_position = self.position;
                return Some(ReelSettled {
                    reel_index: self.reel_index,
                });
            }
        }

        self.previous_position = self.position;
        self.position = (self.position + self.velocity * dt).rem_euclid(geometry.cycle_length());
        None
    }

    // ═══════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    pub fn reel_index(&self) -> usize {
        self.reel_index
    }

    /// Horizontal pixel offset of the reel
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical pixel offset within the reel cycle
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target_slot(&self) -> usize {
        self.target_slot
    }

    pub fn is_stopper(&self) -> bool {
        self.is_stopper
    }

    pub fn is_spinning(&self) -> bool {
        self.velocity > 0.0
    }
}

/// Did the motion from `previous` to `current` pass `target`?
///
/// Edge-triggered: `previous < target <= current`. When the frame wrapped
/// around the cycle (`current < previous`) the passed range is everything
/// above `previous` plus everything up to `current`.
fn crossed(previous: f64, current: f64, target: f64) -> bool {
    if current >= previous {
        previous < target && target <= current
    } else {
        target > previous || target <= current
    }
}

/// Shuffle symbol labels across a reel's units
///
/// Units keep their place and identity; only the displayed type moves.
pub fn relabel_symbols<R: Rng + ?Sized>(units: &mut [SymbolUnit], rng: &mut R) {
    let mut symbols: Vec<u8> = units.iter().map(|u| u.symbol).collect();
    symbols.shuffle(rng);
    for (unit, symbol) in units.iter_mut().zip(symbols) {
        unit.symbol = symbol;
    }
}
