//! Machine configuration
//!
//! Everything here is static for the lifetime of a machine. It is checked
//! once by [`SlotConfig::validate`] and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::paytable::{Payline, standard_25_paylines};

/// Number of reels (columns)
pub const REEL_COUNT: usize = 5;

/// Number of visible rows scored per reel
pub const ROW_COUNT: usize = 3;

/// Symbol units per reel, one full reel cycle
pub const SLOTS_PER_REEL: usize = 10;

/// Visible row whose unit is marked as the reel's stopper
pub const MIDDLE_ROW: usize = 1;

/// Labels of the default symbol set, in symbol-type order
pub const DEFAULT_SYMBOL_NAMES: [&str; 10] = [
    "elephant", "giraffe", "hippo", "monkey", "panda", "parrot", "penguin", "pig", "rabbit",
    "snake",
];

/// Complete machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Number of distinct symbol types
    pub symbol_kinds: u8,

    /// Symbol type that substitutes for any other on a payline
    pub wild_symbol: u8,

    /// Display labels per symbol type (empty = unnamed)
    pub symbol_names: Vec<String>,

    /// Row patterns scored after every round
    pub paylines: Vec<Payline>,

    /// Reel speed while spinning (pixels per second)
    pub spin_speed: f64,

    /// Vertical distance between two slots (pixels)
    pub slot_spacing: f64,

    /// Drawn symbol size (pixels), used for line-trace centre points
    pub symbol_size: f64,

    /// Extra slots a unit travels past its visible row before landing
    pub stop_runway_slots: u8,

    /// Seconds a stopper must spin before its arrival is honoured
    pub min_spin_duration: f64,

    /// Relabel symbol types randomly across each reel at construction
    pub shuffle_on_init: bool,
}

impl SlotConfig {
    /// Classic five-reel animal machine
    pub fn classic() -> Self {
        Self {
            symbol_kinds: 10,
            wild_symbol: 5,
            symbol_names: DEFAULT_SYMBOL_NAMES.iter().map(|s| s.to_string()).collect(),
            paylines: standard_25_paylines(),
            spin_speed: 500.0,
            slot_spacing: 53.0,
            symbol_size: 50.0,
            stop_runway_slots: 3,
            min_spin_duration: 1.0,
            shuffle_on_init: true,
        }
    }

    /// Faster reels and a shorter minimum spin
    pub fn turbo() -> Self {
        Self {
            spin_speed: 1000.0,
            min_spin_duration: 0.4,
            ..Self::classic()
        }
    }

    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document and validate it
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every construction-time contract
    pub fn validate(&self) -> ConfigResult<()> {
        if self.symbol_kinds == 0 || self.symbol_kinds as usize > SLOTS_PER_REEL {
            return Err(ConfigError::InvalidSymbols(format!(
                "{} symbol kinds, expected 1..={}",
                self.symbol_kinds, SLOTS_PER_REEL
            )));
        }
        if self.wild_symbol >= self.symbol_kinds {
            return Err(ConfigError::WildOutOfRange {
                wild: self.wild_symbol,
                kinds: self.symbol_kinds,
            });
        }
        if !self.symbol_names.is_empty() && self.symbol_names.len() != self.symbol_kinds as usize {
            return Err(ConfigError::InvalidSymbols(format!(
                "{} names for {} symbol kinds",
                self.symbol_names.len(),
                self.symbol_kinds
            )));
        }

        if self.paylines.is_empty() {
            return Err(ConfigError::InvalidPayline {
                index: 0,
                reason: "no paylines configured".into(),
            });
        }
        for payline in &self.paylines {
            payline.validate()?;
        }

        check_positive("spin_speed", self.spin_speed)?;
        check_positive("slot_spacing", self.slot_spacing)?;
        check_positive("symbol_size", self.symbol_size)?;
        if !self.min_spin_duration.is_finite() || self.min_spin_duration < 0.0 {
            return Err(ConfigError::InvalidParam {
                name: "min_spin_duration",
                value: self.min_spin_duration,
            });
        }

        if self.stop_runway_slots as usize >= SLOTS_PER_REEL {
            return Err(ConfigError::InvalidRunway(self.stop_runway_slots));
        }

        Ok(())
    }

    /// Label for a symbol type, falls back to its number
    pub fn symbol_name(&self, symbol: u8) -> String {
        self.symbol_names
            .get(symbol as usize)
            .cloned()
            .unwrap_or_else(|| format!("#{symbol}"))
    }

    /// Reel geometry derived from this config
    pub fn geometry(&self) -> ReelGeometry {
        ReelGeometry {
            slot_spacing: self.slot_spacing,
        }
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::classic()
    }
}

fn check_positive(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParam { name, value })
    }
}

/// Pixel geometry of one reel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelGeometry {
    /// Distance between two slots
    pub slot_spacing: f64,
}

impl ReelGeometry {
    /// Length of one full reel cycle in pixels
    pub fn cycle_length(&self) -> f64 {
        self.slot_spacing * SLOTS_PER_REEL as f64
    }

    /// Pixel offset of a slot
    pub fn slot_offset(&self, slot: usize) -> f64 {
        slot as f64 * self.slot_spacing
    }
}
