//! Error types for the reel core
//!
//! Only construction can fail. A running machine has no recoverable errors:
//! busy spin requests are ignored, not rejected.

use thiserror::Error;

/// Configuration contract violations, reported before a machine exists
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid symbol set: {0}")]
    InvalidSymbols(String),

    #[error("Wild symbol {wild} outside symbol range 0..{kinds}")]
    WildOutOfRange { wild: u8, kinds: u8 },

    #[error("Invalid payline {index}: {reason}")]
    InvalidPayline { index: u8, reason: String },

    #[error("Invalid parameter {name}: {value}")]
    InvalidParam { name: &'static str, value: f64 },

    #[error("Stop runway of {0} slots must be below one reel cycle")]
    InvalidRunway(u8),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias
pub type ConfigResult<T> = Result<T, ConfigError>;
