//! # rw-reels: Five-reel spin core for Reelwright
//!
//! Simulates a 5×3 video slot frame by frame: fifty symbol units spinning
//! on five reels, a left-to-right stop chain, and payline scoring with a
//! wild symbol.
//!
//! ## Features
//!
//! - **Symbol Units**: per-unit motion, wrap-around and edge-triggered arrival
//! - **Stop Chain**: each settled reel arms the stopper of the next one
//! - **Payline Evaluation**: 25 fixed lines, wild substitution, 10^run scoring
//! - **Stage Events**: spin/reel/win notifications through `rw-stage`
//!
//! ## Architecture
//!
//! ```text
//! SpinController
//!     │
//!     ├── SlotConfig (symbols, wild, paylines, speed, geometry)
//!     ├── 5 × 10 SymbolUnit
//!     ├── ResultGrid (3 × 5 unit references)
//!     └── PaylineEvaluator
//!           │
//!           v
//!     EvaluationResult + StageTrace
//! ```
//!
//! Rendering, audio and input are outside this crate. They drive
//! [`SpinController::advance_frame`] / [`SpinController::request_spin`]
//! and read the query surface.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod stats;
pub mod timing;
pub mod unit;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use paytable::*;
pub use stats::*;
pub use timing::*;
pub use unit::*;
