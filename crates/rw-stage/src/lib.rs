//! # rw-stage: Reelwright Stage System
//!
//! Defines the semantic moments of a spin round that the reel core reports
//! to the outside world (sound cues, UI, recorders).
//!
//! ## Philosophy
//!
//! The core never plays a sound or draws a frame. It only announces STAGES:
//! - Spin starts → Reels stop one by one → Wins evaluated → Spin ends
//!
//! Collaborators subscribe through [`StageListener`] and decide what each
//! stage means for them.

pub mod event;
pub mod listener;
pub mod stage;
pub mod trace;

pub use event::*;
pub use listener::*;
pub use stage::*;
pub use trace::*;
