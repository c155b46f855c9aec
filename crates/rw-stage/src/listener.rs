//! StageListener: Injected notification capability
//!
//! The reel core owns one listener and calls it synchronously, inside the
//! frame update that produced the stage.

use crate::event::StageEvent;

/// Receiver of stage notifications
pub trait StageListener {
    fn on_stage(&mut self, event: &StageEvent);
}

/// Listener that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl StageListener for NullListener {
    fn on_stage(&mut self, _event: &StageEvent) {}
}

impl<F> StageListener for F
where
    F: FnMut(&StageEvent),
{
    fn on_stage(&mut self, event: &StageEvent) {
        self(event)
    }
}
