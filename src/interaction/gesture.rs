use std::sync::Arc;

use tracing::trace;

use crate::core::map_position_to_clamped;

use super::dispatch::{MainThreadSender, ScrubMessage};
use super::shared::{GestureState, SharedScrubState};

/// Gesture-thread half of the scrub state machine.
///
/// Runs wherever the platform delivers touch events. It only clamps positions,
/// writes the shared marker cell and posts [`ScrubMessage`]s; host callbacks are
/// never reached from here.
#[derive(Debug)]
pub struct ScrubGesture {
    shared: Arc<SharedScrubState>,
    sender: MainThreadSender,
    armed: bool,
}

impl ScrubGesture {
    pub(crate) fn new(shared: Arc<SharedScrubState>, sender: MainThreadSender) -> Self {
        Self {
            shared,
            sender,
            armed: false,
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.shared.gesture_state()
    }

    /// Gesture began at pointer offset `x`.
    ///
    /// Also emits the first position update, since some platforms never send
    /// one for the touch-down location. A repeated start while armed only moves
    /// the marker. Returns `false` when scrubbing is currently disabled.
    pub fn on_start(&mut self, x: f64) -> bool {
        if !self.shared.is_enabled() {
            trace!(x, "scrub start ignored while disabled");
            return false;
        }

        if self.armed {
            trace!(x, "scrub start while armed, treated as a move");
            return self.on_update(x);
        }

        self.armed = true;
        // marker first: an idle state hides it until the state flips
        let marker_x = self.move_marker(x);
        self.shared.set_gesture_state(GestureState::Engaged);
        self.sender.post(ScrubMessage::Start);
        self.sender.post(ScrubMessage::Update { x: marker_x });
        true
    }

    /// Pointer moved. Updates arriving before `on_start` are dropped.
    pub fn on_update(&mut self, x: f64) -> bool {
        if !self.armed {
            return false;
        }

        if self.shared.gesture_state() == GestureState::Engaged {
            self.shared.set_gesture_state(GestureState::Scrubbing);
        }
        let marker_x = self.move_marker(x);
        self.sender.post(ScrubMessage::Update { x: marker_x });
        true
    }

    pub fn on_end(&mut self) -> bool {
        self.release(false)
    }

    pub fn on_cancel(&mut self) -> bool {
        self.release(true)
    }

    fn release(&mut self, cancelled: bool) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        self.shared.set_gesture_state(GestureState::Released);
        self.sender.post(ScrubMessage::End { cancelled });
        true
    }

    fn move_marker(&self, x: f64) -> f64 {
        let geometry = self.shared.geometry();
        let marker_x = map_position_to_clamped(
            x,
            geometry.element_width,
            geometry.container_width,
            geometry.gutter,
        );
        self.shared.set_marker_x(marker_x);
        marker_x
    }
}
