use crate::animation::{AnimatedValue, TimingConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayPhase {
    Hidden,
    Entering,
    Exiting,
}

/// Opacities that fade in parallel when scrubbing starts and ends.
#[derive(Debug)]
pub(super) struct ScrubOverlay {
    marker: AnimatedValue,
    min_max: AnimatedValue,
    hover_date: AnimatedValue,
    phase: OverlayPhase,
}

impl ScrubOverlay {
    pub(super) fn new() -> Self {
        Self {
            marker: AnimatedValue::new(0.0),
            min_max: AnimatedValue::new(1.0),
            hover_date: AnimatedValue::new(0.0),
            phase: OverlayPhase::Hidden,
        }
    }

    pub(super) fn enter(&mut self, timing: TimingConfig) {
        self.marker.animate_to(1.0, timing);
        self.min_max.animate_to(0.0, timing);
        self.hover_date.animate_to(1.0, timing);
        self.phase = OverlayPhase::Entering;
    }

    pub(super) fn exit(&mut self, timing: TimingConfig) {
        self.marker.animate_to(0.0, timing);
        self.min_max.animate_to(1.0, timing);
        self.hover_date.animate_to(0.0, timing);
        self.phase = OverlayPhase::Exiting;
    }

    /// Advances all fades. Returns `true` on the frame an exit completes.
    pub(super) fn tick(&mut self, dt_ms: f64) -> bool {
        self.marker.tick(dt_ms);
        self.min_max.tick(dt_ms);
        self.hover_date.tick(dt_ms);

        if !self.is_animating() && self.phase == OverlayPhase::Exiting {
            self.phase = OverlayPhase::Hidden;
            return true;
        }
        false
    }

    pub(super) fn is_animating(&self) -> bool {
        self.marker.is_animating() || self.min_max.is_animating() || self.hover_date.is_animating()
    }

    pub(super) fn stop(&mut self) {
        self.marker.stop();
        self.min_max.stop();
        self.hover_date.stop();
    }

    pub(super) fn marker_opacity(&self) -> f64 {
        self.marker.value()
    }

    pub(super) fn min_max_opacity(&self) -> f64 {
        self.min_max.value()
    }

    pub(super) fn hover_date_opacity(&self) -> f64 {
        self.hover_date.value()
    }
}
