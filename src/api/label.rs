use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::{AnimatedValue, TimingConfig, ValueTick};
use crate::core::{LabelLayout, LabelPosition, position_label_in_row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelKind {
    Min,
    Max,
}

/// Stateful min/max label: keeps its measured box, target and fade-in.
#[derive(Debug)]
pub struct MinMaxLabel {
    layout: LabelLayout,
    target_x: Option<f64>,
    position: LabelPosition,
    opacity: AnimatedValue,
    fade: TimingConfig,
    row_height: f64,
}

impl MinMaxLabel {
    #[must_use]
    pub fn new(fade: TimingConfig, row_height: f64) -> Self {
        Self {
            layout: LabelLayout::default(),
            target_x: None,
            position: LabelPosition::Hidden,
            opacity: AnimatedValue::new(0.0),
            fade,
            row_height,
        }
    }

    #[must_use]
    pub fn layout(&self) -> LabelLayout {
        self.layout
    }

    #[must_use]
    pub fn position(&self) -> LabelPosition {
        self.position
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    pub fn set_layout(&mut self, layout: LabelLayout) {
        self.layout = layout;
    }

    pub fn set_target_x(&mut self, target_x: f64) {
        self.target_x = Some(target_x);
    }

    /// Recomputes placement.
    ///
    /// Until the label has been measured (and given a target) opacity is
    /// forced to 0; afterwards a fade-in to 1 starts unless one already ran.
    pub fn reposition(&mut self, container_width: f64, gutter: f64) -> LabelPosition {
        self.position = match self.target_x {
            Some(target_x) => position_label_in_row(
                target_x,
                self.layout,
                container_width,
                gutter,
                self.row_height,
            ),
            None => LabelPosition::Hidden,
        };

        match self.position {
            LabelPosition::Hidden => self.opacity.set_value(0.0),
            LabelPosition::Visible { .. } => {
                let settled = self.opacity.value() >= 1.0 && !self.opacity.is_animating();
                if !settled && self.opacity.target() != Some(1.0) {
                    trace!(layout = ?self.layout, "min/max label fade in");
                    self.opacity.animate_to(1.0, self.fade);
                }
            }
        }
        self.position
    }

    /// Advances the fade. Returns `true` while it is still running.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.opacity.tick(dt_ms) == ValueTick::Running
    }
}
