use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::animation::{AnimatedValue, TimingConfig, ValueTick};

use super::width::GlyphWidths;

/// How a digit column moves from its previous to its new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitTransitionVariant {
    /// Rolls through every intermediate digit; direction follows the numeric change.
    #[default]
    Every,
    /// Crossfades straight to the new digit over one row; direction is taken as supplied.
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollDirection {
    Up,
    Down,
}

impl RollDirection {
    /// Direction implied by a numeric change. Equal values count as `Up`.
    #[must_use]
    pub fn from_delta<T: PartialOrd>(previous: T, value: T) -> Self {
        if value >= previous { Self::Up } else { Self::Down }
    }
}

/// Side of the row the outgoing digit occupies during a single-step crossfade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigitSide {
    Top,
    Bottom,
}

/// One decimal position of a rolling number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitState {
    pub value: u8,
    pub previous_value: u8,
    pub direction: RollDirection,
}

impl DigitState {
    #[must_use]
    pub fn settled(value: u8) -> Self {
        Self {
            value,
            previous_value: value,
            direction: RollDirection::Up,
        }
    }
}

/// Geometry of one digit transition, independent of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DigitRollPlan {
    Every {
        /// Digits rendered top to bottom, lowest first.
        column: SmallVec<[u8; 10]>,
        distance_rows: u8,
        direction: RollDirection,
    },
    Single {
        outgoing: u8,
        incoming: u8,
        direction: RollDirection,
        outgoing_side: DigitSide,
    },
}

impl DigitRollPlan {
    #[must_use]
    pub fn direction(&self) -> RollDirection {
        match self {
            Self::Every { direction, .. } | Self::Single { direction, .. } => *direction,
        }
    }

    /// Rows travelled by the transition.
    #[must_use]
    pub fn distance_rows(&self) -> u8 {
        match self {
            Self::Every { distance_rows, .. } => *distance_rows,
            Self::Single { .. } => 1,
        }
    }
}

/// Plans the roll for `state`. Returns `None` when there is nothing to animate.
///
/// `Every` derives its direction from `value - previous_value`; `Single` uses
/// `state.direction` as given, even when it contradicts the numeric change.
#[must_use]
pub fn plan_roll(state: DigitState, variant: DigitTransitionVariant) -> Option<DigitRollPlan> {
    if state.value == state.previous_value {
        return None;
    }

    let plan = match variant {
        DigitTransitionVariant::Every => {
            let low = state.value.min(state.previous_value);
            let high = state.value.max(state.previous_value);
            DigitRollPlan::Every {
                column: (low..=high).collect(),
                distance_rows: high - low,
                direction: RollDirection::from_delta(state.previous_value, state.value),
            }
        }
        DigitTransitionVariant::Single => DigitRollPlan::Single {
            outgoing: state.previous_value,
            incoming: state.value,
            direction: state.direction,
            outgoing_side: match state.direction {
                RollDirection::Up => DigitSide::Top,
                RollDirection::Down => DigitSide::Bottom,
            },
        },
    };
    Some(plan)
}

/// Transform of a digit column at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DigitFrame {
    Static {
        digit: u8,
    },
    Column {
        translate_y: f64,
    },
    Crossfade {
        outgoing_translate_y: f64,
        outgoing_opacity: f64,
        incoming_translate_y: f64,
        incoming_opacity: f64,
    },
}

impl DigitRollPlan {
    /// Transform at eased `progress` for rows of `row_height` pixels.
    #[must_use]
    pub fn frame_at(&self, progress: f64, row_height: f64) -> DigitFrame {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Every {
                distance_rows,
                direction,
                ..
            } => {
                let travel = f64::from(*distance_rows) * row_height;
                let (start, end) = match direction {
                    RollDirection::Up => (0.0, -travel),
                    RollDirection::Down => (-travel, 0.0),
                };
                DigitFrame::Column {
                    translate_y: start + (end - start) * p,
                }
            }
            Self::Single { direction, .. } => {
                let sign = match direction {
                    RollDirection::Up => -1.0,
                    RollDirection::Down => 1.0,
                };
                DigitFrame::Crossfade {
                    outgoing_translate_y: sign * row_height * p,
                    outgoing_opacity: 1.0 - p,
                    incoming_translate_y: -sign * row_height * (1.0 - p),
                    incoming_opacity: p,
                }
            }
        }
    }
}

/// Animated column for one decimal position.
#[derive(Debug)]
pub struct DigitRoller {
    variant: DigitTransitionVariant,
    timing: TimingConfig,
    row_height: f64,
    state: DigitState,
    plan: Option<DigitRollPlan>,
    progress: AnimatedValue,
    width: AnimatedValue,
}

impl DigitRoller {
    #[must_use]
    pub fn new(
        value: u8,
        variant: DigitTransitionVariant,
        timing: TimingConfig,
        row_height: f64,
        glyphs: &GlyphWidths,
    ) -> Self {
        Self {
            variant,
            timing,
            row_height,
            state: DigitState::settled(value),
            plan: None,
            progress: AnimatedValue::new(1.0),
            width: AnimatedValue::new(glyphs.width(value)),
        }
    }

    #[must_use]
    pub fn state(&self) -> DigitState {
        self.state
    }

    #[must_use]
    pub fn variant(&self) -> DigitTransitionVariant {
        self.variant
    }

    #[must_use]
    pub fn plan(&self) -> Option<&DigitRollPlan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.plan.is_some()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width.value()
    }

    /// Rolls to `value`. Returns `false` when `value` is already displayed.
    ///
    /// `direction` is only consulted by the `Single` variant. A call while a
    /// roll is in flight commits that roll first, so `previous_value` is always
    /// the last committed digit.
    pub fn set_value(&mut self, value: u8, direction: RollDirection, glyphs: &GlyphWidths) -> bool {
        if value == self.state.value {
            return false;
        }

        let previous_value = self.state.value;
        self.state = DigitState {
            value,
            previous_value,
            direction: match self.variant {
                DigitTransitionVariant::Every => RollDirection::from_delta(previous_value, value),
                DigitTransitionVariant::Single => direction,
            },
        };
        self.plan = plan_roll(self.state, self.variant);
        trace!(
            previous_value,
            value,
            variant = ?self.variant,
            "digit roll"
        );

        self.progress.set_value(0.0);
        self.progress.animate_to(1.0, self.timing);
        // from the current width, which is mid-tween when retargeted
        self.width.animate_to(glyphs.width(value), self.timing);
        if !self.progress.is_animating() {
            self.plan = None;
        }
        true
    }

    /// Advances the roll. Returns `true` while still rolling.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.width.tick(dt_ms);
        if self.progress.tick(dt_ms) == ValueTick::Finished {
            self.plan = None;
        }
        self.is_rolling()
    }

    #[must_use]
    pub fn frame(&self) -> DigitFrame {
        match &self.plan {
            Some(plan) => plan.frame_at(self.progress.value(), self.row_height),
            None => DigitFrame::Static {
                digit: self.state.value,
            },
        }
    }
}
