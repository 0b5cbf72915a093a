use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time-series sample with its resolved pixel x-coordinate.
///
/// Produced by the host chart layer; the core never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubPoint {
    pub x: f64,
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl ScrubPoint {
    #[must_use]
    pub fn new(x: f64, date: DateTime<Utc>, value: f64) -> Self {
        Self { x, date, value }
    }
}

/// Payload emitted to the host on every scrub update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubParams {
    pub point: ScrubPoint,
    pub period: String,
}

/// Post-render measurement of a label element.
///
/// Both dimensions stay at `0.0` until the host reports the first layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub width: f64,
    pub height: f64,
}

impl LabelLayout {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_measured(self) -> bool {
        !(self.width == 0.0 && self.height == 0.0)
    }
}
