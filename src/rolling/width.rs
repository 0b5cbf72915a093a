use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SparklineError, SparklineResult};

/// Default number of measurements accepted before settling on the last one.
pub const DEFAULT_MAX_MEASUREMENT_ATTEMPTS: u32 = 5;

/// Two widths closer than this are treated as the same measurement.
const WIDTH_EPSILON: f64 = 0.5;

/// Advance widths of the ten digit glyphs in the current font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphWidths([f64; 10]);

impl GlyphWidths {
    #[must_use]
    pub const fn new(widths: [f64; 10]) -> Self {
        Self(widths)
    }

    /// Tabular figures: every digit has the same advance.
    #[must_use]
    pub const fn uniform(width: f64) -> Self {
        Self([width; 10])
    }

    #[must_use]
    pub fn width(&self, digit: u8) -> f64 {
        self.0[usize::from(digit.min(9))]
    }

    pub fn validate(&self) -> SparklineResult<()> {
        if let Some(digit) = self.0.iter().position(|width| !width.is_finite() || *width < 0.0) {
            return Err(SparklineError::InvalidData(format!(
                "glyph width of digit {digit} must be finite and >= 0"
            )));
        }
        Ok(())
    }
}

impl Default for GlyphWidths {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Settles the rendered width of a text whose layout may take several passes.
///
/// A width is stable once two consecutive measurements agree. After
/// `max_attempts` measurements the last one is accepted as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthStabilizer {
    max_attempts: u32,
    attempts: u32,
    last_width: Option<f64>,
    stable_width: Option<f64>,
}

impl WidthStabilizer {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempts: 0,
            last_width: None,
            stable_width: None,
        }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn stable_width(&self) -> Option<f64> {
        self.stable_width
    }

    /// Starts over, e.g. after the text changed.
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.last_width = None;
        self.stable_width = None;
    }

    /// Feeds one measurement; returns the width once it is settled.
    pub fn record(&mut self, width: f64) -> Option<f64> {
        if let Some(stable) = self.stable_width {
            return Some(stable);
        }
        if !width.is_finite() || width < 0.0 {
            return None;
        }

        self.attempts += 1;
        let agrees = self
            .last_width
            .is_some_and(|last| (last - width).abs() < WIDTH_EPSILON);
        self.last_width = Some(width);

        if agrees {
            self.stable_width = Some(width);
        } else if self.attempts >= self.max_attempts {
            debug!(
                attempts = self.attempts,
                width, "text width did not settle, keeping last measurement"
            );
            self.stable_width = Some(width);
        }
        self.stable_width
    }
}

impl Default for WidthStabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MEASUREMENT_ATTEMPTS)
    }
}
