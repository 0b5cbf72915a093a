use serde::{Deserialize, Serialize};

use super::easing::Easing;

/// Named duration tokens shared by every animated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionDuration {
    Instant,
    Fast1,
    Fast2,
    Fast3,
    Moderate1,
    Moderate2,
    Moderate3,
    Slow1,
    Slow2,
    Slow3,
}

impl MotionDuration {
    #[must_use]
    pub fn millis(self) -> f64 {
        match self {
            Self::Instant => 0.0,
            Self::Fast1 => 70.0,
            Self::Fast2 => 110.0,
            Self::Fast3 => 150.0,
            Self::Moderate1 => 240.0,
            Self::Moderate2 => 320.0,
            Self::Moderate3 => 400.0,
            Self::Slow1 => 500.0,
            Self::Slow2 => 700.0,
            Self::Slow3 => 1000.0,
        }
    }
}

/// Named curve tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionCurve {
    /// Quick, low-attention motion for utilitarian transitions.
    Productive,
    /// Emphasised motion for value changes the user should notice.
    Expressive,
    Linear,
    Custom(Easing),
}

impl MotionCurve {
    #[must_use]
    pub fn easing(self) -> Easing {
        match self {
            Self::Productive => Easing::CubicBezier(0.2, 0.0, 0.38, 0.9),
            Self::Expressive => Easing::CubicBezier(0.4, 0.14, 0.3, 1.0),
            Self::Linear => Easing::Linear,
            Self::Custom(easing) => easing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub duration: MotionDuration,
    pub curve: MotionCurve,
}

impl TimingConfig {
    #[must_use]
    pub const fn new(duration: MotionDuration, curve: MotionCurve) -> Self {
        Self { duration, curve }
    }

    #[must_use]
    pub fn duration_ms(self) -> f64 {
        self.duration.millis()
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(MotionDuration::Moderate1, MotionCurve::Productive)
    }
}

/// A single eased transition between two numbers, advanced by frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration_ms: f64,
    elapsed_ms: f64,
    easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: f64, to: f64, timing: TimingConfig) -> Self {
        Self {
            from,
            to,
            duration_ms: timing.duration_ms().max(0.0),
            elapsed_ms: 0.0,
            easing: timing.curve.easing(),
        }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed_ms / self.duration_ms;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Advances by `dt_ms` and returns the new value.
    pub fn step(&mut self, dt_ms: f64) -> f64 {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        self.value()
    }
}
