use serde::{Deserialize, Serialize};

use crate::animation::{MotionCurve, MotionDuration, TimingConfig};
use crate::core::LABEL_ROW_HEIGHT;
use crate::error::{SparklineError, SparklineResult};
use crate::interaction::ScrubGeometry;
use crate::rolling::{NumberFormatter, RollingNumber, RollingNumberOptions};

use super::validation::validate_config;

/// Public sparkline bootstrap configuration.
///
/// Serializable so hosts can persist/load their setup as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineConfig {
    pub container_width: f64,
    /// Width of the element centred on the pointer (hover marker/date label).
    #[serde(default = "default_marker_width")]
    pub marker_width: f64,
    #[serde(default = "default_gutter")]
    pub gutter: f64,
    /// Period identifier forwarded with every scrub update.
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default = "default_enter_timing")]
    pub enter_timing: TimingConfig,
    #[serde(default = "default_exit_timing")]
    pub exit_timing: TimingConfig,
    #[serde(default = "default_label_fade_timing")]
    pub label_fade_timing: TimingConfig,
    #[serde(default = "default_morph_timing")]
    pub morph_timing: TimingConfig,
    #[serde(default = "default_label_row_height")]
    pub label_row_height: f64,
    /// Quiet period after the last host scroll event before scrubbing resumes.
    #[serde(default = "default_scroll_debounce_ms")]
    pub scroll_debounce_ms: f64,
    /// Digit settings for the headline number; see [`SparklineConfig::rolling_number`].
    #[serde(default)]
    pub rolling: RollingNumberOptions,
}

impl SparklineConfig {
    #[must_use]
    pub fn new(container_width: f64) -> Self {
        Self {
            container_width,
            marker_width: default_marker_width(),
            gutter: default_gutter(),
            period: default_period(),
            enter_timing: default_enter_timing(),
            exit_timing: default_exit_timing(),
            label_fade_timing: default_label_fade_timing(),
            morph_timing: default_morph_timing(),
            label_row_height: default_label_row_height(),
            scroll_debounce_ms: default_scroll_debounce_ms(),
            rolling: RollingNumberOptions::default(),
        }
    }

    #[must_use]
    pub fn with_marker_width(mut self, marker_width: f64) -> Self {
        self.marker_width = marker_width;
        self
    }

    #[must_use]
    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.gutter = gutter;
        self
    }

    #[must_use]
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    /// Sets both enter and exit timings of the scrub overlay.
    #[must_use]
    pub fn with_overlay_timing(mut self, timing: TimingConfig) -> Self {
        self.enter_timing = timing;
        self.exit_timing = timing;
        self
    }

    #[must_use]
    pub fn with_label_fade_timing(mut self, timing: TimingConfig) -> Self {
        self.label_fade_timing = timing;
        self
    }

    #[must_use]
    pub fn with_morph_timing(mut self, timing: TimingConfig) -> Self {
        self.morph_timing = timing;
        self
    }

    #[must_use]
    pub fn with_label_row_height(mut self, label_row_height: f64) -> Self {
        self.label_row_height = label_row_height;
        self
    }

    #[must_use]
    pub fn with_scroll_debounce_ms(mut self, scroll_debounce_ms: f64) -> Self {
        self.scroll_debounce_ms = scroll_debounce_ms;
        self
    }

    #[must_use]
    pub fn with_rolling_options(mut self, rolling: RollingNumberOptions) -> Self {
        self.rolling = rolling;
        self
    }

    #[must_use]
    pub fn geometry(&self) -> ScrubGeometry {
        ScrubGeometry::new(self.marker_width, self.container_width, self.gutter)
    }

    /// Rolling number for the headline value, built from the `rolling` options.
    #[must_use]
    pub fn rolling_number<F: NumberFormatter>(&self, formatter: F) -> RollingNumber<F> {
        RollingNumber::new(formatter, self.rolling)
    }

    pub fn validate(&self) -> SparklineResult<()> {
        validate_config(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> SparklineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SparklineError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> SparklineResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| SparklineError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_marker_width() -> f64 {
    30.0
}

fn default_gutter() -> f64 {
    8.0
}

fn default_period() -> String {
    "day".to_owned()
}

fn default_enter_timing() -> TimingConfig {
    TimingConfig::new(MotionDuration::Fast2, MotionCurve::Productive)
}

fn default_exit_timing() -> TimingConfig {
    TimingConfig::new(MotionDuration::Fast2, MotionCurve::Productive)
}

fn default_label_fade_timing() -> TimingConfig {
    TimingConfig::new(MotionDuration::Moderate1, MotionCurve::Productive)
}

fn default_morph_timing() -> TimingConfig {
    TimingConfig::new(MotionDuration::Slow1, MotionCurve::Expressive)
}

fn default_label_row_height() -> f64 {
    LABEL_ROW_HEIGHT
}

fn default_scroll_debounce_ms() -> f64 {
    150.0
}
