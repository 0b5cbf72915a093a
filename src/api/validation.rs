use crate::error::{SparklineError, SparklineResult};

use super::SparklineConfig;

pub(super) fn validate_config(config: &SparklineConfig) -> SparklineResult<()> {
    validate_container_width(config.container_width)?;
    if !config.marker_width.is_finite() || config.marker_width < 0.0 {
        return Err(SparklineError::InvalidConfig(
            "marker width must be finite and >= 0".to_owned(),
        ));
    }
    if !config.gutter.is_finite() || config.gutter < 0.0 {
        return Err(SparklineError::InvalidConfig(
            "gutter must be finite and >= 0".to_owned(),
        ));
    }
    if config.period.trim().is_empty() {
        return Err(SparklineError::InvalidConfig(
            "period must not be empty".to_owned(),
        ));
    }
    if !config.label_row_height.is_finite() || config.label_row_height <= 0.0 {
        return Err(SparklineError::InvalidConfig(
            "label row height must be finite and > 0".to_owned(),
        ));
    }
    if !config.scroll_debounce_ms.is_finite() || config.scroll_debounce_ms < 0.0 {
        return Err(SparklineError::InvalidConfig(
            "scroll debounce must be finite and >= 0".to_owned(),
        ));
    }
    if !config.rolling.row_height.is_finite() || config.rolling.row_height <= 0.0 {
        return Err(SparklineError::InvalidConfig(
            "rolling number row height must be finite and > 0".to_owned(),
        ));
    }
    config.rolling.glyphs.validate()?;
    if config.rolling.max_measurement_attempts == 0 {
        return Err(SparklineError::InvalidConfig(
            "max measurement attempts must be >= 1".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_container_width(container_width: f64) -> SparklineResult<f64> {
    if !container_width.is_finite() || container_width <= 0.0 {
        return Err(SparklineError::InvalidConfig(
            "container width must be finite and > 0".to_owned(),
        ));
    }
    Ok(container_width)
}

#[cfg(test)]
mod tests {
    use super::{validate_config, validate_container_width};
    use crate::api::SparklineConfig;
    use crate::error::SparklineError;
    use crate::rolling::GlyphWidths;

    #[test]
    fn container_width_rejects_non_positive() {
        let err = validate_container_width(0.0).expect_err("zero width must fail");
        assert!(format!("{err}").contains("container width"));
    }

    #[test]
    fn gutter_rejects_negative() {
        let config = SparklineConfig::new(300.0).with_gutter(-1.0);
        let err = validate_config(&config).expect_err("negative gutter must fail");
        assert!(format!("{err}").contains("gutter"));
    }

    #[test]
    fn period_rejects_blank() {
        let config = SparklineConfig::new(300.0).with_period("  ");
        let err = validate_config(&config).expect_err("blank period must fail");
        assert!(format!("{err}").contains("period"));
    }

    #[test]
    fn glyph_widths_reject_nan() {
        let mut widths = [10.0; 10];
        widths[7] = f64::NAN;
        let mut config = SparklineConfig::new(300.0);
        config.rolling.glyphs = GlyphWidths::new(widths);
        let err = validate_config(&config).expect_err("nan glyph must fail");
        assert!(matches!(err, SparklineError::InvalidData(_)));
        assert!(format!("{err}").contains("digit 7"));
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&SparklineConfig::new(300.0)).expect("defaults are valid");
    }
}
