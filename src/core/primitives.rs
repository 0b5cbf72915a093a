/// Number of decimal digits kept when feeding animation progress to interpolators.
pub const PROGRESS_PRECISION_DIGITS: i32 = 4;

/// Rounds `value` to `digits` decimal places.
#[must_use]
pub fn round_to_precision(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Rounds animation progress to the stable precision used by path frames.
#[must_use]
pub fn round_progress(progress: f64) -> f64 {
    round_to_precision(progress.clamp(0.0, 1.0), PROGRESS_PRECISION_DIGITS)
}
