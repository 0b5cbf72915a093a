use chrono::{DateTime, Utc};

use crate::core::{ScrubParams, ScrubPoint, format_hover_date};

/// Host-side hooks of a [`ScrubController`](super::ScrubController).
///
/// Every method is called on the main thread, from
/// `ScrubController::process_pending`, never from the gesture thread.
pub trait ScrubHost {
    /// Resolves the sample under pixel `x`. `None` means no data there.
    fn marker_at(&self, x: f64) -> Option<ScrubPoint>;

    fn on_scrub_start(&mut self) {}

    fn on_scrub(&mut self, params: ScrubParams) {
        let _ = params;
    }

    fn on_scrub_end(&mut self) {}

    /// Fired once per gesture, when scrubbing starts.
    fn haptic_feedback(&mut self) {}

    /// Text for the hover date label. `None` or an empty string leaves the
    /// current text in place.
    fn format_hover_date(&self, date: DateTime<Utc>, period: &str) -> Option<String> {
        format_hover_date(date, period)
    }
}
