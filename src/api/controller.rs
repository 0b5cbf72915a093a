use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::animation::DebounceTimer;
use crate::core::{LabelLayout, LabelPosition, ScrubParams};
use crate::error::SparklineResult;
use crate::interaction::{
    GestureState, MainThreadReceiver, MainThreadSender, ScrubGesture, ScrubMessage,
    SharedScrubState, main_thread_channel,
};
use crate::path::{MultiSeriesMorph, SeriesFrame, SeriesTransition};

use super::SparklineConfig;
use super::host::ScrubHost;
use super::label::{LabelKind, MinMaxLabel};
use super::overlay::ScrubOverlay;
use super::validation::validate_container_width;

/// Main-thread owner of a scrubbable sparkline.
///
/// Gesture worklets obtained through [`ScrubController::gesture`] may live on
/// any thread; their work is queued and replayed here by
/// [`ScrubController::process_pending`]. Animation time only moves through
/// [`ScrubController::tick`].
pub struct ScrubController<H: ScrubHost> {
    host: H,
    config: SparklineConfig,
    shared: Arc<SharedScrubState>,
    sender: MainThreadSender,
    receiver: MainThreadReceiver,
    overlay: ScrubOverlay,
    hover_date: Option<String>,
    active: bool,
    min_label: MinMaxLabel,
    max_label: MinMaxLabel,
    scroll_debounce: DebounceTimer,
    series: MultiSeriesMorph,
    disposed: bool,
}

impl<H: ScrubHost> ScrubController<H> {
    pub fn new(host: H, config: SparklineConfig) -> SparklineResult<Self> {
        config.validate()?;

        let shared = Arc::new(SharedScrubState::new(config.geometry()));
        let (sender, receiver) = main_thread_channel();
        let label = || MinMaxLabel::new(config.label_fade_timing, config.label_row_height);

        Ok(Self {
            host,
            shared,
            sender,
            receiver,
            overlay: ScrubOverlay::new(),
            hover_date: None,
            active: false,
            min_label: label(),
            max_label: label(),
            scroll_debounce: DebounceTimer::new(config.scroll_debounce_ms),
            series: MultiSeriesMorph::new(config.morph_timing),
            disposed: false,
            config,
        })
    }

    /// New gesture worklet bound to this controller.
    #[must_use]
    pub fn gesture(&self) -> ScrubGesture {
        ScrubGesture::new(Arc::clone(&self.shared), self.sender.clone())
    }

    #[must_use]
    pub fn shared_state(&self) -> Arc<SharedScrubState> {
        Arc::clone(&self.shared)
    }

    #[must_use]
    pub fn config(&self) -> &SparklineConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Marker translation; [`MARKER_OFFSCREEN`](crate::interaction::MARKER_OFFSCREEN)
    /// while nothing is scrubbed.
    #[must_use]
    pub fn marker_x(&self) -> f64 {
        self.shared.marker_x()
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.shared.gesture_state()
    }

    #[must_use]
    pub fn is_scrubbing(&self) -> bool {
        self.active
    }

    pub fn set_container_width(&mut self, container_width: f64) -> SparklineResult<()> {
        self.config.container_width = validate_container_width(container_width)?;
        self.shared.set_geometry(self.config.geometry());
        self.min_label
            .reposition(self.config.container_width, self.config.gutter);
        self.max_label
            .reposition(self.config.container_width, self.config.gutter);
        Ok(())
    }

    pub fn set_period(&mut self, period: impl Into<String>) {
        self.config.period = period.into();
    }

    /// Replays queued gesture work in posting order. Returns how many messages ran.
    pub fn process_pending(&mut self) -> usize {
        if self.disposed {
            return 0;
        }

        let messages: SmallVec<[ScrubMessage; 8]> = self.receiver.drain().collect();
        for message in &messages {
            match *message {
                ScrubMessage::Start => self.handle_start(),
                ScrubMessage::Update { x } => self.handle_update(x),
                ScrubMessage::End { cancelled } => self.handle_end(cancelled),
            }
        }
        messages.len()
    }

    fn handle_start(&mut self) {
        debug!(period = %self.config.period, "scrub start");
        self.active = true;
        self.host.on_scrub_start();
        self.host.haptic_feedback();
        self.overlay.enter(self.config.enter_timing);
    }

    fn handle_update(&mut self, x: f64) {
        let Some(point) = self.host.marker_at(x) else {
            trace!(x, "no data under marker");
            return;
        };

        match self.host.format_hover_date(point.date, &self.config.period) {
            Some(text) if !text.is_empty() => self.hover_date = Some(text),
            _ => trace!(date = %point.date, "hover date left unchanged"),
        }

        self.host.on_scrub(ScrubParams {
            point,
            period: self.config.period.clone(),
        });
    }

    fn handle_end(&mut self, cancelled: bool) {
        debug!(cancelled, "scrub end");
        self.active = false;
        self.overlay.exit(self.config.exit_timing);
        self.host.on_scrub_end();
    }

    /// Advances every animation owned by the controller by `dt_ms`.
    ///
    /// Returns `true` while anything is still moving.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if self.disposed {
            return false;
        }

        if self.overlay.tick(dt_ms) && self.shared.settle_released() {
            trace!("scrub overlay settled");
        }
        let min_fading = self.min_label.tick(dt_ms);
        let max_fading = self.max_label.tick(dt_ms);

        if self.scroll_debounce.tick(dt_ms) {
            debug!("scroll settled, scrubbing enabled");
            self.shared.set_enabled(true);
        }

        let series_running = self.series.tick(dt_ms);
        series_running
            || min_fading
            || max_fading
            || self.scroll_debounce.is_pending()
            || self.overlay.is_animating()
    }

    /// Host container scrolled: scrubbing is disabled until scrolling has been
    /// quiet for `scroll_debounce_ms`.
    pub fn notify_scroll(&mut self) {
        if self.disposed {
            return;
        }
        if self.shared.is_enabled() {
            debug!("scroll started, scrubbing disabled");
        }
        self.shared.set_enabled(false);
        self.scroll_debounce.arm();
    }

    #[must_use]
    pub fn is_scrub_enabled(&self) -> bool {
        self.shared.is_enabled()
    }

    fn label_mut(&mut self, kind: LabelKind) -> &mut MinMaxLabel {
        match kind {
            LabelKind::Min => &mut self.min_label,
            LabelKind::Max => &mut self.max_label,
        }
    }

    #[must_use]
    pub fn label(&self, kind: LabelKind) -> &MinMaxLabel {
        match kind {
            LabelKind::Min => &self.min_label,
            LabelKind::Max => &self.max_label,
        }
    }

    /// Pushes a layout measurement for a min/max label.
    pub fn set_label_layout(&mut self, kind: LabelKind, layout: LabelLayout) -> LabelPosition {
        let (container_width, gutter) = (self.config.container_width, self.config.gutter);
        let label = self.label_mut(kind);
        label.set_layout(layout);
        label.reposition(container_width, gutter)
    }

    /// Sets the x offset of the extreme point a min/max label annotates.
    pub fn set_label_target(&mut self, kind: LabelKind, target_x: f64) -> LabelPosition {
        let (container_width, gutter) = (self.config.container_width, self.config.gutter);
        let label = self.label_mut(kind);
        label.set_target_x(target_x);
        label.reposition(container_width, gutter)
    }

    #[must_use]
    pub fn label_position(&self, kind: LabelKind) -> LabelPosition {
        self.label(kind).position()
    }

    /// Label opacity, combining its own fade with the scrub overlay fade.
    #[must_use]
    pub fn label_opacity(&self, kind: LabelKind) -> f64 {
        self.label(kind).opacity() * self.overlay.min_max_opacity()
    }

    #[must_use]
    pub fn hover_date(&self) -> Option<&str> {
        self.hover_date.as_deref()
    }

    #[must_use]
    pub fn marker_opacity(&self) -> f64 {
        self.overlay.marker_opacity()
    }

    #[must_use]
    pub fn hover_date_opacity(&self) -> f64 {
        self.overlay.hover_date_opacity()
    }

    #[must_use]
    pub fn min_max_opacity(&self) -> f64 {
        self.overlay.min_max_opacity()
    }

    /// Morphs the drawn series to new shapes.
    pub fn set_series(&mut self, transitions: &[SeriesTransition]) {
        if self.disposed {
            return;
        }
        self.series.set_transitions(transitions);
    }

    #[must_use]
    pub fn series_frames(&self) -> Vec<SeriesFrame> {
        self.series.frames()
    }

    /// Latest frame of the leading series.
    #[must_use]
    pub fn reported_frame(&self) -> Option<SeriesFrame> {
        self.series.reported_frame()
    }

    /// Stops every animation, drops pending gesture work and cancels the
    /// scroll debounce. Later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.scroll_debounce.cancel();
        self.overlay.stop();
        self.series.dispose();
        let dropped = self.receiver.drain().count();
        debug!(dropped, "scrub controller disposed");
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
