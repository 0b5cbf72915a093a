use std::fmt;

use tracing::{debug, trace};

use super::timing::TimingConfig;
use super::value::{AnimatedValue, ListenerId, ValueListener, ValueTick};

/// Index of the progress track inside an [`AnimationSequence`].
pub const PROGRESS_TRACK: usize = 0;

/// One tween of a sequence: drives `track` from its current value to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceStep {
    pub track: usize,
    pub to: f64,
    pub timing: TimingConfig,
}

/// Ordered list of tweens played one after another.
///
/// Track 0 is always the progress track (`0 -> 1`). Secondary tracks are
/// declared with their resting value and reset to it after every run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSequence {
    origins: Vec<f64>,
    steps: Vec<SequenceStep>,
}

impl AnimationSequence {
    /// Sequence with a single `0 -> 1` progress tween.
    #[must_use]
    pub fn progress(timing: TimingConfig) -> Self {
        Self {
            origins: vec![0.0],
            steps: vec![SequenceStep {
                track: PROGRESS_TRACK,
                to: 1.0,
                timing,
            }],
        }
    }

    /// Appends a secondary tween on a new track resting at `from`.
    ///
    /// Returns the track index alongside the extended sequence.
    #[must_use]
    pub fn then_secondary(mut self, from: f64, to: f64, timing: TimingConfig) -> (Self, usize) {
        let track = self.origins.len();
        self.origins.push(from);
        self.steps.push(SequenceStep { track, to, timing });
        (self, track)
    }

    #[must_use]
    pub fn track_count(&self) -> usize {
        self.origins.len()
    }

    #[must_use]
    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }
}

/// Result of advancing an [`InterruptibleAnimation`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverTick {
    Idle,
    Running,
    /// The last step completed naturally during this frame.
    Finished,
}

/// Plays an [`AnimationSequence`] with at most one run alive at a time.
///
/// `play()` while a run is in flight stops it, settles it synchronously (listener
/// detached, progress reset) and calls the interrupt handler before the new run
/// starts, so callers can snap their visuals to the final state first.
pub struct InterruptibleAnimation {
    sequence: AnimationSequence,
    tracks: Vec<AnimatedValue>,
    active_step: usize,
    running: bool,
    listener: Option<ValueListener>,
    attached: Option<ListenerId>,
    on_interrupt: Option<Box<dyn FnMut()>>,
    interruptions: u64,
}

impl InterruptibleAnimation {
    #[must_use]
    pub fn new(sequence: AnimationSequence) -> Self {
        let tracks = sequence
            .origins
            .iter()
            .map(|origin| AnimatedValue::new(*origin))
            .collect();
        Self {
            sequence,
            tracks,
            active_step: 0,
            running: false,
            listener: None,
            attached: None,
            on_interrupt: None,
            interruptions: 0,
        }
    }

    /// Sets the progress listener attached for the duration of each run.
    pub fn set_progress_listener(&mut self, listener: ValueListener) {
        self.listener = Some(listener);
    }

    pub fn set_on_interrupt(&mut self, handler: impl FnMut() + 'static) {
        self.on_interrupt = Some(Box::new(handler));
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.tracks[PROGRESS_TRACK].value()
    }

    /// Current value of a secondary track, `None` for unknown indices.
    #[must_use]
    pub fn track_value(&self, track: usize) -> Option<f64> {
        self.tracks.get(track).map(AnimatedValue::value)
    }

    /// Number of listeners currently attached to the progress track.
    #[must_use]
    pub fn attached_listener_count(&self) -> usize {
        self.tracks[PROGRESS_TRACK].listener_count()
    }

    #[must_use]
    pub fn interruptions(&self) -> u64 {
        self.interruptions
    }

    pub fn play(&mut self) {
        if self.running {
            self.interrupt();
        }

        self.running = true;
        if let Some(listener) = self.listener.clone() {
            self.attached = Some(self.tracks[PROGRESS_TRACK].add_listener(listener));
        }
        self.active_step = 0;
        self.start_active_step();
        trace!(steps = self.sequence.steps.len(), "animation run started");
    }

    pub fn tick(&mut self, dt_ms: f64) -> DriverTick {
        if !self.running {
            return DriverTick::Idle;
        }

        let Some(step) = self.sequence.steps.get(self.active_step).copied() else {
            self.finish();
            return DriverTick::Finished;
        };

        match self.tracks[step.track].tick(dt_ms) {
            ValueTick::Running => DriverTick::Running,
            ValueTick::Idle | ValueTick::Finished => {
                self.active_step += 1;
                if self.active_step >= self.sequence.steps.len() {
                    self.finish();
                    return DriverTick::Finished;
                }
                self.start_active_step();
                DriverTick::Running
            }
        }
    }

    /// Detaches every listener and stops, whatever the running state.
    pub fn dispose(&mut self) {
        for track in &mut self.tracks {
            track.stop();
            track.remove_all_listeners();
        }
        self.attached = None;
        self.running = false;
    }

    fn start_active_step(&mut self) {
        while let Some(step) = self.sequence.steps.get(self.active_step).copied() {
            let track = &mut self.tracks[step.track];
            track.animate_to(step.to, step.timing);
            if track.is_animating() {
                return;
            }
            // zero-length step, already applied
            self.active_step += 1;
        }
    }

    fn interrupt(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
        self.finish();
        self.interruptions = self.interruptions.saturating_add(1);
        debug!(
            interruptions = self.interruptions,
            "animation interrupted by replay"
        );
        if let Some(handler) = self.on_interrupt.as_mut() {
            handler();
        }
    }

    fn finish(&mut self) {
        if let Some(id) = self.attached.take() {
            self.tracks[PROGRESS_TRACK].remove_listener(id);
        }
        for (track, origin) in self.tracks.iter_mut().zip(&self.sequence.origins) {
            track.set_value(*origin);
        }
        self.active_step = 0;
        self.running = false;
    }
}

impl Drop for InterruptibleAnimation {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for InterruptibleAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterruptibleAnimation")
            .field("sequence", &self.sequence)
            .field("tracks", &self.tracks)
            .field("active_step", &self.active_step)
            .field("running", &self.running)
            .field("attached", &self.attached)
            .field("interruptions", &self.interruptions)
            .finish_non_exhaustive()
    }
}
