use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::{AnimationSequence, DriverTick, InterruptibleAnimation, TimingConfig};
use crate::core::round_progress;

use super::morph::{PathInterpolator, PathPair};

/// Line shape plus optional filled area for one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesTransition {
    pub line: PathPair,
    #[serde(default)]
    pub area: Option<PathPair>,
}

impl SeriesTransition {
    #[must_use]
    pub fn line(line: PathPair) -> Self {
        Self { line, area: None }
    }

    #[must_use]
    pub fn with_area(mut self, area: PathPair) -> Self {
        self.area = Some(area);
        self
    }
}

/// Path data to draw this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub line: String,
    pub area: Option<String>,
}

#[derive(Debug, Clone)]
struct Interpolators {
    line: PathInterpolator,
    area: Option<PathInterpolator>,
}

impl Interpolators {
    fn new(transition: &SeriesTransition) -> Self {
        Self {
            line: transition.line.interpolator(),
            area: transition.area.as_ref().map(PathPair::interpolator),
        }
    }

    fn frame_at(&self, t: f64) -> SeriesFrame {
        SeriesFrame {
            line: self.line.at(t),
            area: self.area.as_ref().map(|area| area.at(t)),
        }
    }
}

/// Last frame reported back by the leading series of a set.
pub type ReportedFrame = Rc<RefCell<Option<SeriesFrame>>>;

#[derive(Debug, Default)]
struct MorphState {
    current: Option<Interpolators>,
    next: Option<Interpolators>,
    frame: SeriesFrame,
}

impl MorphState {
    fn promote_next(&mut self) {
        if let Some(next) = self.next.take() {
            self.frame = next.frame_at(0.0);
            self.current = Some(next);
        }
    }
}

/// Animates one series between successive shapes.
///
/// A new transition arriving mid-flight first snaps the running one to its
/// final shape, then starts from there.
#[derive(Debug)]
pub struct SeriesMorph {
    driver: InterruptibleAnimation,
    state: Rc<RefCell<MorphState>>,
}

impl SeriesMorph {
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self::build(timing, None)
    }

    /// Series whose frames are also written to `report`.
    #[must_use]
    pub fn reporting(timing: TimingConfig, report: ReportedFrame) -> Self {
        Self::build(timing, Some(report))
    }

    fn build(timing: TimingConfig, report: Option<ReportedFrame>) -> Self {
        let state = Rc::new(RefCell::new(MorphState::default()));
        let mut driver = InterruptibleAnimation::new(AnimationSequence::progress(timing));

        let listener_state = Rc::clone(&state);
        let listener_report = report.clone();
        driver.set_progress_listener(Rc::new(move |progress| {
            let mut state = listener_state.borrow_mut();
            let Some(frame) = state
                .current
                .as_ref()
                .map(|current| current.frame_at(round_progress(progress)))
            else {
                return;
            };
            if let Some(report) = listener_report.as_ref() {
                *report.borrow_mut() = Some(frame.clone());
            }
            state.frame = frame;
        }));

        let interrupt_state = Rc::clone(&state);
        driver.set_on_interrupt(move || {
            let mut state = interrupt_state.borrow_mut();
            if let Some(current) = state.current.as_ref() {
                let settled = current.frame_at(1.0);
                if let Some(report) = report.as_ref() {
                    *report.borrow_mut() = Some(settled.clone());
                }
                state.frame = settled;
            }
            state.promote_next();
        });

        Self { driver, state }
    }

    pub fn transition_to(&mut self, transition: &SeriesTransition) {
        {
            let mut state = self.state.borrow_mut();
            state.next = Some(Interpolators::new(transition));
            if !self.driver.is_running() {
                state.promote_next();
            }
        }
        trace!(running = self.driver.is_running(), "series transition");
        self.driver.play();
    }

    pub fn tick(&mut self, dt_ms: f64) -> DriverTick {
        self.driver.tick(dt_ms)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    #[must_use]
    pub fn frame(&self) -> SeriesFrame {
        self.state.borrow().frame.clone()
    }

    #[must_use]
    pub fn driver(&self) -> &InterruptibleAnimation {
        &self.driver
    }

    pub fn dispose(&mut self) {
        self.driver.dispose();
    }
}

/// Independent morphs for a set of series drawn together (hover mode).
///
/// Only the first series reports its frames back, so the parent can seed the
/// next single-series animation without every series writing to it.
#[derive(Debug)]
pub struct MultiSeriesMorph {
    timing: TimingConfig,
    series: Vec<SeriesMorph>,
    report: ReportedFrame,
}

impl MultiSeriesMorph {
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            series: Vec::new(),
            report: Rc::new(RefCell::new(None)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn set_transitions(&mut self, transitions: &[SeriesTransition]) {
        self.series.truncate(transitions.len());
        while self.series.len() < transitions.len() {
            let morph = if self.series.is_empty() {
                SeriesMorph::reporting(self.timing, Rc::clone(&self.report))
            } else {
                SeriesMorph::new(self.timing)
            };
            self.series.push(morph);
        }
        for (morph, transition) in self.series.iter_mut().zip(transitions) {
            morph.transition_to(transition);
        }
    }

    /// Advances every series. Returns `true` while any of them is still running.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let mut running = false;
        for morph in &mut self.series {
            running |= morph.tick(dt_ms) == DriverTick::Running;
        }
        running
    }

    #[must_use]
    pub fn frames(&self) -> Vec<SeriesFrame> {
        self.series.iter().map(SeriesMorph::frame).collect()
    }

    /// Most recent frame reported by the leading series.
    #[must_use]
    pub fn reported_frame(&self) -> Option<SeriesFrame> {
        self.report.borrow().clone()
    }

    pub fn dispose(&mut self) {
        for morph in &mut self.series {
            morph.dispose();
        }
    }
}
