use std::cell::RefCell;
use std::thread;

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use sparkline_rs::animation::{MotionCurve, MotionDuration, TimingConfig};
use sparkline_rs::api::{ScrubController, ScrubHost, SparklineConfig};
use sparkline_rs::core::{ScrubParams, ScrubPoint};
use sparkline_rs::interaction::{GestureState, MARKER_OFFSCREEN};

#[derive(Debug, Clone, PartialEq)]
enum HostEvent {
    Start,
    Haptic,
    Scrub(ScrubParams),
    End,
}

#[derive(Debug, Default)]
struct RecordingHost {
    events: Vec<HostEvent>,
    lookups: RefCell<Vec<f64>>,
    no_data: bool,
}

impl RecordingHost {
    fn lookups(&self) -> Vec<f64> {
        self.lookups.borrow().clone()
    }

    fn scrubs(&self) -> Vec<&ScrubParams> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Scrub(params) => Some(params),
                _ => None,
            })
            .collect()
    }
}

impl ScrubHost for RecordingHost {
    fn marker_at(&self, x: f64) -> Option<ScrubPoint> {
        self.lookups.borrow_mut().push(x);
        if self.no_data {
            return None;
        }
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).single()?;
        Some(ScrubPoint::new(x, date, 100.0 + x))
    }

    fn on_scrub_start(&mut self) {
        self.events.push(HostEvent::Start);
    }

    fn on_scrub(&mut self, params: ScrubParams) {
        self.events.push(HostEvent::Scrub(params));
    }

    fn on_scrub_end(&mut self) {
        self.events.push(HostEvent::End);
    }

    fn haptic_feedback(&mut self) {
        self.events.push(HostEvent::Haptic);
    }
}

fn controller() -> ScrubController<RecordingHost> {
    let config = SparklineConfig::new(300.0)
        .with_marker_width(30.0)
        .with_gutter(8.0)
        .with_period("day");
    ScrubController::new(RecordingHost::default(), config).expect("controller init")
}

#[test]
fn start_near_left_edge_resolves_clamped_marker() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    assert!(gesture.on_start(52.6));
    assert_eq!(gesture.state(), GestureState::Engaged);
    assert_abs_diff_eq!(controller.marker_x(), 37.6, epsilon = 1e-9);

    assert_eq!(controller.process_pending(), 2);

    let lookups = controller.host().lookups();
    assert_eq!(lookups.len(), 1);
    assert_abs_diff_eq!(lookups[0], 37.6, epsilon = 1e-9);

    let scrubs = controller.host().scrubs();
    assert_eq!(scrubs.len(), 1);
    assert_eq!(scrubs[0].period, "day");
    assert_abs_diff_eq!(scrubs[0].point.x, 37.6, epsilon = 1e-9);
}

#[test]
fn start_fires_callbacks_in_order_with_one_haptic() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    gesture.on_start(120.0);
    gesture.on_update(130.0);
    gesture.on_update(140.0);
    controller.process_pending();

    let events = &controller.host().events;
    assert_eq!(events[0], HostEvent::Start);
    assert_eq!(events[1], HostEvent::Haptic);
    assert_eq!(
        events
            .iter()
            .filter(|event| **event == HostEvent::Haptic)
            .count(),
        1
    );
    assert_eq!(controller.host().scrubs().len(), 3);
    assert!(controller.is_scrubbing());
}

#[test]
fn first_update_moves_engaged_to_scrubbing() {
    let controller = controller();
    let mut gesture = controller.gesture();

    assert_eq!(gesture.state(), GestureState::Idle);
    gesture.on_start(100.0);
    assert_eq!(gesture.state(), GestureState::Engaged);
    gesture.on_update(110.0);
    assert_eq!(gesture.state(), GestureState::Scrubbing);
    gesture.on_end();
    assert_eq!(gesture.state(), GestureState::Released);
}

#[test]
fn updates_before_start_are_dropped() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    assert!(!gesture.on_update(80.0));
    assert!(!gesture.on_end());
    assert_eq!(controller.process_pending(), 0);
    assert_eq!(controller.marker_x(), MARKER_OFFSCREEN);
    assert!(controller.host().events.is_empty());
}

#[test]
fn missing_data_emits_no_scrub_params() {
    let config = SparklineConfig::new(300.0).with_marker_width(30.0);
    let host = RecordingHost {
        no_data: true,
        ..RecordingHost::default()
    };
    let mut controller = ScrubController::new(host, config).expect("controller init");
    let mut gesture = controller.gesture();

    gesture.on_start(150.0);
    gesture.on_update(160.0);
    controller.process_pending();

    assert_eq!(controller.host().lookups().len(), 2);
    assert!(controller.host().scrubs().is_empty());
    assert_eq!(controller.host().events[0], HostEvent::Start);
}

#[test]
fn end_runs_exit_and_settles_marker_offscreen() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    gesture.on_start(150.0);
    controller.process_pending();
    controller.tick(500.0);
    assert_abs_diff_eq!(controller.marker_opacity(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(controller.min_max_opacity(), 0.0, epsilon = 1e-9);

    gesture.on_end();
    controller.process_pending();
    assert_eq!(controller.host().events.last(), Some(&HostEvent::End));
    assert_eq!(controller.gesture_state(), GestureState::Released);
    assert!(controller.marker_x() >= 0.0);

    controller.tick(500.0);
    assert_eq!(controller.gesture_state(), GestureState::Idle);
    assert_eq!(controller.marker_x(), MARKER_OFFSCREEN);
    assert_abs_diff_eq!(controller.marker_opacity(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(controller.min_max_opacity(), 1.0, epsilon = 1e-9);
}

#[test]
fn cancel_behaves_like_end() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    gesture.on_start(150.0);
    assert!(gesture.on_cancel());
    assert!(!gesture.is_armed());
    controller.process_pending();
    controller.tick(500.0);

    assert_eq!(controller.host().events.last(), Some(&HostEvent::End));
    assert_eq!(controller.gesture_state(), GestureState::Idle);
    assert_eq!(controller.marker_x(), MARKER_OFFSCREEN);
}

#[test]
fn new_gesture_during_exit_keeps_its_marker() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    gesture.on_start(150.0);
    controller.process_pending();
    gesture.on_end();
    controller.process_pending();
    controller.tick(50.0);

    gesture.on_start(200.0);
    controller.tick(500.0);
    assert_eq!(controller.gesture_state(), GestureState::Engaged);
    assert_abs_diff_eq!(controller.marker_x(), 185.0, epsilon = 1e-9);

    controller.process_pending();
    controller.tick(500.0);
    assert_eq!(controller.gesture_state(), GestureState::Engaged);
    assert_abs_diff_eq!(controller.marker_opacity(), 1.0, epsilon = 1e-9);
}

#[test]
fn gesture_thread_hands_work_to_main_thread_in_order() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    let handle = thread::spawn(move || {
        gesture.on_start(20.0);
        for step in 0..10 {
            gesture.on_update(20.0 + f64::from(step) * 10.0);
        }
        gesture.on_end();
    });
    handle.join().expect("gesture thread");

    assert!(controller.host().events.is_empty());
    assert_eq!(controller.process_pending(), 13);

    let lookups = controller.host().lookups();
    assert_eq!(lookups.len(), 11);
    assert!(lookups.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(controller.host().events.first(), Some(&HostEvent::Start));
    assert_eq!(controller.host().events.last(), Some(&HostEvent::End));
}

#[test]
fn repeated_start_only_moves_the_marker() {
    let mut controller = controller();
    let mut gesture = controller.gesture();

    assert!(gesture.on_start(100.0));
    assert!(gesture.on_start(160.0));
    assert_abs_diff_eq!(controller.marker_x(), 145.0, epsilon = 1e-9);
    assert_eq!(controller.process_pending(), 3);

    let events = &controller.host().events;
    assert_eq!(
        events.iter().filter(|event| **event == HostEvent::Start).count(),
        1
    );
    assert_eq!(
        events.iter().filter(|event| **event == HostEvent::Haptic).count(),
        1
    );
    assert_eq!(controller.host().scrubs().len(), 2);
}

#[test]
fn settle_on_main_thread_never_hides_a_new_gesture_marker() {
    let config = SparklineConfig::new(300.0)
        .with_marker_width(30.0)
        .with_gutter(8.0)
        .with_overlay_timing(TimingConfig::new(
            MotionDuration::Instant,
            MotionCurve::Linear,
        ));
    let mut controller =
        ScrubController::new(RecordingHost::default(), config).expect("controller init");
    let mut gesture = controller.gesture();

    for _ in 0..2_000 {
        gesture.on_end();
        controller.process_pending();

        thread::scope(|scope| {
            scope.spawn(|| gesture.on_start(200.0));
            controller.tick(16.0);
        });

        assert_eq!(controller.gesture_state(), GestureState::Engaged);
        assert_abs_diff_eq!(controller.marker_x(), 185.0, epsilon = 1e-9);
        controller.process_pending();
    }
}
