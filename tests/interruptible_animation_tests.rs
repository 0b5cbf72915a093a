use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use sparkline_rs::animation::{
    AnimationSequence, DriverTick, InterruptibleAnimation, MotionCurve, MotionDuration,
    TimingConfig,
};

fn linear(duration: MotionDuration) -> TimingConfig {
    TimingConfig::new(duration, MotionCurve::Linear)
}

fn recording_driver() -> (InterruptibleAnimation, Rc<RefCell<Vec<f64>>>, Rc<Cell<u32>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let interrupts = Rc::new(Cell::new(0));

    let mut driver =
        InterruptibleAnimation::new(AnimationSequence::progress(linear(MotionDuration::Slow1)));
    let listener_seen = Rc::clone(&seen);
    driver.set_progress_listener(Rc::new(move |progress| {
        listener_seen.borrow_mut().push(progress);
    }));
    let interrupt_count = Rc::clone(&interrupts);
    driver.set_on_interrupt(move || interrupt_count.set(interrupt_count.get() + 1));

    (driver, seen, interrupts)
}

#[test]
fn play_attaches_exactly_one_listener() {
    let (mut driver, _, _) = recording_driver();
    assert_eq!(driver.attached_listener_count(), 0);

    driver.play();
    assert!(driver.is_running());
    assert_eq!(driver.attached_listener_count(), 1);
}

#[test]
fn natural_completion_detaches_and_resets() {
    let (mut driver, seen, interrupts) = recording_driver();
    driver.play();

    assert_eq!(driver.tick(250.0), DriverTick::Running);
    assert_abs_diff_eq!(driver.progress(), 0.5, epsilon = 1e-9);
    assert_eq!(driver.tick(250.0), DriverTick::Finished);

    assert!(!driver.is_running());
    assert_eq!(driver.attached_listener_count(), 0);
    assert_eq!(driver.progress(), 0.0);
    assert_eq!(interrupts.get(), 0);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_abs_diff_eq!(seen[1], 1.0, epsilon = 1e-9);
    assert_eq!(driver.tick(16.0), DriverTick::Idle);
}

#[test]
fn replay_while_running_interrupts_exactly_once() {
    let (mut driver, seen, interrupts) = recording_driver();

    driver.play();
    driver.tick(100.0);
    driver.play();

    assert_eq!(interrupts.get(), 1);
    assert_eq!(driver.interruptions(), 1);
    assert!(driver.is_running());
    assert_eq!(driver.attached_listener_count(), 1);
    assert_eq!(driver.progress(), 0.0);

    let before = seen.borrow().len();
    driver.tick(100.0);
    assert_eq!(seen.borrow().len(), before + 1);
}

#[test]
fn repeated_replays_count_every_interruption() {
    let (mut driver, _, interrupts) = recording_driver();

    driver.play();
    driver.tick(400.0);
    driver.play();
    driver.play();

    assert_eq!(interrupts.get(), 2);
    assert_eq!(driver.attached_listener_count(), 1);
    assert_eq!(driver.tick(500.0), DriverTick::Finished);
    assert_eq!(driver.attached_listener_count(), 0);
}

#[test]
fn play_after_completion_does_not_interrupt() {
    let (mut driver, _, interrupts) = recording_driver();
    driver.play();
    driver.tick(1_000.0);
    driver.play();

    assert_eq!(interrupts.get(), 0);
    assert_eq!(driver.attached_listener_count(), 1);
}

#[test]
fn dispose_detaches_while_running() {
    let (mut driver, seen, _) = recording_driver();
    driver.play();
    driver.tick(100.0);
    driver.dispose();

    assert!(!driver.is_running());
    assert_eq!(driver.attached_listener_count(), 0);
    let before = seen.borrow().len();
    assert_eq!(driver.tick(100.0), DriverTick::Idle);
    assert_eq!(seen.borrow().len(), before);
}

#[test]
fn secondary_tracks_run_after_progress_and_reset() {
    let (sequence, track) = AnimationSequence::progress(linear(MotionDuration::Fast2))
        .then_secondary(0.0, 24.0, linear(MotionDuration::Fast2));
    assert_eq!(sequence.track_count(), 2);
    assert_eq!(sequence.steps().len(), 2);

    let mut driver = InterruptibleAnimation::new(sequence);
    driver.play();
    assert_eq!(driver.tick(110.0), DriverTick::Running);
    assert_eq!(driver.track_value(track), Some(0.0));

    assert_eq!(driver.tick(55.0), DriverTick::Running);
    assert_abs_diff_eq!(driver.track_value(track).unwrap_or_default(), 12.0, epsilon = 1e-9);

    assert_eq!(driver.tick(55.0), DriverTick::Finished);
    assert_eq!(driver.track_value(track), Some(0.0));
    assert_eq!(driver.track_value(7), None);
}

#[test]
fn zero_length_timing_finishes_on_first_tick() {
    let mut driver = InterruptibleAnimation::new(AnimationSequence::progress(linear(
        MotionDuration::Instant,
    )));
    driver.play();
    assert_eq!(driver.tick(16.0), DriverTick::Finished);
    assert!(!driver.is_running());
}
