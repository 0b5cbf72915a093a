use sparkline_rs::SparklineError;
use sparkline_rs::animation::{MotionCurve, MotionDuration, TimingConfig};
use sparkline_rs::path::{
    MultiSeriesMorph, PathCommand, PathPair, Point, SeriesMorph, SeriesTransition, interpolate,
    parse_path, try_interpolate,
};

const FLAT: &str = "M0 0 L10 10";
const MIRRORED: &str = "M0 10 L10 0";

fn morph_timing() -> TimingConfig {
    TimingConfig::new(MotionDuration::Slow1, MotionCurve::Linear)
}

#[test]
fn endpoints_are_returned_verbatim() {
    let interpolator = interpolate(FLAT, MIRRORED);
    assert!(interpolator.is_blending());
    assert_eq!(interpolator.at(0.0), FLAT);
    assert_eq!(interpolator.at(1.0), MIRRORED);
    assert_eq!(interpolator.at(-0.5), FLAT);
    assert_eq!(interpolator.at(1.5), MIRRORED);
}

#[test]
fn midpoint_blends_every_coordinate() {
    let interpolator = interpolate(FLAT, MIRRORED);
    assert_eq!(interpolator.at(0.5), "M0,5C3.333,5,6.667,5,10,5");
}

#[test]
fn identical_paths_never_change() {
    let path = "M0 0 C 5 5 10 5 15 0";
    let interpolator = interpolate(path, path);
    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        assert_eq!(interpolator.at(t), path);
    }
}

#[test]
fn different_segment_counts_still_blend() {
    let interpolator = interpolate("M0 0 L10 0", "M0 0 L5 5 L10 0 L15 5");
    assert!(interpolator.is_blending());
    let mid = interpolator.at(0.5);
    assert!(mid.starts_with("M0,0C"));
    assert_eq!(mid.matches('C').count(), 3);
}

#[test]
fn arcs_fall_back_to_snapping() {
    let arc = "M0 0 A 5 5 0 0 1 10 0";
    let interpolator = interpolate(FLAT, arc);
    assert!(!interpolator.is_blending());
    assert_eq!(interpolator.at(0.5), FLAT);
    assert_eq!(interpolator.at(1.0), arc);

    let err = try_interpolate(FLAT, arc).expect_err("arcs are not supported");
    assert!(matches!(err, SparklineError::InvalidPath { .. }));
}

#[test]
fn parser_expands_relative_and_shorthand_commands() {
    let commands = parse_path("m1 1 h4 v4 l-4 0 z").expect("valid path");
    assert_eq!(commands.len(), 5);
    assert_eq!(commands[0], PathCommand::MoveTo(Point::new(1.0, 1.0)));
    assert_eq!(commands[1], PathCommand::LineTo(Point::new(5.0, 1.0)));
    assert_eq!(commands[2], PathCommand::LineTo(Point::new(5.0, 5.0)));
    assert_eq!(commands[3], PathCommand::LineTo(Point::new(1.0, 5.0)));
    assert_eq!(commands[4], PathCommand::Close);
}

#[test]
fn parser_rejects_paths_without_leading_move() {
    let err = parse_path("L 10 10").expect_err("must start with a move");
    assert!(format!("{err}").contains("must start with a move command"));
}

#[test]
fn series_snaps_interrupted_run_to_its_final_shape() {
    let mut morph = MultiSeriesMorph::new(morph_timing());
    morph.set_transitions(&[SeriesTransition::line(PathPair::new(FLAT, MIRRORED))]);
    morph.tick(100.0);
    assert_ne!(morph.frames()[0].line, MIRRORED);

    let next = "M0 0 L10 5";
    morph.set_transitions(&[SeriesTransition::line(PathPair::new(MIRRORED, next))]);

    let reported = morph.reported_frame().expect("leading series reports");
    assert_eq!(reported.line, MIRRORED);
    assert_eq!(morph.frames()[0].line, MIRRORED);

    while morph.tick(100.0) {}
    assert_eq!(morph.frames()[0].line, next);
}

#[test]
fn series_reaches_target_verbatim_and_releases_listener() {
    let area_from = "M0 0 L10 10 L10 20 L0 20 Z";
    let area_to = "M0 10 L10 0 L10 20 L0 20 Z";
    let mut morph = SeriesMorph::new(morph_timing());
    morph.transition_to(
        &SeriesTransition::line(PathPair::new(FLAT, MIRRORED))
            .with_area(PathPair::new(area_from, area_to)),
    );
    assert_eq!(morph.frame().line, FLAT);
    assert_eq!(morph.frame().area.as_deref(), Some(area_from));

    morph.tick(250.0);
    assert!(morph.is_running());
    morph.tick(250.0);

    assert!(!morph.is_running());
    assert_eq!(morph.frame().line, MIRRORED);
    assert_eq!(morph.frame().area.as_deref(), Some(area_to));
    assert_eq!(morph.driver().attached_listener_count(), 0);
    assert_eq!(morph.driver().interruptions(), 0);
}

#[test]
fn only_the_leading_series_reports() {
    let mut morph = MultiSeriesMorph::new(morph_timing());
    morph.set_transitions(&[
        SeriesTransition::line(PathPair::new(FLAT, MIRRORED)),
        SeriesTransition::line(PathPair::new("M0 0 L20 20", "M0 20 L20 0")),
    ]);
    assert_eq!(morph.len(), 2);

    while morph.tick(100.0) {}
    let reported = morph.reported_frame().expect("leading series reports");
    assert_eq!(reported.line, MIRRORED);
    assert_eq!(morph.frames()[1].line, "M0 20 L20 0");

    morph.dispose();
    assert!(!morph.tick(16.0));
}
