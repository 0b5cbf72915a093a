//! SVG path parsing and shape morphing for sparkline series.

pub mod morph;
pub mod parse;
pub mod series;
mod shape;

pub use morph::{PathInterpolator, PathPair, interpolate, try_interpolate};
pub use parse::{PathCommand, Point, parse_path};
pub use series::{MultiSeriesMorph, ReportedFrame, SeriesFrame, SeriesMorph, SeriesTransition};
