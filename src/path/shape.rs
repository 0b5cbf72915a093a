use std::fmt::Write as _;

use super::parse::{PathCommand, Point};

/// Decimal places kept when serialising interpolated coordinates.
const COORDINATE_DIGITS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cubic {
    pub(crate) from: Point,
    pub(crate) c1: Point,
    pub(crate) c2: Point,
    pub(crate) to: Point,
}

impl Cubic {
    fn line(from: Point, to: Point) -> Self {
        Self {
            from,
            c1: from.lerp(to, 1.0 / 3.0),
            c2: from.lerp(to, 2.0 / 3.0),
            to,
        }
    }

    fn quad(from: Point, control: Point, to: Point) -> Self {
        Self {
            from,
            c1: from.lerp(control, 2.0 / 3.0),
            c2: to.lerp(control, 2.0 / 3.0),
            to,
        }
    }

    fn collapsed(at: Point) -> Self {
        Self {
            from: at,
            c1: at,
            c2: at,
            to: at,
        }
    }

    /// Control-polygon length, an upper bound of the arc length.
    fn hull_length(&self) -> f64 {
        self.from.distance(self.c1) + self.c1.distance(self.c2) + self.c2.distance(self.to)
    }

    /// De Casteljau split at `t = 0.5`.
    fn split_half(&self) -> (Self, Self) {
        let ab = self.from.lerp(self.c1, 0.5);
        let bc = self.c1.lerp(self.c2, 0.5);
        let cd = self.c2.lerp(self.to, 0.5);
        let abc = ab.lerp(bc, 0.5);
        let bcd = bc.lerp(cd, 0.5);
        let mid = abc.lerp(bcd, 0.5);
        (
            Self {
                from: self.from,
                c1: ab,
                c2: abc,
                to: mid,
            },
            Self {
                from: mid,
                c1: bcd,
                c2: cd,
                to: self.to,
            },
        )
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            from: self.from.lerp(other.from, t),
            c1: self.c1.lerp(other.c1, t),
            c2: self.c2.lerp(other.c2, t),
            to: self.to.lerp(other.to, t),
        }
    }
}

/// One `M ...` run of a path with every drawing command lifted to a cubic.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Subpath {
    pub(crate) start: Point,
    pub(crate) segments: Vec<Cubic>,
    pub(crate) closed: bool,
}

impl Subpath {
    fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    fn end(&self) -> Point {
        self.segments.last().map_or(self.start, |segment| segment.to)
    }

    fn collapsed(at: Point) -> Self {
        Self::new(at)
    }

    /// Subdivides the longest segments until the subpath has `count` segments.
    fn extend_to(&mut self, count: usize) {
        if self.segments.is_empty() && count > 0 {
            self.segments.push(Cubic::collapsed(self.start));
        }
        while self.segments.len() < count {
            let longest = self
                .segments
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.hull_length().total_cmp(&b.hull_length()))
                .map_or(0, |(index, _)| index);
            let (left, right) = self.segments[longest].split_half();
            self.segments[longest] = left;
            self.segments.insert(longest + 1, right);
        }
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            start: self.start.lerp(other.start, t),
            segments: self
                .segments
                .iter()
                .zip(&other.segments)
                .map(|(a, b)| a.lerp(b, t))
                .collect(),
            closed: if t < 0.5 { self.closed } else { other.closed },
        }
    }
}

pub(crate) fn to_subpaths(commands: &[PathCommand]) -> Vec<Subpath> {
    let mut subpaths: Vec<Subpath> = Vec::new();
    for command in commands {
        let segment_end = match *command {
            PathCommand::MoveTo(point) => {
                subpaths.push(Subpath::new(point));
                continue;
            }
            PathCommand::Close => {
                if let Some(current) = subpaths.last_mut() {
                    let from = current.end();
                    if from != current.start {
                        current.segments.push(Cubic::line(from, current.start));
                    }
                    current.closed = true;
                }
                continue;
            }
            PathCommand::LineTo(to)
            | PathCommand::QuadTo { to, .. }
            | PathCommand::CubicTo { to, .. } => to,
        };

        // drawing after Z restarts at the closed subpath's start
        let restart = match subpaths.last() {
            Some(current) if current.closed => Some(current.start),
            Some(_) => None,
            None => continue,
        };
        if let Some(start) = restart {
            subpaths.push(Subpath::new(start));
        }
        let Some(current) = subpaths.last_mut() else {
            continue;
        };
        let from = current.end();
        let segment = match *command {
            PathCommand::QuadTo { control, .. } => Cubic::quad(from, control, segment_end),
            PathCommand::CubicTo { c1, c2, .. } => Cubic {
                from,
                c1,
                c2,
                to: segment_end,
            },
            _ => Cubic::line(from, segment_end),
        };
        current.segments.push(segment);
    }
    subpaths
}

/// Makes both shapes structurally identical so they can be blended point-wise.
pub(crate) fn equalize(from: &mut Vec<Subpath>, to: &mut Vec<Subpath>) {
    pad_subpaths(from, to);
    pad_subpaths(to, from);
    for (a, b) in from.iter_mut().zip(to.iter_mut()) {
        let count = a.segments.len().max(b.segments.len());
        a.extend_to(count);
        b.extend_to(count);
    }
}

fn pad_subpaths(shorter: &mut Vec<Subpath>, longer: &[Subpath]) {
    while shorter.len() < longer.len() {
        let anchor = shorter
            .last()
            .map_or_else(|| longer[shorter.len()].start, Subpath::end);
        shorter.push(Subpath::collapsed(anchor));
    }
}

pub(crate) fn blend(from: &[Subpath], to: &[Subpath], t: f64) -> Vec<Subpath> {
    from.iter().zip(to).map(|(a, b)| a.lerp(b, t)).collect()
}

pub(crate) fn to_svg(subpaths: &[Subpath]) -> String {
    let mut out = String::new();
    for subpath in subpaths {
        let _ = write!(
            out,
            "M{},{}",
            format_coordinate(subpath.start.x),
            format_coordinate(subpath.start.y)
        );
        for segment in &subpath.segments {
            let _ = write!(
                out,
                "C{},{},{},{},{},{}",
                format_coordinate(segment.c1.x),
                format_coordinate(segment.c1.y),
                format_coordinate(segment.c2.x),
                format_coordinate(segment.c2.y),
                format_coordinate(segment.to.x),
                format_coordinate(segment.to.y)
            );
        }
        if subpath.closed {
            out.push('Z');
        }
    }
    out
}

fn format_coordinate(value: f64) -> String {
    let rounded = crate::core::round_to_precision(value, COORDINATE_DIGITS);
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}
