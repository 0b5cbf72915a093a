use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SparklineResult;

use super::parse::parse_path;
use super::shape::{Subpath, blend, equalize, to_subpaths, to_svg};

/// Previous and next shape of one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPair {
    pub from_path: String,
    pub to_path: String,
}

impl PathPair {
    #[must_use]
    pub fn new(from_path: impl Into<String>, to_path: impl Into<String>) -> Self {
        Self {
            from_path: from_path.into(),
            to_path: to_path.into(),
        }
    }

    #[must_use]
    pub fn interpolator(&self) -> PathInterpolator {
        interpolate(&self.from_path, &self.to_path)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MorphKind {
    /// Both ends are the same string.
    Identical,
    /// Shapes could not be blended; the path jumps to `to` at `t = 1`.
    Snap,
    Blend { from: Vec<Subpath>, to: Vec<Subpath> },
}

/// Produces intermediate path data between two shapes.
///
/// `at(0.0)` yields the source string and `at(1.0)` the target string verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct PathInterpolator {
    from_path: String,
    to_path: String,
    kind: MorphKind,
}

impl PathInterpolator {
    #[must_use]
    pub fn from_path(&self) -> &str {
        &self.from_path
    }

    #[must_use]
    pub fn to_path(&self) -> &str {
        &self.to_path
    }

    /// `false` when this interpolator only snaps between its ends.
    #[must_use]
    pub fn is_blending(&self) -> bool {
        matches!(self.kind, MorphKind::Blend { .. })
    }

    #[must_use]
    pub fn at(&self, t: f64) -> String {
        match &self.kind {
            MorphKind::Identical => self.from_path.clone(),
            _ if t >= 1.0 => self.to_path.clone(),
            _ if t <= 0.0 || t.is_nan() => self.from_path.clone(),
            MorphKind::Snap => self.from_path.clone(),
            MorphKind::Blend { from, to } => to_svg(&blend(from, to, t)),
        }
    }
}

/// Builds an interpolator, returning an error when either path cannot be parsed.
pub fn try_interpolate(from_path: &str, to_path: &str) -> SparklineResult<PathInterpolator> {
    if from_path == to_path {
        return Ok(PathInterpolator {
            from_path: from_path.to_owned(),
            to_path: to_path.to_owned(),
            kind: MorphKind::Identical,
        });
    }

    let mut from = to_subpaths(&parse_path(from_path)?);
    let mut to = to_subpaths(&parse_path(to_path)?);
    equalize(&mut from, &mut to);

    Ok(PathInterpolator {
        from_path: from_path.to_owned(),
        to_path: to_path.to_owned(),
        kind: MorphKind::Blend { from, to },
    })
}

/// Builds an interpolator; unparsable input degrades to a snap at `t = 1`.
#[must_use]
pub fn interpolate(from_path: &str, to_path: &str) -> PathInterpolator {
    match try_interpolate(from_path, to_path) {
        Ok(interpolator) => interpolator,
        Err(err) => {
            warn!(error = %err, "path morph falls back to snapping");
            PathInterpolator {
                from_path: from_path.to_owned(),
                to_path: to_path.to_owned(),
                kind: MorphKind::Snap,
            }
        }
    }
}
