//! Point math shared by the scorer and the gesture-analysis engine.

/// A captured input sample in canvas-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Malformed samples (NaN / infinite coordinates) are dropped at the
    /// engine boundary instead of corrupting the path.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Arithmetic mean of the points. `None` for an empty slice (the centroid is
/// undefined there; callers guard with their length thresholds).
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f64;
    Some(Point::new(sx / n, sy / n))
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle of `p` about `center`, in radians.
pub fn angle_about(p: Point, center: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Fold the difference of two `atan2` results into `(-pi, pi]`. Inputs are
/// always in `[-2pi, 2pi]`, so a single +-2pi correction suffices.
pub fn normalize_turn(delta: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if delta > PI {
        delta - TAU
    } else if delta < -PI {
        delta + TAU
    } else {
        delta
    }
}
