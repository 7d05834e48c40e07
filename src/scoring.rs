//! Circularity scoring: how close is an accumulated freehand path to a
//! perfect circle? The score is `max(0, 100 - stddev)` where the standard
//! deviation is taken over the distances from each point to the path
//! centroid (population form, divide by N).

use crate::geometry::{self, Point};

/// Paths shorter than this are not scorable; the UI keeps asking the player
/// to draw.
pub const MIN_POINTS_FOR_SCORE: usize = 10;

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Population standard deviation (divide by N, not N-1).
pub fn std_dev(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - *value;
                    diff * diff
                })
                .sum::<f64>()
                / count as f64;
            Some(variance.sqrt())
        }
        _ => None,
    }
}

/// Derived per-evaluation reading; recomputed from the path, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreResult {
    pub avg_radius: f64,
    pub std_dev: f64,
    /// `max(0, 100 - std_dev)`, so always in `[0, 100]`.
    pub score: f64,
}

fn score_points(points: &[Point]) -> Option<ScoreResult> {
    let center = geometry::centroid(points)?;
    let radii: Vec<f64> = points
        .iter()
        .map(|&p| geometry::distance(p, center))
        .collect();
    let avg_radius = mean(&radii)?;
    let std_dev = std_dev(&radii)?;
    Some(ScoreResult {
        avg_radius,
        std_dev,
        score: (100.0 - std_dev).max(0.0),
    })
}

/// Score a path for display. `None` below [`MIN_POINTS_FOR_SCORE`] points;
/// the caller treats that as "insufficient data", not as a zero score.
pub fn score_path(points: &[Point]) -> Option<ScoreResult> {
    if points.len() < MIN_POINTS_FOR_SCORE {
        return None;
    }
    score_points(points)
}

/// Same arithmetic without the minimum-length floor. Used only to pick the
/// capture color of a freshly appended point, where even a one-point path
/// is given a reading (std-dev 0, score 100).
pub fn raw_score(points: &[Point]) -> Option<ScoreResult> {
    score_points(points)
}

/// An HSL color as handed to the canvas stroke style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Continuous score-to-color ramp: dark red for poor scores, brightening
/// toward 70, shifting red->orange over (70, 80] and orange->green over
/// (80, 100]. Band edges line up so the ramp has no jumps.
pub fn color_for_score(score: f64) -> Hsl {
    let clamped = score.clamp(0.0, 100.0);
    if clamped <= 70.0 {
        let lightness = 20.0 + (clamped / 70.0) * 20.0;
        Hsl { h: 0.0, s: 100.0, l: lightness }
    } else if clamped <= 80.0 {
        let ratio = (clamped - 70.0) / 10.0;
        Hsl { h: ratio * 50.0, s: 100.0, l: 40.0 }
    } else {
        let ratio = (clamped - 80.0) / 20.0;
        Hsl { h: 50.0 + ratio * 70.0, s: 100.0, l: 40.0 }
    }
}
