//! Loop-completion detection: sum the signed angular deltas of consecutive
//! samples about the path centroid and call the loop complete once the net
//! rotation reaches a full turn.

use std::f64::consts::TAU;

use crate::geometry::{self, Point};

/// Sweep measurement is skipped below this many path points.
pub const MIN_POINTS_FOR_COMPLETION: usize = 50;

/// Completed loops with a smaller average radius (device pixels) are
/// classified "too small" regardless of score.
pub const MIN_AVG_RADIUS: f64 = 50.0;

/// Endpoint gap (pixels) under which the loop counts as geometrically
/// closed. Measured but not used for gating; only the accumulated sweep
/// decides completion.
pub const LOOP_CLOSE_DISTANCE: f64 = 50.0;

/// Net rotation needed to complete a loop: one full turn.
pub const FULL_TURN: f64 = TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSweep {
    /// Signed sum of normalized per-segment angular deltas about the
    /// centroid. Positive is clockwise on a canvas.
    pub total_angle: f64,
    /// Mean distance of the path points from the centroid.
    pub avg_radius: f64,
    /// Whether the endpoints sit within [`LOOP_CLOSE_DISTANCE`] of each other.
    pub loop_closed: bool,
}

impl LoopSweep {
    pub fn is_full_turn(&self) -> bool {
        self.total_angle.abs() >= FULL_TURN
    }
}

/// Measure the angular sweep of the path. `None` below
/// [`MIN_POINTS_FOR_COMPLETION`] points.
pub fn measure_sweep(points: &[Point]) -> Option<LoopSweep> {
    if points.len() < MIN_POINTS_FOR_COMPLETION {
        return None;
    }
    let center = geometry::centroid(points)?;

    let radii_sum: f64 = points.iter().map(|&p| geometry::distance(p, center)).sum();
    let avg_radius = radii_sum / points.len() as f64;

    let mut total_angle = 0.0;
    let mut prev_angle = geometry::angle_about(points[0], center);
    for &p in &points[1..] {
        let angle = geometry::angle_about(p, center);
        total_angle += geometry::normalize_turn(angle - prev_angle);
        prev_angle = angle;
    }

    let loop_closed =
        geometry::distance(points[0], points[points.len() - 1]) < LOOP_CLOSE_DISTANCE;

    Some(LoopSweep {
        total_angle,
        avg_radius,
        loop_closed,
    })
}
