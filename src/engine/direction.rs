//! Rotational-direction guard. Once a stroke commits to turning one way
//! around the centroid, reversing by more than the jitter tolerance aborts
//! the attempt. Without this, wobbling back and forth near a fixed radius
//! scores nearly as well as drawing a real loop.

use crate::geometry;

/// Direction evaluation is skipped below this many collected samples; the
/// running centroid is too noisy to judge angular motion.
pub const MIN_POINTS_FOR_DIRECTION: usize = 15;

/// Minimum per-sample angular delta (radians) to lock a direction.
pub const DIRECTION_LOCK_THRESHOLD: f64 = 0.05;

/// Reversal beyond this (radians) against a locked direction aborts the
/// session. Anything smaller is treated as hand jitter.
pub const ANGLE_CHANGE_TOLERANCE: f64 = 0.2;

/// Rotation sense on a canvas (y grows downward, so a positive angular
/// delta reads as clockwise on screen).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Undetermined,
    Clockwise,
    CounterClockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Sample is consistent (or the guard is still warming up); append it.
    Consistent,
    /// Sample reverses a locked direction; drop it and pause the session.
    Reversal,
}

/// Per-session guard state. Reset whenever a new gesture begins.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionGuard {
    last_angle: f64,
    direction: Rotation,
}

impl DirectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> Rotation {
        self.direction
    }

    /// Evaluate the next sample's angle (about the running centroid) given
    /// how many samples the path held before this one. On [`Verdict::Reversal`]
    /// the stored angle is left untouched; the rejected sample never becomes
    /// the reference for a later one.
    pub fn evaluate(&mut self, current_angle: f64, samples_seen: usize) -> Verdict {
        if samples_seen < MIN_POINTS_FOR_DIRECTION {
            self.last_angle = current_angle;
            return Verdict::Consistent;
        }

        let angle_change = geometry::normalize_turn(current_angle - self.last_angle);
        match self.direction {
            Rotation::Undetermined => {
                if angle_change > DIRECTION_LOCK_THRESHOLD {
                    self.direction = Rotation::Clockwise;
                } else if angle_change < -DIRECTION_LOCK_THRESHOLD {
                    self.direction = Rotation::CounterClockwise;
                }
            }
            Rotation::Clockwise => {
                if angle_change < -ANGLE_CHANGE_TOLERANCE {
                    return Verdict::Reversal;
                }
            }
            Rotation::CounterClockwise => {
                if angle_change > ANGLE_CHANGE_TOLERANCE {
                    return Verdict::Reversal;
                }
            }
        }
        self.last_angle = current_angle;
        Verdict::Consistent
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
