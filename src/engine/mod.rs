//! Gesture-analysis engine: owns the active drawing session and runs the
//! per-sample pipeline (direction guard, append, live score, completion
//! check). The browser glue feeds it pointer samples and renders whatever
//! evaluation comes back; nothing in here touches the DOM.

pub mod completion;
pub mod direction;

use crate::geometry::{self, Point};
use crate::scoring::{self, Hsl};
use crate::store::HighScoreStore;

use completion::MIN_AVG_RADIUS;
use direction::{DirectionGuard, Verdict};

/// A path sample plus the stroke color chosen when it was captured. The
/// first point of a session carries no color; segments are stroked with the
/// color of their destination point, so it is never read.
#[derive(Clone, Copy, Debug)]
pub struct PathPoint {
    pub pos: Point,
    pub color: Option<Hsl>,
}

/// The current gesture attempt. Paused is terminal for the attempt: a
/// paused session ignores movement until the next gesture start resets it.
#[derive(Debug, Default)]
struct Session {
    path: Vec<PathPoint>,
    is_drawing: bool,
    is_paused: bool,
    guard: DirectionGuard,
}

impl Session {
    fn reset(&mut self) {
        self.path.clear();
        self.guard.reset();
        self.is_paused = false;
    }

    fn positions(&self) -> Vec<Point> {
        self.path.iter().map(|p| p.pos).collect()
    }
}

/// How a single evaluation pass ended, one per render state of the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Fewer than 10 points; no numeric accuracy yet.
    InsufficientData,
    /// Mid-stroke accuracy reading.
    Live { score: f64 },
    /// The sample reversed the locked rotation; attempt aborted.
    WrongDirection,
    /// Pointer released before completing a loop; informational reading only.
    Final { score: f64 },
    /// Loop completed but its average radius is under the size floor.
    TooSmall { score: f64 },
    /// Loop completed at a playable size.
    Completed { score: f64 },
}

/// Result of one evaluation pass, as handed to the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Set when this pass raised the persisted best.
    pub new_high_score: Option<f64>,
    /// Set when a completed loop scored well enough for the celebration.
    pub celebrate: bool,
}

impl Evaluation {
    fn of(outcome: Outcome) -> Self {
        Self {
            outcome,
            new_high_score: None,
            celebrate: false,
        }
    }
}

/// Score threshold at which a completed loop triggers the celebration.
pub const CELEBRATION_THRESHOLD: f64 = 90.0;

pub struct Engine<S: HighScoreStore> {
    session: Session,
    high_score: f64,
    store: S,
}

impl<S: HighScoreStore> Engine<S> {
    /// Reads the persisted best once; it is only written back on qualifying
    /// completions.
    pub fn new(store: S) -> Self {
        let high_score = store.load();
        Self {
            session: Session::default(),
            high_score,
            store,
        }
    }

    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The path as captured so far, for redraws.
    pub fn path(&self) -> &[PathPoint] {
        &self.session.path
    }

    /// Begin a gesture at `p`. Returns `true` when a paused previous attempt
    /// was discarded (the caller should clear its canvas).
    pub fn on_gesture_start(&mut self, p: Point) -> bool {
        let resumed = self.session.is_paused;
        if resumed {
            self.session.reset();
        }
        self.session.is_drawing = true;
        if p.is_finite() {
            self.session.path.push(PathPoint { pos: p, color: None });
        }
        resumed
    }

    /// Evaluate one movement sample. `None` when the sample is ignored
    /// outright: no gesture in progress, session paused, or non-finite
    /// coordinates.
    pub fn on_sample(&mut self, p: Point) -> Option<Evaluation> {
        if !self.session.is_drawing || self.session.is_paused || !p.is_finite() {
            return None;
        }

        let positions = self.session.positions();
        // Centroid of the points seen so far; a bare start point pins the
        // reference to the sample itself (angle 0, no motion yet).
        let center = if positions.len() > 1 {
            geometry::centroid(&positions)
        } else {
            Some(p)
        }?;

        let capture_color = scoring::raw_score(&positions).map(|r| scoring::color_for_score(r.score));

        if !positions.is_empty() {
            let current_angle = geometry::angle_about(p, center);
            if self.session.guard.evaluate(current_angle, positions.len()) == Verdict::Reversal {
                self.session.is_paused = true;
                return Some(Evaluation::of(Outcome::WrongDirection));
            }
        }

        self.session.path.push(PathPoint {
            pos: p,
            color: capture_color,
        });

        let positions = self.session.positions();
        let live = scoring::score_path(&positions);

        if let Some(sweep) = completion::measure_sweep(&positions) {
            if sweep.is_full_turn() {
                return Some(self.finalize_completion(&positions, sweep.avg_radius));
            }
        }

        Some(Evaluation::of(match live {
            Some(result) => Outcome::Live { score: result.score },
            None => Outcome::InsufficientData,
        }))
    }

    /// Pointer released. Pauses the attempt and reports a final reading;
    /// `None` when the session was already paused (completion or reversal
    /// got there first). Never writes the high score.
    pub fn on_gesture_end(&mut self) -> Option<Evaluation> {
        if self.session.is_paused {
            return None;
        }
        self.session.is_drawing = false;
        self.session.is_paused = true;

        let positions = self.session.positions();
        Some(Evaluation::of(match scoring::score_path(&positions) {
            Some(result) => Outcome::Final { score: result.score },
            None => Outcome::InsufficientData,
        }))
    }

    fn finalize_completion(&mut self, positions: &[Point], avg_radius: f64) -> Evaluation {
        self.session.is_drawing = false;
        self.session.is_paused = true;

        // Completion requires >= 50 points, so the final score always exists.
        let score = scoring::score_path(positions)
            .map(|r| r.score)
            .unwrap_or(0.0);

        if avg_radius < MIN_AVG_RADIUS {
            // Tight wobbles can score near 100; they never touch the best.
            return Evaluation::of(Outcome::TooSmall { score });
        }

        let mut eval = Evaluation::of(Outcome::Completed { score });
        eval.celebrate = score >= CELEBRATION_THRESHOLD;
        if score > self.high_score {
            self.high_score = score;
            self.store.save(score);
            eval.new_high_score = Some(score);
        }
        eval
    }
}
