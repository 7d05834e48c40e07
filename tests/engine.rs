// Integration tests (native) for the `perfect-circle` crate.
// These tests avoid wasm-specific functionality and exercise the gesture
// engine end to end so they can run under `cargo test` on the host.

use perfect_circle::engine::{Engine, Evaluation, Outcome};
use perfect_circle::geometry::Point;
use perfect_circle::store::MemoryStore;

/// Points on a circle around `(cx, cy)`, one per `step_deg`, covering
/// `total_deg` inclusive. A real finger overshoots the closing point, so
/// completion scenarios pass a total a bit past 360.
fn ring(cx: f64, cy: f64, r: f64, step_deg: f64, total_deg: f64) -> Vec<Point> {
    let n = (total_deg / step_deg).round() as usize;
    (0..=n)
        .map(|i| {
            let a = (i as f64 * step_deg).to_radians();
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

/// Run a full gesture through the engine, returning every evaluation the
/// engine produced for the movement samples.
fn drive(engine: &mut Engine<MemoryStore>, points: &[Point]) -> Vec<Evaluation> {
    engine.on_gesture_start(points[0]);
    points[1..]
        .iter()
        .filter_map(|&p| engine.on_sample(p))
        .collect()
}

fn completed_score(evals: &[Evaluation]) -> Option<(f64, &Evaluation)> {
    evals.iter().find_map(|e| match e.outcome {
        Outcome::Completed { score } => Some((score, e)),
        _ => None,
    })
}

#[test]
fn clean_circle_completes_with_near_perfect_score() {
    let mut engine = Engine::new(MemoryStore::default());
    let evals = drive(&mut engine, &ring(300.0, 300.0, 80.0, 6.0, 378.0));

    let (score, eval) = completed_score(&evals).expect("loop should complete");
    assert!(score > 99.0, "on-circle samples should score ~100, got {score}");
    assert!(eval.celebrate, "score >= 90 triggers the celebration");
    assert_eq!(eval.new_high_score, Some(score));
    assert_eq!(engine.high_score(), score);
    assert_eq!(engine.store().saves, vec![score]);
}

#[test]
fn no_wrong_direction_during_a_consistent_sweep() {
    let mut engine = Engine::new(MemoryStore::default());
    let evals = drive(&mut engine, &ring(300.0, 300.0, 80.0, 6.0, 378.0));
    assert!(
        evals
            .iter()
            .all(|e| e.outcome != Outcome::WrongDirection),
        "constant-direction sweep must never be rejected"
    );
}

#[test]
fn samples_after_completion_are_ignored() {
    let mut engine = Engine::new(MemoryStore::default());
    drive(&mut engine, &ring(300.0, 300.0, 80.0, 6.0, 378.0));
    let len_at_completion = engine.path().len();

    assert_eq!(engine.on_sample(Point::new(300.0, 300.0)), None);
    assert_eq!(engine.path().len(), len_at_completion);
    // Releasing after completion reports nothing either.
    assert_eq!(engine.on_gesture_end(), None);
}

#[test]
fn tiny_circle_is_too_small_and_never_touches_the_best() {
    let mut engine = Engine::new(MemoryStore::with_value(10.0));
    let evals = drive(&mut engine, &ring(300.0, 300.0, 30.0, 6.0, 378.0));

    let eval = evals
        .iter()
        .find(|e| matches!(e.outcome, Outcome::TooSmall { .. }))
        .expect("small loop still completes, classified too small");
    if let Outcome::TooSmall { score } = eval.outcome {
        assert!(score > 90.0, "tight wobble scores high, got {score}");
    }
    assert!(!eval.celebrate);
    assert_eq!(eval.new_high_score, None);
    assert_eq!(engine.high_score(), 10.0);
    assert!(engine.store().saves.is_empty());
}

#[test]
fn counter_clockwise_circle_also_completes() {
    let mut engine = Engine::new(MemoryStore::default());
    let mut points = ring(300.0, 300.0, 80.0, 6.0, 378.0);
    points.reverse();
    let evals = drive(&mut engine, &points);
    assert!(completed_score(&evals).is_some());
}

#[test]
fn outward_spiral_scores_well_below_perfect() {
    let mut engine = Engine::new(MemoryStore::default());
    // 20 points, radius growing 40 -> 180 over a consistent sweep: too few
    // points for the completion detector, and the radii scatter drags the
    // live accuracy down.
    let points: Vec<Point> = (0..20)
        .map(|i| {
            let a = (f64::from(i) * 18.0).to_radians();
            let r = 40.0 + f64::from(i) * 7.5;
            Point::new(300.0 + r * a.cos(), 300.0 + r * a.sin())
        })
        .collect();
    let evals = drive(&mut engine, &points);

    let last = evals.last().unwrap();
    match last.outcome {
        Outcome::Live { score } => {
            assert!(score < 90.0, "spiral should not look circular, got {score}")
        }
        other => panic!("expected a live reading, got {other:?}"),
    }
    assert!(completed_score(&evals).is_none());
    assert!(engine.store().saves.is_empty());
}

#[test]
fn open_spiral_completes_on_sweep_alone() {
    let mut engine = Engine::new(MemoryStore::default());
    // Radius grows 60 -> ~200 over 400 degrees: the endpoints never come
    // close, yet the accumulated sweep passes a full turn. Only the sweep
    // gates completion; the loop-closure distance is informational.
    let points: Vec<Point> = (0..=80)
        .map(|i| {
            let a = (f64::from(i) * 5.0).to_radians();
            let r = 60.0 + f64::from(i) * 1.75;
            Point::new(300.0 + r * a.cos(), 300.0 + r * a.sin())
        })
        .collect();
    let evals = drive(&mut engine, &points);

    let (score, eval) = completed_score(&evals).expect("sweep past a full turn completes");
    assert!(score < 90.0, "widening spiral is far from circular, got {score}");
    assert!(!eval.celebrate);
    // Completed outcomes still update the best, however sloppy the loop.
    assert_eq!(engine.store().saves, vec![score]);
}

#[test]
fn reversal_aborts_at_the_reversing_sample() {
    let mut engine = Engine::new(MemoryStore::default());
    let forward = ring(300.0, 300.0, 100.0, 10.0, 240.0);
    engine.on_gesture_start(forward[0]);
    for &p in &forward[1..] {
        let eval = engine.on_sample(p).unwrap();
        assert_ne!(eval.outcome, Outcome::WrongDirection);
    }
    let len_before = engine.path().len();

    // Jump 50 degrees backwards along the same circle.
    let a = 190.0_f64.to_radians();
    let back = Point::new(300.0 + 100.0 * a.cos(), 300.0 + 100.0 * a.sin());
    let eval = engine.on_sample(back).unwrap();
    assert_eq!(eval.outcome, Outcome::WrongDirection);
    assert_eq!(
        engine.path().len(),
        len_before,
        "rejected sample must not join the path"
    );

    // The attempt is over: movement and release are ignored until the next
    // gesture start.
    assert_eq!(engine.on_sample(back), None);
    assert_eq!(engine.on_gesture_end(), None);
    assert!(engine.on_gesture_start(Point::new(10.0, 10.0)));
    assert_eq!(engine.path().len(), 1);
}

#[test]
fn release_mid_stroke_gives_a_final_reading_without_persisting() {
    let mut engine = Engine::new(MemoryStore::default());
    let arc = ring(300.0, 300.0, 80.0, 6.0, 120.0);
    drive(&mut engine, &arc);
    let eval = engine.on_gesture_end().unwrap();
    match eval.outcome {
        // A 120-degree arc's centroid sits well off the circle center, so
        // the reading is mediocre; it just has to be a Final one in range.
        Outcome::Final { score } => assert!((0.0..=100.0).contains(&score)),
        other => panic!("expected final reading, got {other:?}"),
    }
    assert_eq!(eval.new_high_score, None);
    assert!(engine.store().saves.is_empty());
}

#[test]
fn high_score_never_decreases() {
    let mut engine = Engine::new(MemoryStore::with_value(100.0));
    let evals = drive(&mut engine, &ring(300.0, 300.0, 80.0, 6.0, 378.0));
    let (score, eval) = completed_score(&evals).unwrap();
    assert!(score < 100.0);
    assert_eq!(eval.new_high_score, None);
    assert_eq!(engine.high_score(), 100.0);
    assert!(engine.store().saves.is_empty());
}

#[test]
fn best_survives_across_attempts_within_a_session() {
    let mut engine = Engine::new(MemoryStore::default());
    let evals = drive(&mut engine, &ring(300.0, 300.0, 80.0, 6.0, 378.0));
    let (best, _) = completed_score(&evals).unwrap();

    // Second, sloppier attempt: short arc released early. The best stays.
    assert!(engine.on_gesture_start(Point::new(0.0, 0.0)));
    let arc = ring(200.0, 200.0, 70.0, 10.0, 150.0);
    for &p in &arc {
        engine.on_sample(p);
    }
    assert!(engine.on_gesture_end().is_some());
    assert_eq!(engine.high_score(), best);
    assert_eq!(engine.store().saves.len(), 1);
}
