//! End-to-end behaviour of the recorder and the transform stack.

use sketch_core::{Affine, AngleMode, CurveRecorder, Point, Point3, TransformStack};

const EPS: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

fn one_frame(rec: &mut CurveRecorder, track: usize, point: Option<Point3>) {
    rec.begin_record().unwrap();
    if let Some(p) = point {
        rec.add_point(p, track).unwrap();
    }
    rec.end_record().unwrap();
}

// ── recorder ──────────────────────────────────────────────────────────────

#[test]
fn history_keeps_only_the_most_recent_frames() {
    let capacity = 50;
    let mut rec = CurveRecorder::with_capacity(capacity);
    for i in 0..(capacity * 3 + 7) {
        one_frame(&mut rec, 0, Some(Point3::new(i as f64, 0.0, 0.0)));
    }
    assert_eq!(rec.len(), capacity);

    let curve = rec.curve(0);
    assert_eq!(curve.len(), capacity);
    let first = (capacity * 2 + 7) as f64;
    for (k, entry) in curve.iter().enumerate() {
        assert_eq!(entry.map(|p| p.x), Some(first + k as f64));
    }
}

#[test]
fn default_capacity_is_a_thousand_frames() {
    let mut rec = CurveRecorder::new();
    for _ in 0..1500 {
        one_frame(&mut rec, 0, None);
    }
    assert_eq!(rec.len(), 1000);
}

#[test]
fn gaps_are_distinct_from_the_origin() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let later = Point3::new(4.0, 5.0, 6.0);

    let mut rec = CurveRecorder::new();
    one_frame(&mut rec, 2, Some(origin));
    one_frame(&mut rec, 0, Some(later)); // track 2 missing
    one_frame(&mut rec, 2, Some(later));

    assert_eq!(rec.curve(2), vec![Some(origin), None, Some(later)]);
    assert_eq!(rec.polylines(2), vec![vec![origin], vec![later]]);
}

#[test]
fn reset_clears_history_but_not_the_open_frame() {
    let mut rec = CurveRecorder::new();
    for _ in 0..10 {
        one_frame(&mut rec, 0, Some(Point3::default()));
    }

    rec.begin_record().unwrap();
    rec.add_point(Point3::new(1.0, 1.0, 1.0), 3).unwrap();
    rec.reset();
    assert!(rec.is_empty());
    assert!(rec.is_recording());

    rec.add_point(Point3::new(2.0, 2.0, 2.0), 4).unwrap();
    rec.end_record().unwrap();

    assert_eq!(rec.len(), 1);
    assert_eq!(rec.curve(3), vec![Some(Point3::new(1.0, 1.0, 1.0))]);
    assert_eq!(rec.curve(4), vec![Some(Point3::new(2.0, 2.0, 2.0))]);
}

// ── transform stack ───────────────────────────────────────────────────────

#[test]
fn push_translate_pop_restores_the_prior_transform() {
    let mut m = TransformStack::new();
    m.translate(12.5, -3.0);
    m.rotate(0.7);
    m.scale(1.5, 0.5);
    let before = m.get();

    m.push();
    m.translate(40.0, 9.0);
    assert_ne!(m.get(), before);
    m.pop().unwrap();

    let (a, b) = (m.get().as_coeffs(), before.as_coeffs());
    for i in 0..6 {
        assert_close(a[i], b[i]);
    }
}

#[test]
fn composition_follows_call_order() {
    let mut m = TransformStack::new();
    m.angle_mode(AngleMode::Degrees);

    m.translate(10.0, 0.0);
    m.rotate(90.0);
    assert_close(m.screen_x(0.0, 0.0), 10.0);
    assert_close(m.screen_y(0.0, 0.0), 0.0);

    m.set(None);
    m.rotate(90.0);
    m.translate(10.0, 0.0);
    assert_close(m.screen_x(0.0, 0.0), 0.0);
    assert_close(m.screen_y(0.0, 0.0), 10.0);
}

#[test]
fn screen_projection_matches_matrix_product() {
    let mut m = TransformStack::new();
    m.angle_mode(AngleMode::Degrees);

    let ops: [fn(&mut TransformStack); 6] = [
        |m: &mut TransformStack| m.translate(320.0, 240.0),
        |m: &mut TransformStack| m.rotate(-37.0),
        |m: &mut TransformStack| m.scale(1.25, 0.8),
        |m: &mut TransformStack| m.translate(0.0, 55.0),
        |m: &mut TransformStack| m.rotate(112.5),
        |m: &mut TransformStack| m.scale_uniform(0.85),
    ];

    let samples = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-13.5, 27.25), (400.0, -90.0)];
    for op in ops {
        op(&mut m);
        let [a, b, c, d, e, f] = m.get().as_coeffs();
        for &(x, y) in &samples {
            // explicit 3×3 homogeneous product
            let rows = [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]];
            let v = [x, y, 1.0];
            let mapped: Vec<f64> = rows
                .iter()
                .map(|r| r[0] * v[0] + r[1] * v[1] + r[2] * v[2])
                .collect();
            assert_close(m.screen_x(x, y), mapped[0]);
            assert_close(m.screen_y(x, y), mapped[1]);
            assert_close(mapped[2], 1.0);

            let p = m.get() * Point::new(x, y);
            assert_close(m.screen_x(x, y), p.x);
            assert_close(m.screen_y(x, y), p.y);
        }
    }
}

#[test]
fn nested_scopes_unwind_in_order() {
    let mut m = TransformStack::new();
    let mut snapshots = vec![m.get()];
    for i in 1..=5 {
        m.push();
        m.translate(i as f64, 0.0);
        m.rotate(0.1 * i as f64);
        snapshots.push(m.get());
    }
    assert_eq!(m.depth(), 5);
    snapshots.pop();
    while let Some(expected) = snapshots.pop() {
        assert_eq!(m.pop().unwrap(), expected);
    }
    assert_eq!(m.get(), Affine::IDENTITY);
    assert!(m.pop().is_err());
}
