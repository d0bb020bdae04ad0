//! Property-based tests for fitting and scoring invariants using the `proptest` crate.

use std::f64::consts::TAU;

use proptest::prelude::*;

use circle_fit::{
    fit, score_breakdown, Circle, ErrorCode, FitConfig, Point, PointSet, ScoreConfig,
    ValidationConfig,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary circle center in a canvas-sized range.
fn arb_center() -> impl Strategy<Value = (f64, f64)> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0)
}

/// Arbitrary radius comfortably above the solver's minimum.
fn arb_radius() -> impl Strategy<Value = f64> {
    0.5f64..500.0
}

/// Arbitrary loose cloud of points.
fn arb_cloud() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 4..40)
}

/// Points scattered around a circle with radial noise up to 20% of the radius.
fn arb_noisy_stroke() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0f64..TAU, 0.8f64..1.2), 4..60)
}

fn ring(n: usize, r: f64, cx: f64, cy: f64, phase: f64) -> PointSet {
    let points = (0..n)
        .map(|i| {
            let t = phase + TAU * i as f64 / n as f64;
            Point::new(cx + r * t.cos(), cy + r * t.sin())
        })
        .collect();
    PointSet::new(points).unwrap()
}

fn stroke(samples: &[(f64, f64)], r: f64, cx: f64, cy: f64) -> PointSet {
    let points = samples
        .iter()
        .map(|&(t, s)| Point::new(cx + s * r * t.cos(), cy + s * r * t.sin()))
        .collect();
    PointSet::new(points).unwrap()
}

const TOL: f64 = 1e-9;

// ---------------------------------------------------------------------------
// 1. Exact rings are recovered with a high score
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn exact_ring_is_recovered(
        (cx, cy) in arb_center(),
        r in arb_radius(),
        n in 16usize..200,
        phase in 0.0f64..TAU,
    ) {
        let points = ring(n, r, cx, cy, phase);
        let result = fit(&points, &FitConfig::seeded(0)).unwrap();
        prop_assert!(result.converged);
        prop_assert!((result.circle.radius - r).abs() < 1e-6 * r.max(1.0),
            "radius {} != {}", result.circle.radius, r);
        prop_assert!((result.circle.center_x - cx).abs() < 1e-6 * r.max(1.0));
        prop_assert!((result.circle.center_y - cy).abs() < 1e-6 * r.max(1.0));
        prop_assert!(result.objective < 0.01);
        prop_assert!(result.score > 95.0, "score {}", result.score);
    }
}

// ---------------------------------------------------------------------------
// 2. Fewer than four points is always TooFewPoints
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn short_input_is_too_few_points(
        coords in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..4),
    ) {
        let points = PointSet::new(coords.iter().map(|&p| Point::from(p)).collect()).unwrap();
        prop_assert_eq!(points.error_code(&ValidationConfig::default()), ErrorCode::TooFewPoints);
        let err = fit(&points, &FitConfig::seeded(0)).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::TooFewPoints);
    }
}

// ---------------------------------------------------------------------------
// 3. Scale invariance: scaling points and circle together keeps the score
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn score_is_scale_invariant(
        samples in arb_noisy_stroke(),
        (cx, cy) in arb_center(),
        r in arb_radius(),
        k in 0.01f64..100.0,
    ) {
        let config = ScoreConfig::default();
        let points = stroke(&samples, r, cx, cy);
        let scaled = PointSet::new(points.iter().map(|p| Point::new(k * p.x, k * p.y)).collect()).unwrap();

        let a = score_breakdown(&points, &Circle::new(r, cx, cy), &config);
        let b = score_breakdown(&scaled, &Circle::new(k * r, k * cx, k * cy), &config);
        prop_assert!((a.raw - b.raw).abs() < TOL, "raw {} != {}", a.raw, b.raw);
        prop_assert!((a.dgap - b.dgap).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// 4. Rotation invariance: rotating points about the center keeps the score
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn score_is_rotation_invariant(
        samples in arb_noisy_stroke(),
        (cx, cy) in arb_center(),
        r in arb_radius(),
        theta in -std::f64::consts::PI..std::f64::consts::PI,
    ) {
        let config = ScoreConfig::default();
        let circle = Circle::new(r, cx, cy);
        let points = stroke(&samples, r, cx, cy);
        let (sin, cos) = theta.sin_cos();
        let rotated = PointSet::new(
            points
                .iter()
                .map(|p| {
                    let (dx, dy) = (p.x - cx, p.y - cy);
                    Point::new(cx + cos * dx - sin * dy, cy + sin * dx + cos * dy)
                })
                .collect(),
        )
        .unwrap();

        let a = score_breakdown(&points, &circle, &config);
        let b = score_breakdown(&rotated, &circle, &config);
        prop_assert!((a.dgap - b.dgap).abs() < TOL, "dgap {} != {}", a.dgap, b.dgap);
        prop_assert!((a.dradius - b.dradius).abs() < TOL);
        prop_assert!((a.dmass - b.dmass).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// 5. Any cloud terminates with a bounded score, reproducibly
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_cloud_terminates_deterministically(
        coords in arb_cloud(),
        seed in any::<u64>(),
    ) {
        let points = PointSet::new(coords.iter().map(|&p| Point::from(p)).collect()).unwrap();
        let config = FitConfig::seeded(seed);
        let a = fit(&points, &config).unwrap();
        let b = fit(&points, &config).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert!((0.0..=100.0).contains(&a.score), "score {}", a.score);
        prop_assert!(a.restarts <= config.finder.max_restarts);
    }
}
