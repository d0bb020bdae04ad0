//! Helper functions: error type, stroke generators, point-set transforms.

use std::f64::consts::TAU;

use circle_fit::{FitError, Point, PointSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("fit error: {0}")]
    Fit(#[from] FitError),
}

// ── Stroke Generators ───────────────────────────────────────────────────────

/// `n` points evenly spaced on a full circle, starting at angle `phase`.
pub fn ring(n: usize, radius: f64, cx: f64, cy: f64, phase: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = phase + TAU * i as f64 / n as f64;
            Point::new(cx + radius * t.cos(), cy + radius * t.sin())
        })
        .collect()
}

/// `n` points evenly spaced along an arc of `sweep` radians starting at `start`.
pub fn arc(n: usize, radius: f64, cx: f64, cy: f64, start: f64, sweep: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = start + sweep * i as f64 / n as f64;
            Point::new(cx + radius * t.cos(), cy + radius * t.sin())
        })
        .collect()
}

/// A ring whose radius wobbles uniformly by up to `noise` (fraction of the radius).
pub fn noisy_ring(n: usize, radius: f64, cx: f64, cy: f64, noise: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let t = TAU * i as f64 / n as f64;
            let r = radius * (1.0 + rng.gen_range(-noise..=noise));
            Point::new(cx + r * t.cos(), cy + r * t.sin())
        })
        .collect()
}

/// Axis-aligned ellipse sampled at `n` even parameter steps.
pub fn ellipse(n: usize, a: f64, b: f64, cx: f64, cy: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = TAU * i as f64 / n as f64;
            Point::new(cx + a * t.cos(), cy + b * t.sin())
        })
        .collect()
}

/// The four corners of an axis-aligned square.
pub fn square_corners(x0: f64, y0: f64, side: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x0 + side, y0),
        Point::new(x0 + side, y0 + side),
        Point::new(x0, y0 + side),
    ]
}

/// `n` evenly spaced points on the segment from `a` to `b`.
pub fn segment(n: usize, a: Point, b: Point) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1).max(1) as f64;
            Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
        })
        .collect()
}

// ── Transforms ──────────────────────────────────────────────────────────────

/// Scale every point by `k` about the origin.
pub fn scaled(points: &[Point], k: f64) -> Vec<Point> {
    points.iter().map(|p| Point::new(k * p.x, k * p.y)).collect()
}

/// Rotate every point by `theta` radians about `(cx, cy)`.
pub fn rotated(points: &[Point], theta: f64, cx: f64, cy: f64) -> Vec<Point> {
    let (sin, cos) = theta.sin_cos();
    points
        .iter()
        .map(|p| {
            let (dx, dy) = (p.x - cx, p.y - cy);
            Point::new(cx + cos * dx - sin * dy, cy + sin * dx + cos * dy)
        })
        .collect()
}

pub fn translated(points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect()
}

/// Wrap generated points into a [`PointSet`].
pub fn point_set(points: Vec<Point>) -> Result<PointSet, HarnessError> {
    Ok(PointSet::new(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_points_on_circle() {
        for p in ring(12, 3.0, 1.0, -1.0, 0.3) {
            let d = p.distance_to(&Point::new(1.0, -1.0));
            assert!((d - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_noisy_ring_is_seeded() {
        assert_eq!(noisy_ring(20, 5.0, 0.0, 0.0, 0.1, 4), noisy_ring(20, 5.0, 0.0, 0.0, 0.1, 4));
        assert_ne!(noisy_ring(20, 5.0, 0.0, 0.0, 0.1, 4), noisy_ring(20, 5.0, 0.0, 0.0, 0.1, 5));
    }

    #[test]
    fn test_segment_endpoints() {
        let pts = segment(5, Point::new(0.0, 0.0), Point::new(4.0, 8.0));
        assert_eq!(pts.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(pts.last(), Some(&Point::new(4.0, 8.0)));
    }

    #[test]
    fn test_rotation_about_center_keeps_distance() {
        let pts = rotated(&[Point::new(3.0, 0.0)], TAU / 4.0, 0.0, 0.0);
        assert!((pts[0].x).abs() < 1e-12);
        assert!((pts[0].y - 3.0).abs() < 1e-12);
    }
}
