//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics,
//! so a scenario can collect every failure in one pass.

use circle_fit::{fit, score_breakdown, Circle, FitConfig, FitResult, Point, PointSet, ScoreConfig};

use crate::helpers::{rotated, HarnessError};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    /// Convert a failed verdict into a [`HarnessError`].
    pub fn into_result(self) -> Result<(), HarnessError> {
        if self.passed {
            Ok(())
        } else {
            Err(HarnessError::OracleFailure {
                oracle: self.oracle_name,
                detail: self.detail,
            })
        }
    }
}

// ── Geometry Oracles ────────────────────────────────────────────────────────

/// Every point lies within `tol` of the circle.
pub fn check_points_on_circle(points: &PointSet, circle: &Circle, tol: f64) -> OracleVerdict {
    let center = circle.center();
    let worst = points
        .iter()
        .map(|p| (p.distance_to(&center) - circle.radius).abs())
        .fold(0.0, f64::max);
    let detail = format!("max radial error {:.3e} (tol {:.1e})", worst, tol);
    if worst <= tol {
        OracleVerdict::pass_val("points_on_circle", detail, worst)
    } else {
        OracleVerdict::fail_val("points_on_circle", detail, worst)
    }
}

// ── Score Oracles ───────────────────────────────────────────────────────────

/// Score lies in the displayable range `[0, 100]`.
pub fn check_score_bounds(result: &FitResult) -> OracleVerdict {
    let detail = format!("score {:.4}", result.score);
    if (0.0..=100.0).contains(&result.score) {
        OracleVerdict::pass_val("score_bounds", detail, result.score)
    } else {
        OracleVerdict::fail_val("score_bounds", detail, result.score)
    }
}

/// Scaling points and circle by `k` leaves the raw score unchanged.
pub fn check_scale_invariance(
    points: &PointSet,
    circle: &Circle,
    k: f64,
    config: &ScoreConfig,
) -> OracleVerdict {
    let scaled: Vec<Point> = points.iter().map(|p| Point::new(k * p.x, k * p.y)).collect();
    let scaled = match PointSet::new(scaled) {
        Ok(set) => set,
        Err(err) => return OracleVerdict::fail("scale_invariance", err.to_string()),
    };
    let scaled_circle = Circle::new(k * circle.radius, k * circle.center_x, k * circle.center_y);

    let before = score_breakdown(points, circle, config).raw;
    let after = score_breakdown(&scaled, &scaled_circle, config).raw;
    compare("scale_invariance", before, after, 1e-9)
}

/// Rotating points about the circle's center by `theta` leaves the raw score unchanged.
pub fn check_rotation_invariance(
    points: &PointSet,
    circle: &Circle,
    theta: f64,
    config: &ScoreConfig,
) -> OracleVerdict {
    let turned = rotated(points.points(), theta, circle.center_x, circle.center_y);
    let turned = match PointSet::new(turned) {
        Ok(set) => set,
        Err(err) => return OracleVerdict::fail("rotation_invariance", err.to_string()),
    };

    let before = score_breakdown(points, circle, config).raw;
    let after = score_breakdown(&turned, circle, config).raw;
    compare("rotation_invariance", before, after, 1e-9)
}

/// Two seeded fits of the same input agree exactly.
pub fn check_deterministic(points: &PointSet, seed: u64) -> OracleVerdict {
    let config = FitConfig::seeded(seed);
    match (fit(points, &config), fit(points, &config)) {
        (Ok(a), Ok(b)) if a == b => OracleVerdict::pass_val(
            "deterministic",
            format!("seed {} reproduced score {:.4}", seed, a.score),
            a.score,
        ),
        (Ok(a), Ok(b)) => OracleVerdict::fail(
            "deterministic",
            format!("seed {}: {:?} != {:?}", seed, a, b),
        ),
        (Err(err), _) | (_, Err(err)) => OracleVerdict::fail("deterministic", err.to_string()),
    }
}

fn compare(name: &str, before: f64, after: f64, tol: f64) -> OracleVerdict {
    let diff = (before - after).abs();
    let detail = format!("raw {:.12} vs {:.12} (diff {:.3e})", before, after, diff);
    if diff <= tol {
        OracleVerdict::pass_val(name, detail, diff)
    } else {
        OracleVerdict::fail_val(name, detail, diff)
    }
}
