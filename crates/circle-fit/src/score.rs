//! Shape-quality score of a fitted circle.
//!
//! The points are re-centered on the fitted center and scaled by `1/r`, so a
//! perfect stroke lands on the unit circle. Three normalized error terms are
//! then combined into a raw score in `[0, 1]` and shaped into `[0, 100]`.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::point_set::{Circle, PointSet};

/// Normalized error terms of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Largest angular gap between consecutive points, as a fraction of a turn.
    pub dgap: f64,
    /// Mean absolute radial deviation from the unit circle.
    pub dradius: f64,
    /// Distance of the rescaled centroid from the origin.
    pub dmass: f64,
    /// `1 - (w_gap·dgap + w_radius·dradius + w_mass·dmass)`.
    pub raw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub gap_weight: f64,
    pub radius_weight: f64,
    pub mass_weight: f64,
    /// Multiplier applied to the raw score of a fit that never converged.
    pub unconverged_weight: f64,
    /// Clamp the raw score to `[0, 1]` and the final score to `[0, 100]`.
    pub clamp: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            gap_weight: 0.5,
            radius_weight: 0.6,
            mass_weight: 0.1,
            unconverged_weight: 10.0,
            clamp: true,
        }
    }
}

/// Compute the error terms of `circle` against `points`.
///
/// A circle without a positive finite radius cannot be normalized against and
/// is reported as covering nothing: `dgap = dradius = 1`.
pub fn score_breakdown(points: &PointSet, circle: &Circle, config: &ScoreConfig) -> ScoreBreakdown {
    if !(circle.radius > 0.0 && circle.is_finite()) {
        return ScoreBreakdown {
            dgap: 1.0,
            dradius: 1.0,
            dmass: 0.0,
            raw: 1.0 - (config.gap_weight + config.radius_weight),
        };
    }

    let n = points.len() as f64;
    let scale = 1.0 / circle.radius;

    let rescaled: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            (
                (p.x - circle.center_x) * scale,
                (p.y - circle.center_y) * scale,
            )
        })
        .collect();

    let (sum_x, sum_y) = rescaled
        .iter()
        .fold((0.0_f64, 0.0_f64), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let dmass = (sum_x / n).hypot(sum_y / n);

    let dradius = rescaled
        .iter()
        .map(|(x, y)| (x.hypot(*y) - 1.0).abs())
        .sum::<f64>()
        / n;

    // Angle measured from the +y axis; only the gaps matter.
    let mut angles: Vec<f64> = rescaled.iter().map(|(x, y)| x.atan2(*y)).collect();
    angles.sort_by(f64::total_cmp);
    let dgap = max_angular_gap(&angles) / TAU;

    let raw = 1.0
        - (config.gap_weight * dgap + config.radius_weight * dradius + config.mass_weight * dmass);

    ScoreBreakdown {
        dgap,
        dradius,
        dmass,
        raw,
    }
}

/// Largest gap between sorted angles, including the wrap across ±π.
fn max_angular_gap(sorted: &[f64]) -> f64 {
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return TAU;
    };
    let wrap = TAU - (last - first);
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(wrap, f64::max)
}

/// Turn a raw score into the displayed score.
///
/// Converged fits are shaped so that only near-perfect strokes keep a linear
/// score: `raw > 0.9` gives `100·raw`, `raw > 0.7` gives `100·raw²`, anything
/// lower `100·raw⁴`. Fits that never converged get `unconverged_weight·raw`.
pub fn shape_score(raw: f64, converged: bool, config: &ScoreConfig) -> f64 {
    let raw = if config.clamp { raw.clamp(0.0, 1.0) } else { raw };

    let score = if !converged {
        config.unconverged_weight * raw
    } else if raw > 0.9 {
        100.0 * raw
    } else if raw > 0.7 {
        100.0 * raw.powi(2)
    } else {
        100.0 * raw.powi(4)
    };

    if config.clamp {
        score.clamp(0.0, 100.0)
    } else {
        score
    }
}
