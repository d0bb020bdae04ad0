//! Restart-on-divergence driver around the Newton solver, and the final fit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::FitConfig;
use crate::error::FitError;
use crate::point_set::{Circle, PointSet};
use crate::score::{score_breakdown, shape_score, ScoreBreakdown};
use crate::solver::{objective, solve};

/// How a new center is drawn when Newton's method diverges.
///
/// `c` below is the matching coordinate of the closed-form initial center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReseedPolicy {
    /// Uniform on `[-spread·c, spread·c]`.
    Symmetric { spread: f64 },
    /// Uniform on `[low·c, high·c]`.
    Proportional { low: f64, high: f64 },
}

impl ReseedPolicy {
    fn range(&self, c: f64) -> (f64, f64) {
        match *self {
            ReseedPolicy::Symmetric { spread } => (-spread * c, spread * c),
            ReseedPolicy::Proportional { low, high } => (low * c, high * c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Reseeded Newton runs allowed after the first one.
    pub max_restarts: usize,
    /// An objective below this accepts the circle regardless of step size.
    pub objective_tolerance: f64,
    /// Reseeded radius is uniform on `[min_scale·r + min_offset, max_scale·r + max_offset]`.
    pub radius_min_scale: f64,
    pub radius_min_offset: f64,
    pub radius_max_scale: f64,
    pub radius_max_offset: f64,
    pub reseed: ReseedPolicy,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_restarts: 10,
            objective_tolerance: 0.01,
            radius_min_scale: 0.1,
            radius_min_offset: 0.1,
            radius_max_scale: 50.0,
            radius_max_offset: 1.0,
            reseed: ReseedPolicy::Symmetric { spread: 20.0 },
        }
    }
}

/// Which rule accepted the final circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acceptance {
    /// The closed-form estimate already had a negligible objective.
    InitialGuess,
    /// A Newton run converged by step size.
    Newton,
    /// A Newton run stopped early but left a negligible objective.
    Objective,
    /// Every run failed; the closed-form estimate is returned unrefined.
    Fallback,
}

/// Outcome of a complete fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub circle: Circle,
    pub converged: bool,
    pub score: f64,
    pub acceptance: Acceptance,
    /// Reseeded runs performed before acceptance.
    pub restarts: usize,
    /// Newton iterations summed over all runs.
    pub iterations: usize,
    pub objective: f64,
    pub breakdown: ScoreBreakdown,
}

/// Draw a fresh solver seed around the closed-form estimate `initial`.
///
/// Returns `None` when a sampling range is not finite, which happens once the
/// input coordinates are large enough for the estimate to overflow.
pub fn randomise_guess<R: Rng + ?Sized>(
    initial: &Circle,
    config: &FinderConfig,
    rng: &mut R,
) -> Option<Circle> {
    let r0 = initial.radius;
    let radius = sample(
        rng,
        config.radius_min_scale * r0 + config.radius_min_offset,
        config.radius_max_scale * r0 + config.radius_max_offset,
    )?;

    let (x_lo, x_hi) = config.reseed.range(initial.center_x);
    let (y_lo, y_hi) = config.reseed.range(initial.center_y);
    let center_x = sample(rng, x_lo, x_hi)?;
    let center_y = sample(rng, y_lo, y_hi)?;

    Some(Circle::new(radius, center_x, center_y))
}

/// Uniform draw between `a` and `b` in either order.
fn sample<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> Option<f64> {
    let (lo, hi) = (a.min(b), a.max(b));
    // `gen_range` asserts that the width of the range is finite.
    (hi - lo).is_finite().then(|| rng.gen_range(lo..=hi))
}

/// Find the best circle through `points` and score it.
///
/// Never fails: when every Newton run diverges, or no finite reseed can be
/// drawn, the closed-form initial guess is returned with `converged = false`.
#[instrument(skip_all, fields(n = points.len()))]
pub fn find_best_circle<R: Rng + ?Sized>(points: &PointSet, config: &FitConfig, rng: &mut R) -> FitResult {
    let finder = &config.finder;
    let initial = points.initial_guess();

    let initial_objective = objective(points, &initial);
    if initial_objective < finder.objective_tolerance {
        debug!(initial_objective, "initial guess accepted");
        return finish(points, config, initial, Acceptance::InitialGuess, 0, 0);
    }

    let mut guess = initial;
    let mut iterations = 0;

    for attempt in 0..=finder.max_restarts {
        let outcome = solve(points, &guess, &config.solver);
        iterations += outcome.iterations;

        if outcome.converged {
            return finish(points, config, outcome.circle, Acceptance::Newton, attempt, iterations);
        }
        if outcome.final_objective < finder.objective_tolerance {
            return finish(points, config, outcome.circle, Acceptance::Objective, attempt, iterations);
        }

        let Some(next) = randomise_guess(&initial, finder, rng) else {
            warn!(attempt, "reseed range is not finite, falling back to initial guess");
            return finish(points, config, initial, Acceptance::Fallback, attempt, iterations);
        };
        guess = next;
        debug!(
            attempt,
            status = ?outcome.status,
            radius = guess.radius,
            center_x = guess.center_x,
            center_y = guess.center_y,
            "newton failed, reseeding"
        );
    }

    warn!(
        max_restarts = finder.max_restarts,
        "restart budget exhausted, falling back to initial guess"
    );
    finish(points, config, initial, Acceptance::Fallback, finder.max_restarts, iterations)
}

fn finish(
    points: &PointSet,
    config: &FitConfig,
    circle: Circle,
    acceptance: Acceptance,
    restarts: usize,
    iterations: usize,
) -> FitResult {
    let converged = acceptance != Acceptance::Fallback;
    let breakdown = score_breakdown(points, &circle, &config.score);
    let score = shape_score(breakdown.raw, converged, &config.score);

    info!(
        ?acceptance,
        restarts,
        iterations,
        radius = circle.radius,
        center_x = circle.center_x,
        center_y = circle.center_y,
        score,
        "circle fit complete"
    );

    FitResult {
        circle,
        converged,
        score,
        acceptance,
        restarts,
        iterations,
        objective: objective(points, &circle),
        breakdown,
    }
}

/// Validate `points` and fit a circle, seeding the restart source from
/// `config.seed` (or OS entropy when unset).
pub fn fit(points: &PointSet, config: &FitConfig) -> Result<FitResult, FitError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    fit_with_rng(points, config, &mut rng)
}

/// Like [`fit`] with an explicit random source for reseeding.
#[instrument(skip_all, fields(n = points.len()))]
pub fn fit_with_rng<R: Rng + ?Sized>(
    points: &PointSet,
    config: &FitConfig,
    rng: &mut R,
) -> Result<FitResult, FitError> {
    if let Err(err) = points.validate(&config.validation) {
        if config.validation.enforce {
            return Err(err);
        }
        warn!(code = ?err.code(), %err, "fitting invalid input");
    }
    Ok(find_best_circle(points, config, rng))
}
