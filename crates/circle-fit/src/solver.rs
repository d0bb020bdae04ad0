//! Newton-Raphson refinement of a circle against the algebraic residual.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::point_set::{Circle, Point, PointSet};

/// Why a Newton run was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceReason {
    /// The Hessian could not be factorized.
    SingularSystem,
    /// The step norm exceeded the blow-up threshold.
    StepBlowUp,
    /// The radius dropped below the minimum.
    RadiusCollapse,
    /// The step contained NaN or infinity.
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Converged,
    Diverged(DivergenceReason),
    IterationLimit,
}

/// Result of one Newton run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverOutcome {
    pub circle: Circle,
    pub converged: bool,
    pub iterations: usize,
    pub final_objective: f64,
    pub status: SolveStatus,
}

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// A step shorter than this counts as converged.
    pub step_tolerance: f64,
    /// A step longer than this counts as diverged.
    pub blow_up_threshold: f64,
    /// Smallest radius the iteration may reach.
    pub min_radius: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            step_tolerance: 0.01,
            blow_up_threshold: 10_000.0,
            min_radius: 0.1,
        }
    }
}

/// Signed residual `r² - |p - c|²`. Zero when `p` lies on the circle.
pub fn deviance(point: &Point, circle: &Circle) -> f64 {
    let dx = point.x - circle.center_x;
    let dy = point.y - circle.center_y;
    circle.radius * circle.radius - (dx * dx + dy * dy)
}

/// Sum of squared deviances over all points.
pub fn objective(points: &PointSet, circle: &Circle) -> f64 {
    points.iter().map(|p| deviance(p, circle).powi(2)).sum()
}

/// Gradient of [`objective`] with respect to `[r, cx, cy]`.
pub fn gradient(points: &PointSet, circle: &Circle) -> Vector3<f64> {
    let r = circle.radius;
    let mut g = Vector3::zeros();
    for p in points {
        let d = deviance(p, circle);
        let dx = p.x - circle.center_x;
        let dy = p.y - circle.center_y;
        g += Vector3::new(r * d, dx * d, dy * d);
    }
    g * 4.0
}

/// Hessian of [`objective`] with respect to `[r, cx, cy]`.
pub fn hessian(points: &PointSet, circle: &Circle) -> Matrix3<f64> {
    let r = circle.radius;
    let mut h = Matrix3::zeros();
    for p in points {
        let d = deviance(p, circle);
        let dx = p.x - circle.center_x;
        let dy = p.y - circle.center_y;

        let h00 = 2.0 * r * r + d;
        let h01 = 2.0 * r * dx;
        let h02 = 2.0 * r * dy;
        let h11 = 2.0 * dx * dx - d;
        let h12 = 2.0 * dx * dy;
        let h22 = 2.0 * dy * dy - d;

        #[rustfmt::skip]
        let part = Matrix3::new(
            h00, h01, h02,
            h01, h11, h12,
            h02, h12, h22,
        );
        h += part;
    }
    h * 4.0
}

/// Mutable state of a single Newton run.
struct SolverState {
    guess: Vector3<f64>,
    converged: bool,
    iterations: usize,
}

impl SolverState {
    fn start(initial: &Circle) -> Self {
        Self {
            guess: initial.to_vector(),
            converged: false,
            iterations: 0,
        }
    }

    fn finish(self, points: &PointSet, status: SolveStatus) -> SolverOutcome {
        let circle = Circle::from_vector(&self.guess);
        SolverOutcome {
            circle,
            converged: self.converged,
            iterations: self.iterations,
            final_objective: objective(points, &circle),
            status,
        }
    }
}

/// Refine `initial` with full Newton-Raphson on [`objective`].
///
/// Each iteration solves `H·step = -g`. The run stops as converged when the
/// step is shorter than `step_tolerance`, and as diverged when the Hessian is
/// singular, the step blows up, or the radius collapses below `min_radius`.
#[instrument(skip(points, config), fields(n = points.len()))]
pub fn solve(points: &PointSet, initial: &Circle, config: &SolverConfig) -> SolverOutcome {
    let mut state = SolverState::start(initial);

    for iteration in 0..config.max_iterations {
        state.iterations = iteration;
        let circle = Circle::from_vector(&state.guess);
        let h = hessian(points, &circle);
        let g = gradient(points, &circle);

        let Some(step) = h.lu().solve(&-g) else {
            debug!(iteration, "singular Hessian");
            return state.finish(points, SolveStatus::Diverged(DivergenceReason::SingularSystem));
        };

        let step_norm = step.norm();
        if !step_norm.is_finite() {
            debug!(iteration, "non-finite step");
            return state.finish(points, SolveStatus::Diverged(DivergenceReason::NonFinite));
        }

        if step_norm < config.step_tolerance {
            state.converged = true;
            debug!(iteration, step_norm, "newton converged");
            return state.finish(points, SolveStatus::Converged);
        }

        if step_norm > config.blow_up_threshold {
            debug!(iteration, step_norm, "step blew up");
            return state.finish(points, SolveStatus::Diverged(DivergenceReason::StepBlowUp));
        }

        state.guess += step;

        if state.guess[0] < config.min_radius {
            debug!(iteration, radius = state.guess[0], "radius collapsed");
            return state.finish(points, SolveStatus::Diverged(DivergenceReason::RadiusCollapse));
        }
    }

    state.iterations = config.max_iterations;
    debug!(max_iterations = config.max_iterations, "iteration limit reached");
    state.finish(points, SolveStatus::IterationLimit)
}
