//! Least-squares circle fitting and shape scoring for hand-drawn strokes.
//!
//! The pipeline has three layers:
//!
//! - [`point_set`] validates raw points and produces a closed-form initial circle.
//! - [`solver`] refines a circle with Newton-Raphson on the sum of squared deviances.
//! - [`finder`] restarts the solver from random seeds on divergence and scores the fit.
//!
//! [`fit`] runs all three and is the entry point most callers need.

pub mod config;
pub mod error;
pub mod finder;
pub mod input;
pub mod point_set;
pub mod score;
pub mod solver;

pub use config::{FitConfig, ValidationConfig};
pub use error::{ErrorCode, FitError};
pub use finder::{
    find_best_circle, fit, fit_with_rng, randomise_guess, Acceptance, FinderConfig, FitResult,
    ReseedPolicy,
};
pub use input::{parse_points, points_from_value};
pub use point_set::{Circle, Point, PointSet};
pub use score::{score_breakdown, shape_score, ScoreBreakdown, ScoreConfig};
pub use solver::{
    deviance, gradient, hessian, objective, solve, DivergenceReason, SolveStatus, SolverConfig,
    SolverOutcome,
};
