//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes the expected and actual values plus the fit's
//! acceptance path and score breakdown.

use circle_fit::{Acceptance, Circle, FitResult};

use crate::helpers::HarnessError;

fn summary(result: &FitResult) -> String {
    format!(
        "r={:.4} c=({:.4}, {:.4}) converged={} acceptance={:?} restarts={} score={:.2} \
         dgap={:.4} dradius={:.4} dmass={:.4}",
        result.circle.radius,
        result.circle.center_x,
        result.circle.center_y,
        result.converged,
        result.acceptance,
        result.restarts,
        result.score,
        result.breakdown.dgap,
        result.breakdown.dradius,
        result.breakdown.dmass,
    )
}

/// Assert the fitted circle matches `expected` within `tol` in every parameter.
pub fn assert_circle_near(
    result: &FitResult,
    expected: &Circle,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = &result.circle;
    let diffs = [
        ("radius", actual.radius, expected.radius),
        ("center_x", actual.center_x, expected.center_x),
        ("center_y", actual.center_y, expected.center_y),
    ];
    for (name, got, want) in diffs {
        if (got - want).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] {}: expected {:.4}, got {:.4} (tol={})\n  fit: {}",
                    ctx,
                    name,
                    want,
                    got,
                    tol,
                    summary(result),
                ),
            });
        }
    }
    Ok(())
}

/// Assert the score lies in `[min, max]`.
pub fn assert_score_between(
    result: &FitResult,
    min: f64,
    max: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if (min..=max).contains(&result.score) {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] score {:.2} outside [{}, {}]\n  fit: {}",
                ctx,
                result.score,
                min,
                max,
                summary(result),
            ),
        })
    }
}

pub fn assert_converged(result: &FitResult, ctx: &str) -> Result<(), HarnessError> {
    if result.converged {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] fit did not converge\n  fit: {}", ctx, summary(result)),
        })
    }
}

pub fn assert_acceptance(
    result: &FitResult,
    expected: Acceptance,
    ctx: &str,
) -> Result<(), HarnessError> {
    if result.acceptance == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected acceptance {:?}, got {:?}\n  fit: {}",
                ctx,
                expected,
                result.acceptance,
                summary(result),
            ),
        })
    }
}

/// Assert `better` outscores `worse`.
pub fn assert_ranks_above(
    better: &FitResult,
    worse: &FitResult,
    ctx: &str,
) -> Result<(), HarnessError> {
    if better.score > worse.score {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {:.2} > {:.2}\n  better: {}\n  worse:  {}",
                ctx,
                better.score,
                worse.score,
                summary(better),
                summary(worse),
            ),
        })
    }
}
