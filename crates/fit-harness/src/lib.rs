//! Test harness for the circle fitter.
//!
//! Provides synthetic strokes, rich assertions, and invariance oracles so
//! scenario tests can script a fit and verify it in a few lines.
//!
//! # Key Components
//!
//! - [`helpers`]: error type, stroke generators, point-set transforms
//! - [`assertions`]: assertion helpers with diagnostics
//! - [`oracle`]: verification functions returning pass/fail verdicts

pub mod assertions;
pub mod helpers;
pub mod oracle;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
