//! Top-level configuration for a fit.

use serde::{Deserialize, Serialize};

use crate::finder::FinderConfig;
use crate::score::ScoreConfig;
use crate::solver::SolverConfig;

/// Point-count limits checked before fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Fewer points than this is `TooFewPoints`.
    pub min_points: usize,
    /// This many points or more is `TooManyPoints`.
    pub max_points: usize,
    /// Reject invalid input instead of fitting it anyway.
    pub enforce: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_points: 4,
            max_points: 10_000,
            enforce: true,
        }
    }
}

/// Everything that tunes a call to [`crate::fit`].
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub validation: ValidationConfig,
    pub solver: SolverConfig,
    pub finder: FinderConfig,
    pub score: ScoreConfig,
    /// Seed for the reseeding random source. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl FitConfig {
    /// Defaults with a fixed reseeding seed, for reproducible fits.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
