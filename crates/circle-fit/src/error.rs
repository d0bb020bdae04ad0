use serde::{Deserialize, Serialize};

/// Numeric status code for a point set, as reported to the drawing front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    Ok,
    InvalidFormat,
    TooFewPoints,
    TooManyPoints,
    /// Reserved. No check reports it yet.
    CollinearData,
}

impl ErrorCode {
    pub fn code(self) -> u8 {
        match self {
            ErrorCode::Ok => 0,
            ErrorCode::InvalidFormat => 1,
            ErrorCode::TooFewPoints => 2,
            ErrorCode::TooManyPoints => 3,
            ErrorCode::CollinearData => 4,
        }
    }

    pub fn is_ok(self) -> bool {
        self == ErrorCode::Ok
    }
}

/// Errors raised before fitting starts. Solver divergence is not an error;
/// see [`crate::solver::DivergenceReason`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("invalid point data: {0}")]
    InvalidFormat(String),

    #[error("too few points: got {count}, need at least {min}")]
    TooFewPoints { count: usize, min: usize },

    #[error("too many points: got {count}, limit is {max}")]
    TooManyPoints { count: usize, max: usize },

    #[error("points are collinear")]
    CollinearData,
}

impl FitError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FitError::InvalidFormat(_) => ErrorCode::InvalidFormat,
            FitError::TooFewPoints { .. } => ErrorCode::TooFewPoints,
            FitError::TooManyPoints { .. } => ErrorCode::TooManyPoints,
            FitError::CollinearData => ErrorCode::CollinearData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_front_end_numbering() {
        assert_eq!(ErrorCode::Ok.code(), 0);
        assert_eq!(ErrorCode::InvalidFormat.code(), 1);
        assert_eq!(ErrorCode::TooFewPoints.code(), 2);
        assert_eq!(ErrorCode::TooManyPoints.code(), 3);
        assert_eq!(ErrorCode::CollinearData.code(), 4);
    }

    #[test]
    fn test_error_maps_to_code() {
        let err = FitError::TooFewPoints { count: 2, min: 4 };
        assert_eq!(err.code(), ErrorCode::TooFewPoints);
        assert_eq!(err.to_string(), "too few points: got 2, need at least 4");
    }
}
