//! Input points and the closed-form initial circle estimate.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;
use crate::error::{ErrorCode, FitError};

/// A sampled 2D position from a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// A candidate circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Circle {
    pub fn new(radius: f64, center_x: f64, center_y: f64) -> Self {
        Self {
            radius,
            center_x,
            center_y,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Parameter vector layout: `[r, cx, cy]`.
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.radius, self.center_x, self.center_y)
    }

    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub fn is_finite(&self) -> bool {
        self.radius.is_finite() && self.center_x.is_finite() && self.center_y.is_finite()
    }
}

/// An immutable, non-empty sequence of finite points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Wrap a list of points. Fails on empty input or non-finite coordinates.
    pub fn new(points: Vec<Point>) -> Result<Self, FitError> {
        if points.is_empty() {
            return Err(FitError::TooFewPoints { count: 0, min: 1 });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(FitError::InvalidFormat(format!(
                "point {index} has a non-finite coordinate"
            )));
        }
        Ok(Self { points })
    }

    /// Interpret `[x0, y0, x1, y1, ...]` as points.
    pub fn from_flat(coords: &[f64]) -> Result<Self, FitError> {
        if coords.len() % 2 != 0 {
            return Err(FitError::InvalidFormat(format!(
                "expected coordinate pairs, got {} values",
                coords.len()
            )));
        }
        let points = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        Self::new(points)
    }

    /// Concatenate several strokes into one set, keeping drawing order.
    pub fn from_strokes<S>(strokes: &[S]) -> Result<Self, FitError>
    where
        S: AsRef<[Point]>,
    {
        let points = strokes
            .iter()
            .flat_map(|stroke| stroke.as_ref().iter().copied())
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Status code for this set under the given limits.
    pub fn error_code(&self, limits: &ValidationConfig) -> ErrorCode {
        match self.validate(limits) {
            Ok(()) => ErrorCode::Ok,
            Err(err) => err.code(),
        }
    }

    /// Check the point-count limits.
    pub fn validate(&self, limits: &ValidationConfig) -> Result<(), FitError> {
        let count = self.len();
        if count < limits.min_points {
            return Err(FitError::TooFewPoints {
                count,
                min: limits.min_points,
            });
        }
        if count >= limits.max_points {
            return Err(FitError::TooManyPoints {
                count,
                max: limits.max_points,
            });
        }
        Ok(())
    }

    /// Component-wise mean of all points.
    pub fn midpoint(&self) -> Point {
        let n = self.len() as f64;
        let (sum_x, sum_y) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sum_x / n, sum_y / n)
    }

    /// Root-mean-square distance from [`Self::midpoint`].
    pub fn radius_estimate(&self) -> f64 {
        let mid = self.midpoint();
        let mean_sq = self
            .points
            .iter()
            .map(|p| (p.x - mid.x).powi(2) + (p.y - mid.y).powi(2))
            .sum::<f64>()
            / self.len() as f64;
        mean_sq.sqrt()
    }

    /// Closed-form seed for the solver.
    pub fn initial_guess(&self) -> Circle {
        let mid = self.midpoint();
        Circle::new(self.radius_estimate(), mid.x, mid.y)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
