//! Reading points from JSON, as collected by the drawing front end.
//!
//! Two shapes are accepted:
//!
//! - a flat list of pairs: `[[x, y], [x, y], ...]`
//! - a list of strokes: `[[[x, y], ...], [[x, y], ...]]`

use serde_json::Value;

use crate::error::FitError;
use crate::point_set::{Point, PointSet};

/// Parse a JSON document into a [`PointSet`].
pub fn parse_points(json: &str) -> Result<PointSet, FitError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FitError::InvalidFormat(e.to_string()))?;
    points_from_value(&value)
}

/// Interpret an already-parsed JSON value as points or strokes.
pub fn points_from_value(value: &Value) -> Result<PointSet, FitError> {
    let items = value
        .as_array()
        .ok_or_else(|| FitError::InvalidFormat(format!("expected an array, got {}", kind(value))))?;

    let is_strokes = items
        .iter()
        .find_map(|item| item.as_array().and_then(|inner| inner.first()))
        .is_some_and(Value::is_array);

    let points = if is_strokes {
        let mut points = Vec::new();
        for (s, stroke) in items.iter().enumerate() {
            let stroke = stroke.as_array().ok_or_else(|| {
                FitError::InvalidFormat(format!("stroke {s}: expected an array, got {}", kind(stroke)))
            })?;
            for (i, item) in stroke.iter().enumerate() {
                points.push(pair(item).map_err(|msg| {
                    FitError::InvalidFormat(format!("stroke {s}, point {i}: {msg}"))
                })?);
            }
        }
        points
    } else {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                pair(item).map_err(|msg| FitError::InvalidFormat(format!("point {i}: {msg}")))
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    PointSet::new(points)
}

fn pair(value: &Value) -> Result<Point, String> {
    match value.as_array().map(Vec::as_slice) {
        Some([x, y]) => {
            let x = x.as_f64().ok_or_else(|| format!("x is {}", kind(x)))?;
            let y = y.as_f64().ok_or_else(|| format!("y is {}", kind(y)))?;
            Ok(Point::new(x, y))
        }
        Some(other) => Err(format!("expected 2 coordinates, got {}", other.len())),
        None => Err(format!("expected [x, y], got {}", kind(value))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
