//! Input validation for saving a rover position.
//!
//! Validates an untyped JSON body field by field so that every failing field
//! is reported together, keyed by field name:
//!
//! ```json
//! { "x": ["The x field must not be greater than 200."],
//!   "direction": ["The selected direction is invalid."] }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::position::{Coordinate, Direction, PositionInput};

/// Per-field validation failures, each field mapped to its reasons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed for: {}", field_list(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason against a field.
    pub fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of the fields that failed, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Reasons recorded for a field (empty if the field passed).
    pub fn reasons(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn field_list(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn required(field: &str) -> String {
    format!("The {field} field is required.")
}

fn not_integer(field: &str) -> String {
    format!("The {field} field must be an integer.")
}

fn below_min(field: &str) -> String {
    format!("The {field} field must be at least {}.", Coordinate::MIN)
}

fn above_max(field: &str) -> String {
    format!("The {field} field must not be greater than {}.", Coordinate::MAX)
}

fn invalid_choice(field: &str) -> String {
    format!("The selected {field} is invalid.")
}

/// `null`, absent and blank strings all count as a missing value.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Integral floats at or beyond this magnitude print in exponent form on the
/// PHP side and fail its integer filter, so they are rejected here too.
const FLOAT_INTEGER_LIMIT: f64 = 1e15;

/// Interpret a JSON value as an integer.
///
/// Accepts JSON integers that fit an `i64`, floats with no fractional part
/// below [`FLOAT_INTEGER_LIMIT`], and strings accepted by [`parse_int_string`].
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if n.is_u64() {
                None
            } else {
                let f = n.as_f64()?;
                (f.is_finite() && f.fract() == 0.0 && f.abs() < FLOAT_INTEGER_LIMIT)
                    .then_some(f as i64)
            }
        }
        Value::String(s) => parse_int_string(s),
        _ => None,
    }
}

/// Parse a string the way PHP's `FILTER_VALIDATE_INT` does: surrounding
/// whitespace trimmed, optional sign, no leading zeros, within `i64`.
fn parse_int_string(s: &str) -> Option<i64> {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

fn validate_coordinate(
    body: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<Coordinate> {
    let value = body.get(field);
    if is_missing(value) {
        errors.add(field, required(field));
        return None;
    }

    let Some(n) = value.and_then(as_integer) else {
        errors.add(field, not_integer(field));
        return None;
    };

    if n < Coordinate::MIN {
        errors.add(field, below_min(field));
        return None;
    }
    if n > Coordinate::MAX {
        errors.add(field, above_max(field));
        return None;
    }

    Coordinate::new(n).ok()
}

fn validate_direction(
    body: &serde_json::Map<String, Value>,
    errors: &mut ValidationErrors,
) -> Option<Direction> {
    const FIELD: &str = "direction";

    let value = body.get(FIELD);
    if is_missing(value) {
        errors.add(FIELD, required(FIELD));
        return None;
    }

    match value
        .and_then(Value::as_str)
        .map(|s| s.trim().parse::<Direction>())
    {
        Some(Ok(direction)) => Some(direction),
        _ => {
            errors.add(FIELD, invalid_choice(FIELD));
            None
        }
    }
}

/// Validate a save-position request body.
///
/// A body that is not a JSON object is treated as empty, so every field is
/// reported as required.
pub fn validate_position(body: &Value) -> Result<PositionInput, ValidationErrors> {
    let empty = serde_json::Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    let mut errors = ValidationErrors::new();
    let x = validate_coordinate(fields, "x", &mut errors);
    let y = validate_coordinate(fields, "y", &mut errors);
    let direction = validate_direction(fields, &mut errors);

    match (x, y, direction) {
        (Some(x), Some(y), Some(direction)) if errors.is_empty() => {
            Ok(PositionInput { x, y, direction })
        }
        _ => Err(errors),
    }
}
