//! JSON response bodies for the rover API.
//!
//! Every body carries a top-level `success` flag:
//! ```json
//! { "success": true,  "message": "Posición guardada correctamente" }
//! { "success": true,  "position": { "x": 10, "y": 20, "direction": "N" } }
//! { "success": false, "position": null }
//! { "success": false, "errors": { "x": ["The x field is required."] } }
//! ```

use rover_types::position::{Direction, RoverPosition};
use rover_types::validation::ValidationErrors;
use serde::Serialize;

/// Confirmation returned after a successful save.
pub const POSITION_SAVED: &str = "Posición guardada correctamente";

/// Body of a successful save.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

impl SaveResponse {
    pub fn saved() -> Self {
        Self {
            success: true,
            message: POSITION_SAVED.to_string(),
        }
    }
}

/// The public `(x, y, direction)` view of a stored position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionView {
    pub x: i64,
    pub y: i64,
    pub direction: Direction,
}

impl From<&RoverPosition> for PositionView {
    fn from(position: &RoverPosition) -> Self {
        Self {
            x: position.x.get(),
            y: position.y.get(),
            direction: position.direction,
        }
    }
}

/// Body of a get request. `success` is false and `position` null when the
/// session has never saved a position.
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub success: bool,
    pub position: Option<PositionView>,
}

impl PositionResponse {
    pub fn from_lookup(position: Option<&RoverPosition>) -> Self {
        Self {
            success: position.is_some(),
            position: position.map(PositionView::from),
        }
    }
}

/// Body of a rejected request: per-field reasons.
#[derive(Debug, Serialize)]
pub struct ValidationFailure<'a> {
    pub success: bool,
    pub errors: &'a ValidationErrors,
}

/// Body of a request that failed for any other reason.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_saved_body() {
        let body = serde_json::to_value(SaveResponse::saved()).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "message": "Posición guardada correctamente"})
        );
    }

    #[test]
    fn test_missing_position_body() {
        let body = serde_json::to_value(PositionResponse::from_lookup(None)).unwrap();
        assert_eq!(body, json!({"success": false, "position": null}));
    }
}
