//! Rover position HTTP handlers.
//!
//! Endpoints:
//! - POST /api/rover/save-position - Validate and upsert the session's position
//! - GET  /api/rover/get-position  - Return the session's saved position

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use rover_types::validation::validate_position;

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::http::response::{PositionResponse, SaveResponse};
use crate::state::AppState;

/// POST /api/rover/save-position - Save the rover position for this session.
///
/// The body is parsed leniently: anything that is not a JSON object is
/// validated as an empty input, so the caller gets per-field errors rather
/// than a parse failure.
pub async fn save_position(
    State(state): State<AppState>,
    Session(session_id): Session,
    body: Bytes,
) -> Result<Json<SaveResponse>, AppError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let input = validate_position(&payload)?;

    state.position_service.save(&session_id, &input).await?;

    Ok(Json(SaveResponse::saved()))
}

/// GET /api/rover/get-position - Get the rover position for this session.
pub async fn get_position(
    State(state): State<AppState>,
    Session(session_id): Session,
) -> Result<Json<PositionResponse>, AppError> {
    let position = state.position_service.get(&session_id).await?;

    Ok(Json(PositionResponse::from_lookup(position.as_ref())))
}
