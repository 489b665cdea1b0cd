//! # Sheet Setup Handler
//!
//! Writes the header row of the configured sheet on demand.

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// GET /create-headers: write the header row. Safe to call repeatedly.
pub async fn create_headers(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state
        .sheets
        .init_headers(&state.config.spreadsheet_id)
        .await
        .map_err(|e| AppError::sheets("Failed to create headers", e))?;

    Ok(Json(json!({ "message": "Headers created" })))
}
