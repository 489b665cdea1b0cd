//! # Health Check Handler
//!
//! Liveness endpoint for load balancers and monitoring. It never touches the
//! spreadsheet, so it answers 200 even when Google credentials are missing.

use crate::handlers::SERVICE_NAME;
use crate::iso8601;
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// ```json
/// {
///   "status": "OK",
///   "message": "Tech Form Backend is running",
///   "timestamp": "2025-08-01T10:30:00.000Z",
///   "uptime": 12.5,
///   "port": 5004,
///   "endpoints": { "GET /health": "Health check", ... }
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": format!("{SERVICE_NAME} is running"),
        "timestamp": iso8601(Utc::now()),
        "uptime": state.uptime().as_secs_f64(),
        "port": state.config.port,
        "endpoints": {
            "GET /health": "Health check",
            "GET /test-auth": "Google credential status",
            "GET /create-headers": "Create sheet headers",
            "POST /submit-form": "Submit form data"
        }
    }))
}
