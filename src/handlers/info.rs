//! # Service Info Handler
//!
//! Identity of the service and a map of its endpoints.

use crate::handlers::SERVICE_NAME;
use axum::Json;
use serde_json::{json, Value};

/// GET /: service name, version and the endpoint map.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": format!("{SERVICE_NAME} API"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "Running",
        "documentation": {
            "health": "GET /health",
            "testAuth": "GET /test-auth",
            "createHeaders": "GET /create-headers",
            "submitForm": "POST /submit-form"
        }
    }))
}
