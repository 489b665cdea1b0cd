//! # Form Sheets Backend
//!
//! Accepts form submissions over HTTP and appends each one as a row of a
//! Google spreadsheet, authenticating with a service-account key.
//!
//! ## Modules
//! - `config`: Settings read from the environment
//! - `credentials`: Service-account key loading
//! - `sheets`: Spreadsheet client (header init, row append)
//! - `submission`: Inbound payload validation
//! - `handlers`: HTTP routes
//! - `state`: Shared application state
//! - `error`: Error type and HTTP error responses

pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod sheets;
pub mod state;
pub mod submission;

use crate::handlers::{
    auth::auth_status, forms::submit_form, health::health_check, info::service_info,
    sheets::create_headers,
};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router
///
/// | Route | Method |
/// |---|---|
/// | `/` | GET |
/// | `/health` | GET |
/// | `/test-auth` | GET |
/// | `/create-headers` | GET |
/// | `/submit-form` | POST |
///
/// No route requires authentication; CORS admits any origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/test-auth", get(auth_status))
        .route("/create-headers", get(create_headers))
        .route("/submit-form", post(submit_form))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// UTC timestamp with millisecond precision, e.g. `2025-08-01T10:30:00.123Z`
pub fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
