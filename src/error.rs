//! # Error Handling
//!
//! Application error type and its conversion into JSON HTTP responses.
//! No error is fatal to the process; every failure becomes a response.

use crate::sheets::SheetsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Required fields are missing (Full Name, Phone Number, Loan Amount)";

/// Application-wide error type
///
/// ## Response mapping
/// - `Validation` → 400 `{"message": ..., "missing": [...]}`
/// - `Sheets` with `NotConfigured` → 500 `{"error": "Google Sheets authentication not configured properly"}`
/// - `Sheets` otherwise → 500 `{"error": <action>}`, details only in the log
/// - `Credentials` → 500 `{"status": "Google Auth file error", "error": <reason>}`
#[derive(Error, Debug)]
pub enum AppError {
    /// Required submission fields are missing or blank
    #[error("Required fields are missing: {}", missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// A spreadsheet operation failed; `action` is the client-facing summary
    #[error("{action}: {source}")]
    Sheets {
        action: &'static str,
        #[source]
        source: SheetsError,
    },

    /// The service-account credential could not be loaded at startup
    #[error("Google Auth file error: {0}")]
    Credentials(String),
}

impl AppError {
    pub fn sheets(action: &'static str, source: SheetsError) -> Self {
        AppError::Sheets { action, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { missing } => {
                tracing::debug!(?missing, "Rejected submission");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": MISSING_FIELDS_MESSAGE, "missing": missing }),
                )
            }
            AppError::Sheets {
                source: SheetsError::NotConfigured,
                ..
            } => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": SheetsError::NotConfigured.to_string() }),
                )
            }
            AppError::Sheets { action, source } => {
                // Log detailed error for debugging (not shown to user)
                tracing::error!("{}: {:?}", action, source);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": action }))
            }
            AppError::Credentials(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "status": "Google Auth file error", "error": reason }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
