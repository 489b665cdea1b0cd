//! # Form Submission Handler
//!
//! Validates a submission, stamps it, and appends it as one sheet row.

use crate::error::{AppError, AppResult};
use crate::iso8601;
use crate::state::AppState;
use crate::submission::FormSubmission;
use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::convert::Infallible;

/// Submission body, accepted as JSON or as `application/x-www-form-urlencoded`.
///
/// A body that can't be parsed is treated as an empty submission, so the
/// client gets the usual "required fields are missing" 400.
pub struct SubmissionBody(pub FormSubmission);

#[async_trait]
impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let parsed = if is_form {
            Form::<FormSubmission>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<FormSubmission>::from_request(req, state)
                .await
                .map(|Json(form)| form)
                .map_err(|rejection| rejection.body_text())
        };

        Ok(SubmissionBody(parsed.unwrap_or_else(|reason| {
            tracing::debug!(%reason, "Unparseable submission body");
            FormSubmission::default()
        })))
    }
}

/// Submit form data
///
/// ## Route
/// POST /submit-form
///
/// ## Flow
/// 1. Check `fullName`, `phone`, `loanAmount` are present (400 otherwise)
/// 2. Trim every field, default optional ones to ""
/// 3. Stamp the current UTC time
/// 4. Append one row in the sheet's column order (500 if the write fails)
pub async fn submit_form(
    State(state): State<AppState>,
    SubmissionBody(form): SubmissionBody,
) -> AppResult<Json<Value>> {
    let submission = form.validate()?;

    let submitted_at = iso8601(Utc::now());
    let row = state.sheets.schema().row_for(&submission, &submitted_at);

    state
        .sheets
        .append_row(&state.config.spreadsheet_id, row)
        .await
        .map_err(|e| AppError::sheets("Failed to write data to sheet", e))?;

    Ok(Json(json!({ "message": "Data written to sheet" })))
}
