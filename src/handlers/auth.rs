//! # Credential Status Handler
//!
//! Reports what was loaded from the service-account key at startup. The
//! file is not read again here; the answer always reflects the credential
//! the spreadsheet client is actually using.

use crate::credentials::CredentialStatus;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// ## Route
/// GET /test-auth
///
/// ## Response
/// 200 when the key loaded:
/// ```json
/// {
///   "status": "Google Auth file found",
///   "project_id": "my-project",
///   "client_email": "writer@my-project.iam.gserviceaccount.com",
///   "has_private_key": true,
///   "sheets_ready": true
/// }
/// ```
/// 500 with `{"status": "Google Auth file error", "error": "..."}` otherwise.
pub async fn auth_status(State(state): State<AppState>) -> AppResult<Json<Value>> {
    match state.credentials.as_ref() {
        CredentialStatus::Loaded(key) => {
            let info = key.info();
            Ok(Json(json!({
                "status": "Google Auth file found",
                "project_id": info.project_id,
                "client_email": info.client_email,
                "has_private_key": info.has_private_key,
                "sheets_ready": state.sheets.is_configured(),
            })))
        }
        CredentialStatus::Unavailable { reason, .. } => Err(AppError::Credentials(reason.clone())),
    }
}
