//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `health`: Liveness check (`GET /health`)
//! - `info`: Service identity (`GET /`)
//! - `auth`: Credential status probe (`GET /test-auth`)
//! - `sheets`: Header initialization (`GET /create-headers`)
//! - `forms`: Form submission (`POST /submit-form`)
//!
//! Handlers stay thin: they extract the request, call `SpreadsheetService`,
//! and return JSON. Failures are `AppError`s, which render themselves.

pub mod auth;
pub mod forms;
pub mod health;
pub mod info;
pub mod sheets;

/// Human-readable name reported by `/` and `/health`
pub const SERVICE_NAME: &str = "Tech Form Backend";
