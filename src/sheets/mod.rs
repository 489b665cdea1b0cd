//! # Google Sheets Integration
//!
//! ## Submodules
//! - `schema`: Column layout shared by the header row and data rows
//! - `service`: `SpreadsheetService`, the two operations the HTTP layer calls
//! - `client`: `SheetsClient`, the REST implementation of `SheetWriter`
//! - `token` / `jwt`: OAuth2 service-account token exchange
//! - `model`: API request/response bodies
//!
//! ## Call chain
//! handler → `SpreadsheetService` → `dyn SheetWriter` → Sheets API

use async_trait::async_trait;
use thiserror::Error;

mod client;
mod jwt;
pub mod model;
mod schema;
mod service;
mod token;

pub use client::SheetsClient;
pub use model::{AppendValuesResponse, UpdateValuesResponse, ValueRange};
pub use schema::{column_letter, Column, SchemaError, SheetSchema};
pub use service::SpreadsheetService;
pub use token::{TokenProvider, SPREADSHEETS_SCOPE};

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Google Sheets authentication not configured properly")]
    NotConfigured,

    #[error("failed to sign service-account assertion: {0}")]
    Signing(String),

    #[error("token request failed: {0}")]
    Token(#[source] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    TokenRejected { status: u16, body: String },

    #[error("Sheets API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid Sheets API base url: {0}")]
    Url(String),

    #[error("row has {actual} values but the sheet has {expected} columns")]
    RowWidth { expected: usize, actual: usize },
}

/// Transport for the two `spreadsheets.values` calls the service needs.
#[async_trait]
pub trait SheetWriter: Send + Sync {
    /// Overwrite `range` with `rows` (`values.update`).
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<UpdateValuesResponse, SheetsError>;

    /// Append `rows` after the last row of the table in `range` (`values.append`).
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<AppendValuesResponse, SheetsError>;
}
