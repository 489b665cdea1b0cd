//! # Application State
//!
//! Everything handlers share, built once at startup from a `Config` and
//! cloned into each request by Axum. Cloning is cheap: the config and the
//! credential status sit behind `Arc`, and `SpreadsheetService` holds an
//! `Arc` to its writer.

use crate::config::Config;
use crate::credentials::{self, CredentialStatus};
use crate::sheets::{SheetWriter, SheetsClient, SpreadsheetService};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct AppState {
    /// Read-only runtime configuration
    pub config: Arc<Config>,

    /// Result of loading the service-account key at startup
    pub credentials: Arc<CredentialStatus>,

    /// Header/row operations against the configured sheet
    pub sheets: SpreadsheetService,

    started_at: Instant,
}

impl AppState {
    /// Initialize application state
    ///
    /// Loads the service-account key and, when it is usable, builds the
    /// Sheets REST client. A missing key or an unusable private key leaves
    /// the spreadsheet service unconfigured instead of failing startup.
    pub fn new(config: Config) -> Self {
        let credentials = credentials::load(&config.credentials_path);

        let writer: Option<Arc<dyn SheetWriter>> = match credentials.key() {
            Some(key) => match SheetsClient::new(key.clone(), &config.sheets_api_base) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn SheetWriter>),
                Err(e) => {
                    tracing::error!("Google Sheets client unavailable: {}", e);
                    None
                }
            },
            None => {
                tracing::warn!("Google Sheets authentication not configured; writes are disabled");
                None
            }
        };

        Self::with_writer(config, credentials, writer)
    }

    /// Assemble state from already-built parts.
    pub fn with_writer(
        config: Config,
        credentials: CredentialStatus,
        writer: Option<Arc<dyn SheetWriter>>,
    ) -> Self {
        let sheets = SpreadsheetService::new(writer, config.schema.clone(), config.sheet_name.clone());

        AppState {
            config: Arc::new(config),
            credentials: Arc::new(credentials),
            sheets,
            started_at: Instant::now(),
        }
    }

    /// Time since the state was built
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
