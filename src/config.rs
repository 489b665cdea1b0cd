//! # Configuration Management
//!
//! Configuration is read from environment variables (with `.env` support)
//! into a single `Config` value that is handed to `AppState` at startup.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5004)
//! - `GOOGLE_CREDENTIALS_PATH`: Service-account key file (default: google_auth.json)
//! - `SPREADSHEET_ID`: Target spreadsheet
//! - `SHEET_NAME`: Tab that receives the rows (default: Sheet1)
//! - `SHEET_COLUMNS`: `default`, `legacy`, or a comma separated column list
//! - `SHEETS_API_BASE`: Sheets REST endpoint (default: https://sheets.googleapis.com/v4)

use crate::sheets::SheetSchema;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5004;
pub const DEFAULT_SPREADSHEET_ID: &str = "1EBO8CH-kSbMneKJc2ftopg5oP8ylnxT0ONaydckaGLk";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Application configuration
///
/// Every value the service needs at runtime. Built once in `main` and shared
/// read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number, also reported by `/health`
    pub port: u16,

    /// Path of the Google service-account JSON key
    pub credentials_path: PathBuf,

    /// Identifier of the spreadsheet that receives submissions
    pub spreadsheet_id: String,

    /// Name of the tab inside the spreadsheet
    pub sheet_name: String,

    /// Column layout shared by the header row and every appended row
    pub schema: SheetSchema,

    /// Base URL of the Sheets v4 REST API
    pub sheets_api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            credentials_path: PathBuf::from("google_auth.json"),
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            sheet_name: "Sheet1".to_string(),
            schema: SheetSchema::default(),
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` first if present (dotenvy doesn't error if the file is
    /// missing), then falls back to defaults for anything unset. Fails only
    /// when a value is present but unparseable.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number between 1 and 65535, got {raw:?}"))?,
            None => defaults.port,
        };

        let schema = match lookup("SHEET_COLUMNS") {
            Some(raw) => raw
                .parse::<SheetSchema>()
                .with_context(|| format!("invalid SHEET_COLUMNS value {raw:?}"))?,
            None => defaults.schema,
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            credentials_path: lookup("GOOGLE_CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_path),
            spreadsheet_id: lookup("SPREADSHEET_ID").unwrap_or(defaults.spreadsheet_id),
            sheet_name: lookup("SHEET_NAME").unwrap_or(defaults.sheet_name),
            schema,
            sheets_api_base: lookup("SHEETS_API_BASE").unwrap_or(defaults.sheets_api_base),
        })
    }

    /// Socket address for `tokio::net::TcpListener::bind()`, e.g. "0.0.0.0:5004"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::Column;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.port, 5004);
        assert_eq!(config.bind_address(), "0.0.0.0:5004");
        assert_eq!(config.credentials_path, PathBuf::from("google_auth.json"));
        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.schema, SheetSchema::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("GOOGLE_CREDENTIALS_PATH", "/etc/forms/key.json"),
            ("SPREADSHEET_ID", "abc123"),
            ("SHEET_NAME", "Leads"),
            ("SHEET_COLUMNS", "legacy"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.credentials_path, PathBuf::from("/etc/forms/key.json"));
        assert_eq!(config.spreadsheet_id, "abc123");
        assert_eq!(config.sheet_name, "Leads");
        assert_eq!(config.schema.columns()[3], Column::City);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn invalid_columns_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("SHEET_COLUMNS", "full_name,zip")])).is_err());
    }
}
