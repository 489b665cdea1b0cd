//! # Service-Account Credentials
//!
//! Loads the Google service-account key once at startup. A missing or broken
//! key never stops the server: it is recorded as `CredentialStatus::Unavailable`
//! and the spreadsheet operations refuse to run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Google service-account key, as downloaded from the cloud console.
///
/// Only the fields this service uses are kept; everything else in the file
/// is ignored.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

// Keeps the private key out of logs.
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Parse and validate a key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        let key: ServiceAccountKey = serde_json::from_str(json)?;

        for (field, value) in [
            ("project_id", &key.project_id),
            ("client_email", &key.client_email),
            ("private_key", &key.private_key),
        ] {
            if value.trim().is_empty() {
                return Err(CredentialError::MissingField(field));
            }
        }

        Ok(key)
    }

    pub fn info(&self) -> CredentialInfo {
        CredentialInfo {
            project_id: self.project_id.clone(),
            client_email: self.client_email.clone(),
            has_private_key: !self.private_key.is_empty(),
        }
    }
}

/// Non-secret metadata reported by `GET /test-auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialInfo {
    pub project_id: String,
    pub client_email: String,
    pub has_private_key: bool,
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid credential JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("credential is missing `{0}`")]
    MissingField(&'static str),
}

/// Outcome of loading the key at startup.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    Loaded(ServiceAccountKey),
    Unavailable { path: PathBuf, reason: String },
}

impl CredentialStatus {
    pub fn key(&self) -> Option<&ServiceAccountKey> {
        match self {
            CredentialStatus::Loaded(key) => Some(key),
            CredentialStatus::Unavailable { .. } => None,
        }
    }
}

/// Read and parse the key file, surfacing the exact failure.
pub fn try_load(path: &Path) -> Result<ServiceAccountKey, CredentialError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CredentialError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    ServiceAccountKey::from_json(&contents)
}

/// Load the key file. Failures are logged and folded into the returned status.
pub fn load(path: &Path) -> CredentialStatus {
    match try_load(path) {
        Ok(key) => {
            tracing::info!(
                project_id = %key.project_id,
                client_email = %key.client_email,
                "Loaded Google service-account credential"
            );
            CredentialStatus::Loaded(key)
        }
        Err(e) => {
            tracing::error!("Error reading {}: {}", path.display(), e);
            CredentialStatus::Unavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}
