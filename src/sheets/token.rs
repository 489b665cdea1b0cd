use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tokio::sync::Mutex;

use super::jwt::{Claims, JwtSigner};
use super::SheetsError;
use crate::credentials::ServiceAccountKey;

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Deserialize, Debug)]
struct AccessToken {
    access_token: String,
    #[serde(
        default,
        deserialize_with = "deserialize_expires_in",
        rename(deserialize = "expires_in")
    )]
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    fn has_expired(&self) -> bool {
        self.expires_at
            .map(|expiration_time| expiration_time - Duration::seconds(30) <= Utc::now())
            .unwrap_or(false)
    }
}

fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<i64> = Deserialize::deserialize(deserializer)?;
    Ok(s.map(|seconds_from_now| Utc::now() + Duration::seconds(seconds_from_now)))
}

/// Exchanges signed service-account assertions for OAuth access tokens and
/// caches the current token until shortly before it expires.
pub struct TokenProvider {
    client: Client,
    key: ServiceAccountKey,
    signer: JwtSigner,
    token: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(client: Client, key: ServiceAccountKey) -> Result<Self, SheetsError> {
        let signer = JwtSigner::new(&key.private_key)?;
        Ok(Self {
            client,
            key,
            signer,
            token: Default::default(),
        })
    }

    async fn refresh_token(&self) -> Result<AccessToken, SheetsError> {
        let claims = Claims::new(&self.key, &[SPREADSHEETS_SCOPE]);
        let signed = self.signer.sign_claims(&claims)?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", signed.as_str())])
            .send()
            .await
            .map_err(SheetsError::Token)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::TokenRejected {
                status: status.as_u16(),
                body,
            });
        }

        let token = response
            .json::<AccessToken>()
            .await
            .map_err(SheetsError::Token)?;
        tracing::debug!(expires_at = ?token.expires_at, "Obtained Google access token");
        Ok(token)
    }

    /// Current bearer token, fetching a new one when none is cached or the
    /// cached one is about to expire.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| !t.has_expired()) {
            return Ok(token.access_token.clone());
        }

        let token = self.refresh_token().await?;
        let value = token.access_token.clone();
        *cached = Some(token);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_computed_from_expires_in() {
        let token: AccessToken =
            serde_json::from_str(r#"{"access_token":"t","expires_in":3599,"token_type":"Bearer"}"#)
                .unwrap();
        assert!(!token.has_expired());

        let expires_at = token.expires_at.unwrap();
        assert!(expires_at > Utc::now() + Duration::seconds(3500));
    }

    #[test]
    fn tokens_inside_the_safety_margin_count_as_expired() {
        let token: AccessToken =
            serde_json::from_str(r#"{"access_token":"t","expires_in":10}"#).unwrap();
        assert!(token.has_expired());
    }

    #[test]
    fn tokens_without_expiry_never_expire() {
        let token: AccessToken = serde_json::from_str(r#"{"access_token":"t"}"#).unwrap();
        assert!(token.expires_at.is_none());
        assert!(!token.has_expired());
    }
}
