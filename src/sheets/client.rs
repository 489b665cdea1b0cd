use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::model::{AppendValuesResponse, UpdateValuesResponse, ValueRange};
use super::token::TokenProvider;
use super::{SheetWriter, SheetsError};
use crate::credentials::ServiceAccountKey;

/// `SheetWriter` backed by the Sheets v4 REST API.
pub struct SheetsClient {
    http: Client,
    api_base: Url,
    tokens: TokenProvider,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SheetsClient {{ api_base: {} }}", self.api_base)
    }
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, api_base: &str) -> Result<Self, SheetsError> {
        let api_base =
            Url::parse(api_base).map_err(|e| SheetsError::Url(format!("{api_base}: {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(SheetsError::Url(api_base.to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let tokens = TokenProvider::new(http.clone(), key)?;

        Ok(SheetsClient {
            http,
            api_base,
            tokens,
        })
    }

    /// `{api_base}/spreadsheets/{id}/values/{range}`, each segment percent-encoded.
    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["spreadsheets", spreadsheet_id, "values", range]);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SheetsError> {
        let token = self.tokens.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SheetWriter for SheetsClient {
    #[instrument(skip(self, rows))]
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<UpdateValuesResponse, SheetsError> {
        let request = self
            .http
            .put(self.values_url(spreadsheet_id, range))
            .query(&[("valueInputOption", "RAW")])
            .json(&ValueRange::rows(rows));

        self.send(request).await
    }

    #[instrument(skip(self, rows))]
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<AppendValuesResponse, SheetsError> {
        let request = self
            .http
            .post(self.values_url(spreadsheet_id, &format!("{range}:append")))
            .query(&[("valueInputOption", "RAW")])
            .json(&ValueRange::rows(rows));

        self.send(request).await
    }
}
