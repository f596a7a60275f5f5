//! # Google Sheets allowance source
//!
//! Reads the allowance grid through the Sheets v4 `values.get` endpoint:
//! `GET {api_base}/v4/spreadsheets/{spreadsheet_id}/values/{range}`.
//! Credentials are supplied ready to use; minting tokens from a service
//! account key is left to the deployment.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::allowance_grid::parse_allowance_grid;
use super::error::SourceUnavailableError;
use super::traits::AllowanceSource;
use crate::domain::models::AllowanceRecord;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_RANGE: &str = "Allowance!A1:Z";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How requests to the Sheets API authenticate
#[derive(Clone, PartialEq, Eq)]
pub enum SheetsCredential {
    /// Sent as the `key` query parameter
    ApiKey(String),
    /// Sent as `Authorization: Bearer ...`
    BearerToken(String),
    /// Only works for publicly shared sheets
    Anonymous,
}

impl std::fmt::Debug for SheetsCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
            Self::BearerToken(_) => f.write_str("BearerToken(..)"),
            Self::Anonymous => f.write_str("Anonymous"),
        }
    }
}

impl SheetsCredential {
    /// Interpret the configured credential blob.
    ///
    /// A JSON object must carry either `access_token` or `api_key`; any other
    /// non-empty text is taken to be an API key.
    pub fn from_blob(blob: &str) -> Result<Self, String> {
        let blob = blob.trim();
        if blob.is_empty() {
            return Ok(Self::Anonymous);
        }
        if !blob.starts_with('{') {
            return Ok(Self::ApiKey(blob.to_string()));
        }

        let object: Value = serde_json::from_str(blob).map_err(|e| format!("credential blob is not valid JSON: {e}"))?;
        let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);

        if let Some(token) = field("access_token") {
            Ok(Self::BearerToken(token))
        } else if let Some(key) = field("api_key") {
            Ok(Self::ApiKey(key))
        } else {
            Err("credential JSON has neither 'access_token' nor 'api_key'".to_string())
        }
    }
}

/// Connection settings for one spreadsheet range
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub range: String,
    pub credential: SheetsCredential,
    pub api_base: String,
    pub timeout: Duration,
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>, credential: SheetsCredential) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: DEFAULT_RANGE.to_string(),
            credential,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Response body of `values.get`. Rows are absent entirely for an empty range.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl ValueRange {
    fn into_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub struct SheetsAllowanceSource {
    client: Client,
    config: SheetsConfig,
}

impl SheetsAllowanceSource {
    pub fn new(config: SheetsConfig) -> Result<Self, SourceUnavailableError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceUnavailableError::with_cause("cannot build Sheets HTTP client", e))?;
        Ok(Self { client, config })
    }

    /// Full `values.get` URL with the range percent-encoded as one segment
    pub fn values_url(&self) -> Result<Url, SourceUnavailableError> {
        let mut url = Url::parse(&self.config.api_base).map_err(|e| {
            SourceUnavailableError::with_cause(format!("invalid Sheets API base '{}'", self.config.api_base), e)
        })?;
        url.path_segments_mut()
            .map_err(|_| SourceUnavailableError::new(format!("Sheets API base '{}' cannot hold a path", self.config.api_base)))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                self.config.range.as_str(),
            ]);

        if let SheetsCredential::ApiKey(key) = &self.config.credential {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SourceUnavailableError> {
        let url = self.values_url()?;
        let mut request = self.client.get(url);
        if let SheetsCredential::BearerToken(token) = &self.config.credential {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceUnavailableError::with_cause("cannot reach the Sheets API", e))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SourceUnavailableError::new(format!(
                    "Sheets API rejected the configured credentials ({})",
                    response.status()
                )));
            }
            status => {
                return Err(SourceUnavailableError::new(format!(
                    "Sheets API answered {status} for spreadsheet {}",
                    self.config.spreadsheet_id
                )));
            }
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| SourceUnavailableError::with_cause("unexpected Sheets API response body", e))?;
        Ok(body.into_rows())
    }
}

#[async_trait]
impl AllowanceSource for SheetsAllowanceSource {
    async fn get_allowance_data(&self) -> Result<Vec<AllowanceRecord>, SourceUnavailableError> {
        info!(
            "Reading allowance range '{}' from spreadsheet {}",
            self.config.range, self.config.spreadsheet_id
        );

        let rows = self.fetch_rows().await.inspect_err(|e| warn!("{e}"))?;
        let records = parse_allowance_grid(&rows).map_err(|e| {
            warn!("Allowance sheet is misconfigured: {e}");
            SourceUnavailableError::with_cause("allowance sheet layout is invalid", e)
        })?;

        info!("Read {} allowance records from {} rows", records.len(), rows.len());
        Ok(records)
    }
}
