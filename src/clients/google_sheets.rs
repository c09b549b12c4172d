//! Google Sheets v4 values API using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{status_error, ClientError, SheetStore};
use crate::lifecycle::SheetsConfig;

const DEFAULT_STATUS_MESSAGE: &str = "Spreadsheet request failed";

#[derive(Clone)]
pub struct GoogleSheetsStore {
    access_token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for GoogleSheetsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsStore")
            .field("api_url", &self.api_url.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl GoogleSheetsStore {
    pub fn new(config: &SheetsConfig, access_token: impl Into<String>) -> Result<Self, ClientError> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| ClientError::new(format!("Invalid sheets API url: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::new(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            access_token: access_token.into(),
            api_url,
            client,
        })
    }

    /// `{api_url}/v4/spreadsheets/{sheet_id}/values/{range}`, percent-encoded.
    fn values_url(&self, sheet_id: &str, range: &str) -> Result<Url, ClientError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::new("Sheets API url cannot be a base"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", sheet_id, "values", range]);
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    #[instrument(skip(self))]
    async fn get_values(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ClientError> {
        let url = self.values_url(sheet_id, range)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| ClientError::new(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::new(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Sheet read rejected");
            return Err(status_error(status.as_u16(), &text, DEFAULT_STATUS_MESSAGE));
        }

        let parsed: ValueRange = serde_json::from_str(&text)
            .map_err(|e| ClientError::new(format!("Invalid JSON from sheets API: {e}")))?;

        let rows: Vec<Vec<String>> = parsed
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        debug!(rows = rows.len(), "Sheet read");
        Ok(rows)
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn update_values(
        &self,
        sheet_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), ClientError> {
        let mut url = self.values_url(sheet_id, range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRangeUpdate {
            range,
            major_dimension: "ROWS",
            values: rows,
        };

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::new(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Sheet write rejected");
            return Err(status_error(status.as_u16(), &text, DEFAULT_STATUS_MESSAGE));
        }

        debug!("Sheet written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(api_url: &str) -> GoogleSheetsStore {
        let config = SheetsConfig {
            api_url: api_url.to_string(),
            ..SheetsConfig::default()
        };
        GoogleSheetsStore::new(&config, "token").unwrap()
    }

    #[test]
    fn test_values_url_encodes_range() {
        let url = store("https://sheets.example.com")
            .values_url("doc-1", "Products Q1!A1:G50")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.example.com/v4/spreadsheets/doc-1/values/Products%20Q1!A1:G50"
        );
    }

    #[test]
    fn test_cell_text_renders_non_strings() {
        assert_eq!(cell_text(Value::String("a".into())), "a");
        assert_eq!(cell_text(serde_json::json!(19.5)), "19.5");
        assert_eq!(cell_text(Value::Null), "");
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", store("https://sheets.example.com"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("\"token\""));
    }
}
