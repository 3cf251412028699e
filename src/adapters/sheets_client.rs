use crate::domain::model::SheetRows;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// `spreadsheets.values.get` response body. `values` is absent for an empty range.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<CellValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<CellValue> for String {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Text(s) => s,
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Minimal Google Sheets v4 client: reads the values of one range.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(base_url: &str, spreadsheet_id: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| EtlError::InvalidConfigValueError {
            field: "api_base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: spreadsheet_id.to_string(),
        })
    }

    /// `{base}/spreadsheets/{id}/values/{range}`, each part encoded as a path segment.
    pub fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| EtlError::ConfigError {
                message: format!("API base URL cannot be a base: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    pub async fn fetch_range(&self, token: &str, range: &str) -> Result<SheetRows> {
        let url = self.values_url(range)?;
        tracing::debug!("Fetching range '{}' from {}", range, url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        tracing::debug!("Range '{}' response status: {}", range, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) if body.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                Err(_) => body,
            };

            return Err(EtlError::SheetsApiError {
                range: range.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let value_range: ValueRange = response.json().await?;
        let rows: SheetRows = value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect();

        tracing::debug!("Range '{}' returned {} rows", range, rows.len());
        Ok(rows)
    }
}
