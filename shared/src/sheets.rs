//! Google Sheets client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use tracing::info;

use crate::auth::{fetch_access_token, ServiceAccountKey};
use crate::{Config, Error, Result};

/// Row append and column read against a remote spreadsheet.
pub trait SheetStore: Send + Sync {
    /// Append one row after the sheet's existing data.
    fn append_row(&self, sheet: &str, values: Vec<String>) -> impl Future<Output = Result<()>> + Send;

    /// Last cell of `column`, if there is one and it holds a string.
    fn last_filled_cell(
        &self,
        sheet: &str,
        column: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

#[derive(Debug, Serialize)]
struct ValueRangeBody<'a> {
    values: [&'a [String]; 1],
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: Option<String>,
}

/// First cell of the last returned row, when it is a string.
pub fn last_string_value(values: &[Vec<Value>]) -> Option<String> {
    match values.last()?.first()? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Sheets API v4 client authenticating as a service account.
pub struct SheetsClient {
    http_client: reqwest::Client,
    credentials: ServiceAccountKey,
    spreadsheet_id: String,
    token_uri: String,
    api_base: String,
}

impl SheetsClient {
    pub fn new(http_client: reqwest::Client, config: &Config, credentials: ServiceAccountKey) -> Self {
        Self {
            http_client,
            credentials,
            spreadsheet_id: config.spreadsheet_id.clone(),
            token_uri: config.token_uri.clone(),
            api_base: config.sheets_api_base.trim_end_matches('/').to_string(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(range)
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(Error::Sheets { status, message })
    }
}

impl SheetStore for SheetsClient {
    async fn append_row(&self, sheet: &str, values: Vec<String>) -> Result<()> {
        let token = fetch_access_token(&self.http_client, &self.credentials, &self.token_uri).await?;
        let url = format!("{}:append", self.values_url(&format!("{}!A1", sheet)));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&ValueRangeBody { values: [&values] })
            .send()
            .await?;

        let appended: AppendResponse = Self::check(response).await?.json().await?;
        let updated_range = appended
            .updates
            .and_then(|u| u.updated_range)
            .unwrap_or_default();
        info!(sheet = %sheet, updated_range = %updated_range, "Row appended");
        Ok(())
    }

    async fn last_filled_cell(&self, sheet: &str, column: &str) -> Result<Option<String>> {
        let token = fetch_access_token(&self.http_client, &self.credentials, &self.token_uri).await?;
        let url = self.values_url(&format!("{}!{}:{}", sheet, column, column));

        let response = self.http_client.get(&url).bearer_auth(&token).send().await?;

        let range: ValueRange = Self::check(response).await?.json().await?;
        Ok(last_string_value(&range.values))
    }
}
