use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::middleware::error::AppError;

/// Client for the hosted Postgres data API. Rows are selected and patched
/// through its REST surface with the service-role key, so row-level security
/// is bypassed for these privileged writes.
pub struct DataApiClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl DataApiClient {
    pub fn new(http: Client, base_url: &str, service_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .http
            .get(self.table_url(table))
            .query(filters)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::DataApi {
                source: format!(
                    "select from {} failed: {}",
                    table,
                    response.text().await.unwrap_or_default()
                ),
            });
        }
        Ok(response.json().await?)
    }

    /// Patches all rows matching `filters` and returns the updated rows, so
    /// the caller can tell whether anything matched. An empty result is not an
    /// error here; conditional-update callers depend on it.
    pub async fn update<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: Value,
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .http
            .patch(self.table_url(table))
            .query(filters)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::DataApi {
                source: format!(
                    "update of {} failed: {}",
                    table,
                    response.text().await.unwrap_or_default()
                ),
            });
        }
        Ok(response.json().await?)
    }
}

pub fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

pub const IS_NULL: &str = "is.null";
