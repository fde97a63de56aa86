//! Supabase REST (PostgREST) client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::Backend;
use crate::config::Credentials;
use crate::error::{BackendError, BackendResult};
use crate::models::Table;

/// PostgREST error body.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            base_url: credentials.url.trim_end_matches('/').to_string(),
            api_key: credentials.key.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// `{url}/rest/v1/{table}`
    pub fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }

    fn request(&self, method: reqwest::Method, table: Table) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn read_rows(table: Table, response: reqwest::Response) -> BackendResult<Vec<Value>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(BackendError::Api {
                table: table.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(other) => Err(BackendError::InvalidResponse {
                table: table.to_string(),
                message: format!("expected a JSON array, got {}", other),
            }),
            Err(e) => Err(BackendError::InvalidResponse {
                table: table.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Human-readable message from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError {
            message,
            details: Some(details),
        }) => format!("{} ({})", message, details),
        Ok(PostgrestError { message, .. }) => message,
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl Backend for SupabaseClient {
    async fn insert(&self, table: Table, rows: Vec<Value>) -> BackendResult<Vec<Value>> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Self::read_rows(table, response).await
    }

    async fn select(&self, table: Table, columns: &[&str]) -> BackendResult<Vec<Value>> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&[("select", columns.join(","))])
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Self::read_rows(table, response).await
    }
}
