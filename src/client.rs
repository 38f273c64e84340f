//! # client
//!
//! Blocking HTTP client for the OpenFLIS query endpoint.
//!
//! A query is a GET of `{base_url}?table={TABLE}&key={NIIN}&apiKey={KEY}`.
//! The body is decoded as JSON when possible and kept as text otherwise.

use crate::error::QueryError;
use crate::services::Record;
use crate::table::Table;

use std::time::Duration;

use reqwest::Url;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://app.openflis.com/api/v1/query";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decodes body as JSON, falling back to the raw text.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Payload::Json(value),
            Err(_)    => Payload::Text(body),
        }
    }

    /// The flat objects under `records`. Empty when there are none.
    pub fn records(&self) -> Vec<Record> {
        match self {
            Payload::Json(Value::Object(obj)) => obj
                .get("records")
                .and_then(Value::as_array)
                .map(|arr| arr.iter().filter_map(|v| v.as_object().cloned()).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// The `name` the API reports for the table that answered.
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Payload::Json(Value::Object(obj)) => obj.get("name").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Anything that can answer a table query for a NIIN.
pub trait RecordSource {
    fn query(&self, table: Table, niin: &str) -> Result<Payload, QueryError>;
}

/// Settings for `FlisClient`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key:  Option<String>,
    pub timeout:  Duration,
}

pub struct FlisClient {
    config: ClientConfig,
    http:   reqwest::blocking::Client,
}

impl FlisClient {
    pub fn new(config: ClientConfig) -> Result<Self, QueryError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, http })
    }

    /// The API key, if one is configured and non-empty.
    fn api_key(&self) -> Result<&str, QueryError> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(QueryError::MissingApiKey),
        }
    }

    /// Builds the query URL with every parameter encoded.
    pub fn query_url(&self, table: Table, niin: &str, api_key: &str) -> Result<Url, QueryError> {
        let params = [("table", table.upstream()), ("key", niin), ("apiKey", api_key)];

        Url::parse_with_params(&self.config.base_url, &params).map_err(|e| QueryError::InvalidUrl {
            url: self.config.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

impl RecordSource for FlisClient {
    fn query(&self, table: Table, niin: &str) -> Result<Payload, QueryError> {
        let api_key = self.api_key()?;
        let url = self.query_url(table, niin, api_key)?;

        tracing::debug!(table = table.upstream(), niin, "querying OpenFLIS");

        let response = self.http.get(url).send().inspect_err(|e| {
            tracing::warn!(table = table.upstream(), niin, "request failed: {}", e);
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(table = table.upstream(), niin, %status, "non-success status");
            return Err(QueryError::Status(status));
        }

        let body = response.text()?;
        let payload = Payload::from_body(body);
        if let Payload::Text(_) = payload {
            tracing::debug!(table = table.upstream(), niin, "response is not JSON, keeping text");
        }

        Ok(payload)
    }
}
