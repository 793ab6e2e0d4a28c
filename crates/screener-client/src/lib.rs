pub mod error;
pub mod provider;

pub use error::{ScreenerError, ScreenerResult};
pub use provider::HttpWatchlistSource;

use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8008";
const DEFAULT_PATH: &str = "/autowatchlist";

/// Configuration for the screener service
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    pub base_url: String,
    pub path: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("WATCHLIST_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            path: std::env::var("WATCHLIST_API_PATH").unwrap_or_else(|_| DEFAULT_PATH.to_string()),
            timeout: parse_timeout(std::env::var("WATCHLIST_TIMEOUT_SECS").ok().as_deref())
                .unwrap_or(None),
        }
    }
}

impl ScreenerConfig {
    /// Like `default()`, but rejects an unparsable `WATCHLIST_TIMEOUT_SECS`.
    pub fn from_env() -> ScreenerResult<Self> {
        let timeout = parse_timeout(std::env::var("WATCHLIST_TIMEOUT_SECS").ok().as_deref())?;
        Ok(Self {
            timeout,
            ..Self::default()
        })
    }

    /// Full URL of the watchlist endpoint
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// Parse a timeout in whole seconds. Empty or missing means no timeout.
pub fn parse_timeout(raw: Option<&str>) -> ScreenerResult<Option<Duration>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| ScreenerError::Config(format!("timeout '{}': {}", value, e))),
    }
}

/// Client for the screener's auto-watchlist endpoint
#[derive(Clone)]
pub struct ScreenerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ScreenerClient {
    pub fn new(config: &ScreenerConfig) -> ScreenerResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn with_defaults() -> ScreenerResult<Self> {
        Self::new(&ScreenerConfig::default())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the raw auto-watchlist records.
    ///
    /// Any non-2xx status is an error, as is a body that is not a JSON array.
    pub async fn fetch_autowatchlist(&self) -> ScreenerResult<Vec<Value>> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScreenerError::ServiceUnavailable {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes)?;
        match payload {
            Value::Array(records) => {
                tracing::debug!("Screener returned {} records", records.len());
                Ok(records)
            }
            other => {
                tracing::warn!("Screener returned a non-array payload from {}", self.endpoint);
                Err(ScreenerError::InvalidResponse(format!(
                    "expected a JSON array, got {}",
                    json_kind(&other)
                )))
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
