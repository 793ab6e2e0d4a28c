use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchResult;

/// Source of raw screener records.
///
/// Implemented by the HTTP screener client; tests use in-memory stubs.
#[async_trait]
pub trait WatchlistSource: Send + Sync {
    /// Fetch the current list of raw records, one JSON value per instrument
    async fn fetch_records(&self) -> FetchResult<Vec<Value>>;

    fn source_name(&self) -> &'static str;
}
