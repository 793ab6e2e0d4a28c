use async_trait::async_trait;
use auto_watchlist::{FetchResult, WatchlistSource};
use serde_json::Value;

use crate::ScreenerClient;

/// HTTP-backed [`WatchlistSource`] that delegates to [`ScreenerClient`].
pub struct HttpWatchlistSource {
    client: ScreenerClient,
}

impl HttpWatchlistSource {
    pub fn new(client: ScreenerClient) -> Self {
        Self { client }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

impl From<ScreenerClient> for HttpWatchlistSource {
    fn from(client: ScreenerClient) -> Self {
        Self::new(client)
    }
}

#[async_trait]
impl WatchlistSource for HttpWatchlistSource {
    async fn fetch_records(&self) -> FetchResult<Vec<Value>> {
        self.client.fetch_autowatchlist().await.map_err(Into::into)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
