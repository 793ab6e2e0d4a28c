use auto_watchlist::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Service unavailable: status {status}: {body}")]
    ServiceUnavailable { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type ScreenerResult<T> = Result<T, ScreenerError>;

impl From<ScreenerError> for FetchError {
    fn from(err: ScreenerError) -> Self {
        match err {
            ScreenerError::ServiceUnavailable { status, body } => {
                FetchError::Status { status, body }
            }
            ScreenerError::InvalidResponse(msg) => FetchError::InvalidResponse(msg),
            ScreenerError::Serialization(e) => FetchError::InvalidResponse(e.to_string()),
            other => FetchError::Transport(other.to_string()),
        }
    }
}
