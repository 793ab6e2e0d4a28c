use thiserror::Error;

/// Failure to obtain the screener payload.
///
/// Malformed individual records are never errors; they are absorbed by the
/// normalizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Screener returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
