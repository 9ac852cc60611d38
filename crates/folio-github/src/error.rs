//! Error types for repository fetches.

use folio_core::error::FolioError;

/// Errors from listing repositories on the remote host.
///
/// `Clone` so that mock sources can replay the same failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("response body is not a JSON array")]
    NotAnArray,
    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether the host refused the request because of its anonymous rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::Status(403) | FetchError::Status(429))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(err.to_string()),
        }
    }
}

impl From<FetchError> for FolioError {
    fn from(err: FetchError) -> Self {
        FolioError::Fetch(err.to_string())
    }
}
