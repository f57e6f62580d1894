//! Error types for API and cache operations.

use thiserror::Error;

/// Unified error type for everything that can go wrong talking to the
/// meme API or handling its responses.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The session token was rejected (HTTP 401/403). Never retried;
    /// handled globally by clearing the session.
    #[error("unauthorized: session token rejected")]
    Unauthorized,
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse a JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Unexpected HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// File I/O error (session store, picture file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Maps an error status to the matching variant. 401 and 403 both mean
    /// the credential is no longer any good.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            FeedError::Unauthorized
        } else {
            FeedError::HttpStatus(status)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FeedError::Unauthorized)
    }

    /// Transient errors are eligible for automatic retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FeedError::Network(_) | FeedError::HttpStatus(_)
        )
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, FeedError>;
