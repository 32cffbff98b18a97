//! Gateway error types.

use thiserror::Error;

/// Errors surfaced by content fetch operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not be sent or a response could not be received.
    #[error("network error")]
    Network(#[source] reqwest::Error),

    /// The per-request deadline elapsed. Callers treat this like
    /// [`GatewayError::Network`]; it is kept separate for logging.
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Every candidate endpoint returned empty, or a single-resource lookup
    /// answered with a non-success status.
    #[error("no content found for {content_type}")]
    NotFound { content_type: String },

    /// A response body could not be parsed as the expected shape.
    ///
    /// Collection endpoints downgrade this to zero results before it
    /// reaches a caller; single-resource lookups surface it.
    #[error("failed to decode response body")]
    Decode(#[from] serde_json::Error),

    /// The configured API base URL could not be parsed or cannot carry
    /// path segments.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl GatewayError {
    /// Classify a transport error, distinguishing deadline expiry from
    /// other failures.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Network(err)
        }
    }

    /// Whether this error means "no matching content" rather than a
    /// transport problem.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias using GatewayError.
pub type GatewayResult<T> = Result<T, GatewayError>;
