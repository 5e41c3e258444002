//! API client errors.

use pokearena_core::ServiceError;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot take endpoint paths.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode {
        /// Path that was requested.
        endpoint: String,
        /// Parser message.
        reason: String,
    },

    /// An update was rejected before sending.
    #[error("invalid update: {0}")]
    Invalid(&'static str),
}

impl ApiError {
    /// Returns true if the server reported that the record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 404, body } => ServiceError::NotFound(body),
            ApiError::Decode { .. } | ApiError::Invalid(_) => ServiceError::Malformed(err.to_string()),
            ApiError::Http(ref source) if source.is_decode() => {
                ServiceError::Malformed(err.to_string())
            }
            other => ServiceError::Unavailable(other.to_string()),
        }
    }
}
