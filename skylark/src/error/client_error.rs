//! HTTP transport, cancellation and server status errors.

use thiserror::Error;

/// Errors from executing a request over the wire.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed (DNS, connection, protocol, transport timeout).
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Server returned a status outside `200..300`.
    ///
    /// Displays as the raw response body and nothing else.
    #[error("{message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The response body, verbatim.
        message: String,
    },

    /// The response body could not be read.
    #[error("Unable to read response body from server: {source}")]
    BodyRead {
        /// Status of the response whose body failed to read.
        status: u16,
        /// The underlying read failure.
        #[source]
        source: reqwest::Error,
    },

    /// The request context was cancelled before the call completed.
    #[error("context canceled")]
    Cancelled,

    /// The request context's deadline passed before the call completed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl ClientError {
    /// Returns `true` if retrying the same request could succeed.
    ///
    /// Cancellation is never retryable; 5xx and 429 responses are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Cancelled | Self::DeadlineExceeded => false,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::BodyRead { .. } => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
        }
    }

    /// Returns the HTTP status code if the server responded.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } | Self::BodyRead { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
