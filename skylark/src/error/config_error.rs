//! Request rendering and client configuration errors.

use thiserror::Error;

/// Errors in request or client configuration.
///
/// These are recoverable by fixing the inputs: a malformed endpoint,
/// collection or id, or an invalid default header.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rendered request URL did not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A default header name or value was rejected.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the rejected header.
        message: String,
    },

    /// The HTTP transport could not be constructed.
    #[error("Unable to build HTTP client: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ConfigError {
    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}
