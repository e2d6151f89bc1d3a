//! Top-level query error type.

use super::{ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Top-level error type for all query operations.
///
/// Every variant is transparent, so the message a caller sees is the message
/// of the underlying failure. In particular a non-2xx response displays as the
/// raw response body.
///
/// ## Examples
///
/// ```rust,ignore
/// use skylark::SkylarkError;
///
/// fn handle_error(err: SkylarkError) {
///     match err {
///         SkylarkError::Client(e) => eprintln!("Request failed: {e}"),
///         SkylarkError::Validation(e) => eprintln!("Invalid response: {e}"),
///         SkylarkError::Config(e) => eprintln!("Bad request setup: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum SkylarkError {
    /// Transport, cancellation and server status errors.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response body could not be decoded.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be rendered or the client could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SkylarkError {
    /// Returns the HTTP status code when the server answered with a failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if the request was aborted through its context.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::Client(ClientError::Cancelled | ClientError::DeadlineExceeded)
        )
    }
}

impl From<url::ParseError> for SkylarkError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(ConfigError::InvalidUrl(err))
    }
}
