//! Cancellation context governing a request's network call.
//!
//! A [`RequestContext`] pairs a [`CancellationToken`] with an optional
//! deadline. The executor races the HTTP send and the body read against
//! both, so a cancelled or expired context aborts the call promptly instead
//! of waiting for the server.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use skylark::{Request, RequestContext};
//!
//! let context = RequestContext::background().with_timeout(Duration::from_secs(5));
//! let token = context.token().clone();
//!
//! let request = Request::new("https://api.example.com/", "users", "")
//!     .with_context(context);
//!
//! // Elsewhere: abort the in-flight call.
//! token.cancel();
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Cancellation token plus optional deadline for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context cancelled whenever `token` is.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Sets an absolute deadline, keeping the earlier one if already set.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Sets a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drives `future` to completion unless the context is cancelled or its
    /// deadline passes first. The future is dropped on abort.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Cancelled`] or [`ClientError::DeadlineExceeded`].
    pub async fn run<F>(&self, future: F) -> Result<F::Output, ClientError>
    where
        F: Future,
    {
        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(ClientError::Cancelled),
            () = deadline => Err(ClientError::DeadlineExceeded),
            output = future => Ok(output),
        }
    }
}
