//! Layered error types for the skylark crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`SkylarkError`] - Top-level error type for all query operations
//! - [`ClientError`] - HTTP transport, cancellation and server status errors
//! - [`ValidationError`] - Response decoding errors
//! - [`ConfigError`] - URL and client configuration errors

mod client_error;
mod config_error;
mod skylark_error;
mod validation_error;

pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use skylark_error::SkylarkError;
pub use validation_error::ValidationError;
