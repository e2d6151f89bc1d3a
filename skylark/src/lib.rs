//! Read query builder and executor for collection-oriented REST APIs.
//!
//! The `skylark` crate composes a GET against a named collection (optionally
//! a single resource of it), selects and expands fields, applies filters and
//! ordering, and decodes the JSON response into a caller-chosen type.
//!
//! ## Features
//!
//! - **Fluent builder**: chain `add_field`, `expand`, `with_filter` and
//!   `order_by` on an owned [`Request`]
//! - **Filter operators**: `age__gt=30` style lookups through [`FilterOp`]
//! - **Cancellation**: every call is raced against a [`RequestContext`]
//! - **Injected transport**: share or replace the `reqwest::Client` through
//!   [`SkylarkClient`]
//! - **Layered error handling**: non-2xx bodies surface verbatim as the error
//!   message
//!
//! ## Example
//!
//! ```rust,ignore
//! use skylark::{Field, Filter, Request};
//!
//! #[derive(serde::Deserialize)]
//! struct User { id: u64, name: String }
//!
//! let users: Vec<User> = Request::new("https://api.example.com/v1/", "users", "")
//!     .add_field(Field::new("id"))
//!     .add_field(Field::new("name"))
//!     .expand(Field::new("team"))
//!     .with_filter("age", Filter::gt(30))
//!     .order_by(Field::new("name"))
//!     .execute()
//!     .await?;
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod field;
pub mod filter;
pub mod params;
pub mod request;

// Re-exports for convenience
pub use client::{SkylarkClient, SkylarkClientBuilder};
pub use context::RequestContext;
pub use error::{ClientError, ConfigError, SkylarkError, ValidationError};
pub use field::Field;
pub use filter::{Filter, FilterOp};
pub use params::QueryParams;
pub use request::Request;
