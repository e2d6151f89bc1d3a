//! Configured entry point for building requests.
//!
//! A [`SkylarkClient`] owns the endpoint and a configured `reqwest::Client`,
//! and hands both to every [`Request`](crate::Request) it creates. Use it to
//! share a transport (timeouts, default headers, connection pool) across
//! queries, or to inject a custom transport in tests.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use skylark::{Field, SkylarkClient};
//! use url::Url;
//!
//! let client = SkylarkClient::builder(Url::parse("https://api.example.com/v1/")?)
//!     .timeout(Duration::from_secs(10))
//!     .default_header("Accept-Language", "en")?
//!     .build()?;
//!
//! let user: serde_json::Value = client
//!     .request("users", "42")
//!     .add_field(Field::new("name"))
//!     .execute()
//!     .await?;
//! ```

mod skylark_client;

pub use skylark_client::{SkylarkClient, SkylarkClientBuilder};
