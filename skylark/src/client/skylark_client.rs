use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::ConfigError;
use crate::request::Request;

/// Builder for configuring a [`SkylarkClient`].
#[derive(Debug)]
pub struct SkylarkClientBuilder {
    endpoint: Url,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
}

impl SkylarkClientBuilder {
    fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: None,
            default_headers: HeaderMap::new(),
            user_agent: None,
            http: None,
        }
    }

    /// Sets a transport-level timeout for every request.
    ///
    /// There is none by default; per-request deadlines belong on the
    /// [`RequestContext`](crate::RequestContext).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Uses a pre-built transport as-is.
    ///
    /// Timeout, default headers and user agent set on this builder are
    /// ignored when a transport is injected.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Builds the [`SkylarkClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SkylarkClient, ConfigError> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder().default_headers(self.default_headers);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder.build().map_err(ConfigError::Transport)?
            }
        };

        Ok(SkylarkClient {
            http,
            endpoint: self.endpoint,
        })
    }
}

/// Creates [`Request`]s that share one endpoint and transport.
#[derive(Debug, Clone)]
pub struct SkylarkClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl SkylarkClient {
    /// Creates a new builder for `endpoint`.
    ///
    /// Collections are appended to the endpoint verbatim, so it should end
    /// with `/`.
    pub fn builder(endpoint: Url) -> SkylarkClientBuilder {
        SkylarkClientBuilder::new(endpoint)
    }

    /// Creates a client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, ConfigError> {
        Self::builder(endpoint).build()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Starts a request for `collection`, or one resource of it when `id`
    /// is non-empty.
    pub fn request(&self, collection: impl Into<String>, id: impl Into<String>) -> Request {
        Request::new(self.endpoint.as_str(), collection, id).with_http_client(self.http.clone())
    }
}
