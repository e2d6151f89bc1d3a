//! Read query builder.
//!
//! A [`Request`] describes one GET against a collection, or against a single
//! resource of it when an id is set. Configuration methods consume and
//! return the request so calls can be chained; [`Request::execute`] then
//! performs the call (see the `execute` submodule).
//!
//! ## Examples
//!
//! ```rust,ignore
//! use skylark::{Field, Filter, Request};
//!
//! #[derive(serde::Deserialize)]
//! struct User { id: u64, name: String }
//!
//! let users: Vec<User> = Request::new("https://api.example.com/", "users", "")
//!     .add_field(Field::new("id"))
//!     .add_field(Field::new("name"))
//!     .with_filter("age", Filter::gt(30))
//!     .order_by(Field::new("name"))
//!     .execute()
//!     .await?;
//! ```

mod execute;

use std::collections::BTreeMap;

use url::Url;

use crate::context::RequestContext;
use crate::error::ConfigError;
use crate::field::Field;
use crate::filter::Filter;
use crate::params::QueryParams;

/// Parameter holding the ordering field.
pub const ORDER_PARAM: &str = "order";

/// A read query against one collection of the remote API.
#[derive(Debug, Clone)]
pub struct Request {
    endpoint: String,
    collection: String,
    id: String,
    fields: BTreeMap<String, Field>,
    parameters: QueryParams,
    context: RequestContext,
    /// Transport; `None` builds a default client at execution time.
    http: Option<reqwest::Client>,
}

impl Request {
    /// Creates a request for `collection` under `endpoint`.
    ///
    /// An empty `id` queries the whole collection. Nothing is validated until
    /// the URL is rendered.
    pub fn new(
        endpoint: impl Into<String>,
        collection: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            collection: collection.into(),
            id: id.into(),
            fields: BTreeMap::new(),
            parameters: QueryParams::new(),
            context: RequestContext::background(),
            http: None,
        }
    }

    /// Adds a field to the selection. Once any field is added the server
    /// only returns the selected fields.
    ///
    /// A field with the same name replaces the earlier one.
    pub fn add_field(mut self, field: impl Into<Field>) -> Self {
        let field = field.into();
        self.fields.insert(field.name().to_string(), field);
        self
    }

    /// Expands a related field without listing it as a field to return.
    ///
    /// Useful to embed a relation while still receiving every field.
    pub fn expand(self, field: impl Into<Field>) -> Self {
        let mut field = field.into();
        field.set_expanded(true);
        field.set_included(false);
        self.add_field(field)
    }

    /// Sorts the response by `field`. Only one ordering is kept.
    pub fn order_by(mut self, field: impl Into<Field>) -> Self {
        let field = field.into();
        self.parameters.set(ORDER_PARAM, field.name());
        self
    }

    /// Sorts the response by `field`, descending.
    pub fn order_by_desc(mut self, field: impl Into<Field>) -> Self {
        let field = field.into();
        self.parameters.set(ORDER_PARAM, format!("-{}", field.name()));
        self
    }

    /// Filters by `field_name`, which need not be a selected field.
    pub fn with_filter(mut self, field_name: &str, filter: Filter) -> Self {
        let key = filter.key_for(field_name);
        self.parameters.set(key, filter.value());
        self
    }

    /// Sets the context the request will be executed with.
    ///
    /// ## Panics
    ///
    /// Panics when given `None`. A missing context is a caller bug and would
    /// otherwise silently drop cancellation.
    #[track_caller]
    pub fn with_context(mut self, context: impl Into<Option<RequestContext>>) -> Self {
        match context.into() {
            Some(context) => self.context = context,
            None => panic!("nil context"),
        }
        self
    }

    /// Replaces the HTTP transport used by [`Request::execute`].
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Resource id, empty for a collection query.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Filter and ordering parameters, without field contributions.
    pub fn parameters(&self) -> &QueryParams {
        &self.parameters
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Calculates the query parameters sent on the wire.
    ///
    /// Field contributions come first; filter and ordering parameters are
    /// applied on top and win on a key collision.
    pub fn query_params(&self) -> QueryParams {
        let mut params = self
            .fields
            .values()
            .fold(QueryParams::new(), |params, field| field.contribute(params));
        params.extend_from(&self.parameters);
        params
    }

    /// Renders the request URL.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if endpoint, collection and id do
    /// not form an absolute URL.
    pub fn render_url(&self) -> Result<Url, ConfigError> {
        let mut raw = format!("{}{}/", self.endpoint, self.collection);
        if !self.id.is_empty() {
            raw.push_str(&self.id);
            raw.push('/');
        }

        let query = self.query_params().encode();
        if !query.is_empty() {
            raw.push('?');
            raw.push_str(&query);
        }

        Ok(Url::parse(&raw)?)
    }
}
