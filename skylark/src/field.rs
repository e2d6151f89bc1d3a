//! Selectable and expandable resource fields.

use crate::params::QueryParams;

/// Parameter listing the fields the server should return.
pub const FIELDS_PARAM: &str = "fields";

/// Parameter listing related fields the server should embed.
pub const EXPAND_PARAM: &str = "expand";

/// A named attribute of a resource.
///
/// An included field is listed in the `fields` parameter, an expanded field
/// in the `expand` parameter. [`crate::Request::expand`] makes the two flags
/// mutually exclusive for the stored field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    is_included: bool,
    is_expanded: bool,
}

impl Field {
    /// Creates an included, non-expanded field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_included: true,
            is_expanded: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_included(&self) -> bool {
        self.is_included
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn set_included(&mut self, included: bool) {
        self.is_included = included;
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    /// Adds this field to the query parameters and returns the updated set.
    pub fn contribute(&self, mut params: QueryParams) -> QueryParams {
        if self.is_included {
            params.append_list(FIELDS_PARAM, &self.name);
        }
        if self.is_expanded {
            params.append_list(EXPAND_PARAM, &self.name);
        }
        params
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
