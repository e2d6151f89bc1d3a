//! Filter predicates and their operator suffixes.
//!
//! A filter on field `age` with operator [`FilterOp::Gt`] becomes the query
//! parameter `age__gt`. Equality uses the bare field name.

use std::fmt::Display;

use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::params::LIST_SEPARATOR;

/// Comparison operator of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, StrumDisplay, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum FilterOp {
    /// Equality; renders no suffix.
    #[strum(serialize = "")]
    Eq,
    Exact,
    Iexact,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Contains,
    Icontains,
    Startswith,
    Endswith,
    Isnull,
    Range,
}

impl FilterOp {
    /// Returns the key suffix for this operator, empty for [`FilterOp::Eq`].
    pub fn suffix(&self) -> &str {
        self.as_ref()
    }
}

/// A predicate restricting which resources are returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    op: FilterOp,
    value: String,
}

impl Filter {
    pub fn new(op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            op,
            value: value.into(),
        }
    }

    pub fn equals(value: impl Display) -> Self {
        Self::new(FilterOp::Eq, value.to_string())
    }

    pub fn gt(value: impl Display) -> Self {
        Self::new(FilterOp::Gt, value.to_string())
    }

    pub fn gte(value: impl Display) -> Self {
        Self::new(FilterOp::Gte, value.to_string())
    }

    pub fn lt(value: impl Display) -> Self {
        Self::new(FilterOp::Lt, value.to_string())
    }

    pub fn lte(value: impl Display) -> Self {
        Self::new(FilterOp::Lte, value.to_string())
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self::new(FilterOp::Contains, value)
    }

    /// Case-insensitive substring match.
    pub fn icontains(value: impl Into<String>) -> Self {
        Self::new(FilterOp::Icontains, value)
    }

    pub fn starts_with(value: impl Into<String>) -> Self {
        Self::new(FilterOp::Startswith, value)
    }

    pub fn ends_with(value: impl Into<String>) -> Self {
        Self::new(FilterOp::Endswith, value)
    }

    pub fn is_null(null: bool) -> Self {
        Self::new(FilterOp::Isnull, if null { "true" } else { "false" })
    }

    /// Matches any of `values`, sent as one comma-joined value.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        Self::new(FilterOp::In, join_values(values))
    }

    /// Inclusive range between `low` and `high`.
    pub fn range(low: impl Display, high: impl Display) -> Self {
        Self::new(FilterOp::Range, format!("{low}{LIST_SEPARATOR}{high}"))
    }

    pub fn op(&self) -> FilterOp {
        self.op
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Builds the query parameter key for filtering `field_name`.
    pub fn key_for(&self, field_name: &str) -> String {
        match self.op.suffix() {
            "" => field_name.to_string(),
            suffix => format!("{field_name}__{suffix}"),
        }
    }
}

fn join_values<I, V>(values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: Display,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
