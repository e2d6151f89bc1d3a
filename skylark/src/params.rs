//! Single-valued query parameter set.
//!
//! Every key carries exactly one value. List-like parameters such as
//! `fields` and `expand` are kept as one comma-joined value rather than a
//! repeated key.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Separator used when several names share one parameter.
pub const LIST_SEPARATOR: &str = ",";

/// Query parameters sent with a request.
///
/// Keys are kept sorted, so [`QueryParams::encode`] is deterministic. Callers
/// must not rely on that ordering when talking to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Appends `item` to the comma-joined list stored under `key`.
    pub fn append_list(&mut self, key: &str, item: &str) {
        match self.0.get_mut(key) {
            Some(existing) if !existing.is_empty() => {
                existing.push_str(LIST_SEPARATOR);
                existing.push_str(item);
            }
            _ => {
                self.0.insert(key.to_string(), item.to_string());
            }
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies every entry of `other` into `self`, overwriting on collision.
    pub fn extend_from(&mut self, other: &QueryParams) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    /// Encodes the set as an `application/x-www-form-urlencoded` string.
    ///
    /// Returns an empty string for an empty set.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
