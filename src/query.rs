//! Query encoding for search requests
//!
//! Search parameters travel as a URL query string. `SearchQuery` covers the
//! parameters the service documents, while `QueryValues` is the free-form
//! multi-valued form the client actually sends. Both encode deterministically:
//! keys in ascending order, values in insertion order.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Query parameter listing the fields the service should return.
pub const FIELDS_PARAM: &str = "fields";

/// Field the hit decoder relies on to pick a hit variant.
pub const DISCRIMINATOR_FIELD: &str = "type";

/// Structured search parameters.
///
/// Empty fields are left out of the encoded query. Values are passed through
/// without validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    // Mandatory for the service, though not enforced here
    pub device_type: String,
    pub language: String,
    pub site: String,

    pub brand_id: String,
    pub episode: String,
    pub page_size: String,
    pub season: String,
    pub season_id: String,
    pub kind: String,
    pub video_ids: Vec<String>,

    pub sort_by: String,
    pub order: String,
}

impl SearchQuery {
    /// Encodes the query into a raw URL query string (without a leading `?`).
    pub fn to_query_string(&self) -> String {
        QueryValues::from(self).encode()
    }

    /// Returns each parameter under its wire name, including empty ones.
    fn wire_pairs(&self) -> [(&'static str, String); 12] {
        [
            ("device_type", self.device_type.clone()),
            ("lang", self.language.clone()),
            ("site", self.site.clone()),
            ("brand_id", self.brand_id.clone()),
            ("episode", self.episode.clone()),
            ("page_size", self.page_size.clone()),
            ("season", self.season.clone()),
            ("season_id", self.season_id.clone()),
            ("type", self.kind.clone()),
            ("video_ids", self.video_ids.join(",")),
            ("sort_by", self.sort_by.clone()),
            ("order", self.order.clone()),
        ]
    }
}

/// A sorted multi-map of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    values: BTreeMap<String, Vec<String>>,
}

impl QueryValues {
    /// Creates an empty set of query values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw URL query string.
    pub fn parse(raw: &str) -> Self {
        let mut values = Self::new();
        for (key, value) in form_urlencoded::parse(raw.trim_start_matches('?').as_bytes()) {
            values.append(key, value);
        }
        values
    }

    /// Appends a value to a key, keeping earlier values.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Replaces all values of a key with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), vec![value.into()]);
        self
    }

    /// Returns the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns all values for a key.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Makes sure `token` is one of the comma separated entries of `key`.
    ///
    /// Does nothing when `key` is absent. Tokens are compared whole, so
    /// `subtype` does not count as `type`.
    pub fn ensure_field_token(&mut self, key: &str, token: &str) {
        let Some(values) = self.values.get_mut(key) else {
            return;
        };

        let present = values
            .iter()
            .flat_map(|value| value.split(','))
            .any(|entry| entry.trim() == token);
        if present {
            return;
        }

        match values.last_mut() {
            Some(last) if !last.trim().is_empty() => {
                last.push(',');
                last.push_str(token);
            }
            Some(last) => *last = token.to_string(),
            None => values.push(token.to_string()),
        }
    }

    /// Encodes the values as `application/x-www-form-urlencoded`.
    ///
    /// An empty set encodes to an empty string.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Iterates over every key/value pair in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }
}

impl From<&SearchQuery> for QueryValues {
    fn from(query: &SearchQuery) -> Self {
        let mut values = QueryValues::new();
        for (key, value) in query.wire_pairs() {
            if !value.is_empty() {
                values.set(key, value);
            }
        }
        values
    }
}

impl From<SearchQuery> for QueryValues {
    fn from(query: SearchQuery) -> Self {
        QueryValues::from(&query)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = QueryValues::new();
        for (key, value) in iter {
            values.append(key, value);
        }
        values
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
