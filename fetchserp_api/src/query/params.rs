//! The [`Params`] parameter bag forwarded by every endpoint.

use serde_json::{Map, Value};
use url::Url;

use super::common::{query_values, Query};

/// Ordered bag of named request parameters.
///
/// GET endpoints send it as the query string, POST endpoints as a JSON object
/// body. `Null` values are dropped in both cases, so an optional argument can
/// be passed straight through with [`Params::with_opt`].
///
/// ```
/// use fetchserp_api::Params;
///
/// let params = Params::new()
///     .with("query", "rust web frameworks")
///     .with("search_engine", "google")
///     .with("pages_number", 2)
///     .with_list("tags", ["a", "b"]);
/// assert_eq!(params.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. Setting an existing key replaces its value
    /// without changing its position.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` only when `value` is `Some`; `None` stores a null that is
    /// never sent.
    pub fn with_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        self.with(key, value.map_or(Value::Null, Into::into))
    }

    /// Sets `key` to a list. In a query string the key is repeated once per element.
    pub fn with_list<I, V>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<Value>>();
        self.with(key, Value::Array(values))
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Expanded `(key, value)` pairs in query-string order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(key, value)| {
                query_values(value)
                    .into_iter()
                    .map(move |v| (key.clone(), v))
            })
            .collect()
    }

    /// JSON object used as a POST body. Null entries are omitted.
    pub fn to_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

impl Query for Params {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.query_pairs() {
            url.query_pairs_mut().append_pair(&key, &value);
        }
        url
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key.as_ref(), value);
        }
        params
    }
}

impl<K: AsRef<str>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Params {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
