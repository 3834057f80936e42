//! Shared query infrastructure: the [`Query`] trait and query-string value rendering.

use serde_json::Value;
use url::Url;

/// Trait implemented by anything that can be appended to a request URL as
/// query parameters.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    ///
    /// Entries already present in `url` are kept ahead of the appended ones.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Renders a parameter value as the query-string values it expands to.
///
/// `Null` expands to nothing, an array to one value per element, and any
/// other value to exactly one.
pub(crate) fn query_values(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        other => vec![scalar_text(other)],
    }
}

/// Strings are emitted unquoted, null as the empty string, everything else
/// as compact JSON text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
