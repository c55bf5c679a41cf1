//! Ordered query parameter collection.

use std::fmt;

/// Ordered `key=value` pairs destined for a request URL.
///
/// Insertion order is preserved. Setting a key that already exists replaces
/// its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Sets `key` only when `value` is present and non-empty.
    pub fn set_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set(key, value);
        }
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the pairs as a slice, suitable for `reqwest::RequestBuilder::query`.
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// URL-encodes the parameters as a query string (without the leading `?`).
    pub fn encode(&self) -> String {
        serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut params = QueryParams::new();
        params.set("search", "jazz");
        params.set("size", "25");
        params.set("page", "0");
        assert_eq!(params.keys(), vec!["search", "size", "page"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::new();
        params.set("search", "jazz");
        params.set("size", "25");
        params.set("search", "blues");
        assert_eq!(params.len(), 2);
        assert_eq!(params.keys(), vec!["search", "size"]);
        assert_eq!(params.get("search"), Some("blues"));
    }

    #[test]
    fn test_set_opt_skips_empty() {
        let mut params = QueryParams::new();
        params.set_opt("owner", None);
        params.set_opt("city", Some(""));
        params.set_opt("lang", Some("nl"));
        assert_eq!(params.len(), 1);
        assert!(params.contains_key("lang"));
        assert!(!params.contains_key("city"));
    }

    #[test]
    fn test_encode_escapes_values() {
        let params: QueryParams = [("search", "jazz & blues"), ("markers", "!archived,featured")]
            .into_iter()
            .collect();
        assert_eq!(
            params.encode(),
            "search=jazz+%26+blues&markers=%21archived%2Cfeatured"
        );
        assert_eq!(params.to_string(), params.encode());
    }

    #[test]
    fn test_empty_encodes_to_empty_string() {
        assert_eq!(QueryParams::new().encode(), "");
    }
}
