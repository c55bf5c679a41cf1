//! Paginated search envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::flex::nullable;
use super::resource::{parse_resources, Resource};

/// One page of a listing: `{size, page, hits, results}`.
///
/// Results are kept raw so callers can print them verbatim; use
/// [`SearchResult::resources`] to reconcile them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "nullable")]
    pub size: u32,
    #[serde(deserialize_with = "nullable")]
    pub page: u32,
    #[serde(deserialize_with = "nullable")]
    pub hits: u64,
    #[serde(deserialize_with = "nullable")]
    pub results: Vec<Value>,
}

impl SearchResult {
    /// Reconciles the raw results into [`Resource`]s.
    ///
    /// # Errors
    ///
    /// Fails when a result is not an object or has no `id`.
    pub fn resources(&self) -> Result<Vec<Resource>, serde_json::Error> {
        parse_resources(&self.results)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_decoding() {
        let result: SearchResult = serde_json::from_value(json!({
            "size": 2,
            "page": 0,
            "hits": 120,
            "results": [{"id": "a"}, {"id": "b"}]
        }))
        .unwrap();
        assert_eq!(result.hits, 120);
        assert_eq!(result.size, 2);
        let resources = result.resources().unwrap();
        assert_eq!(resources[0].id, "a");
    }

    #[test]
    fn test_missing_or_null_fields() {
        let result: SearchResult = serde_json::from_value(json!({"hits": 0, "results": null})).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.page, 0);
    }
}
