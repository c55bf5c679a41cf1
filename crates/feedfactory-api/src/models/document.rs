//! Open field map used for read-modify-write updates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A resource document kept as an untyped JSON object.
///
/// Fields this crate does not model survive a fetch-and-PUT round trip
/// because the document is never narrowed to [`Resource`](super::Resource).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDocument(Map<String, Value>);

impl ResourceDocument {
    /// Parses a document from a response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for invalid JSON and [`Error::UnexpectedShape`]
    /// when the body is valid JSON but not an object.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => Ok(ResourceDocument(map)),
            other => Err(Error::UnexpectedShape(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Sets the `published` flag, leaving every other field untouched.
    pub fn set_published(&mut self, published: bool) {
        self.0.insert("published".to_string(), Value::Bool(published));
    }

    pub fn published(&self) -> Option<bool> {
        self.0.get("published").and_then(Value::as_bool)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ResourceDocument {
    fn from(map: Map<String, Value>) -> Self {
        ResourceDocument(map)
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
