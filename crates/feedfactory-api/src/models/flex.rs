//! Deserializers for fields whose JSON shape varies between records.
//!
//! The API is inconsistent about several fields: markers arrive as an array
//! or as one comma-separated string, nested objects are sometimes `null` or a
//! bare string, and scalars are occasionally `null`. These helpers try each
//! known shape in a fixed order and fall back to the type's empty value
//! instead of failing the whole record.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};

/// A list of strings that may be encoded as an array or as a single
/// comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlexStrings {
    List(Vec<String>),
    Single(String),
    Other(IgnoredAny),
}

impl FlexStrings {
    fn into_vec(self) -> Vec<String> {
        match self {
            FlexStrings::List(items) => items,
            FlexStrings::Single(s) => split_commas(&s),
            FlexStrings::Other(_) => Vec::new(),
        }
    }
}

/// Splits a comma-separated string, trimming entries and dropping empty ones.
pub fn split_commas(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Decodes an array of strings, a comma-separated string, or anything else
/// as an empty list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    FlexStrings::deserialize(deserializer).map(FlexStrings::into_vec)
}

/// Decodes `null` as the type's default.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decodes `T`, degrading to `T::default()` when the value has an
/// unexpected shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match T::deserialize(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::debug!(
                target_type = std::any::type_name::<T>(),
                error = %e,
                "ignoring field with unexpected shape"
            );
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "string_list")]
        markers: Vec<String>,
        #[serde(default, deserialize_with = "nullable")]
        name: String,
        #[serde(default, deserialize_with = "lenient")]
        nested: Option<Nested>,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Nested {
        value: u32,
    }

    fn holder(v: serde_json::Value) -> Holder {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_markers_from_array() {
        assert_eq!(holder(json!({"markers": ["a", "b", "c"]})).markers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_markers_from_comma_string() {
        assert_eq!(holder(json!({"markers": "a,b,c"})).markers, vec!["a", "b", "c"]);
        assert_eq!(holder(json!({"markers": " a , b "})).markers, vec!["a", "b"]);
    }

    #[test]
    fn test_markers_empty_null_or_other() {
        assert!(holder(json!({"markers": ""})).markers.is_empty());
        assert!(holder(json!({"markers": null})).markers.is_empty());
        assert!(holder(json!({"markers": 42})).markers.is_empty());
        assert!(holder(json!({"markers": {"x": 1}})).markers.is_empty());
        assert!(holder(json!({})).markers.is_empty());
    }

    #[test]
    fn test_nullable_scalar() {
        assert_eq!(holder(json!({"name": null})).name, "");
        assert_eq!(holder(json!({"name": "x"})).name, "x");
    }

    #[test]
    fn test_lenient_nested() {
        assert_eq!(
            holder(json!({"nested": {"value": 3}})).nested,
            Some(Nested { value: 3 })
        );
        assert_eq!(holder(json!({"nested": "garbage"})).nested, None);
        assert_eq!(holder(json!({"nested": null})).nested, None);
    }
}
