//! Lenient field decoding for catalog records.
//!
//! Catalog records are partial and loosely typed. A field holding the wrong
//! JSON type decodes as absent instead of failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an optional field, treating a value of the wrong shape as missing.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Decode a list, dropping entries that do not decode.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "lenient_vec")]
        names: Vec<String>,
    }

    #[test]
    fn test_lenient_wrong_type_is_none() {
        let sample: Sample = serde_json::from_str(r#"{"year": "1965"}"#).unwrap();
        assert_eq!(sample.year, None);

        let sample: Sample = serde_json::from_str(r#"{"year": 1965}"#).unwrap();
        assert_eq!(sample.year, Some(1965));

        let sample: Sample = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert_eq!(sample.year, None);
    }

    #[test]
    fn test_lenient_vec_drops_bad_entries() {
        let sample: Sample = serde_json::from_str(r#"{"names": ["a", 1, "b", null]}"#).unwrap();
        assert_eq!(sample.names, vec!["a", "b"]);

        let sample: Sample = serde_json::from_str(r#"{"names": "a"}"#).unwrap();
        assert!(sample.names.is_empty());

        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert!(sample.names.is_empty());
    }
}
