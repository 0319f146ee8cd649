//! Lenient decoding for fields the catalog serializes inconsistently.
//!
//! Depending on the NADA installation and record, fields such as `year_start`
//! arrive as `2020`, `"2020"`, `""` or `null`. Records are normalized here
//! before they reach the typed structs, so the structs themselves can use
//! plain integer and string fields.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while coercing a loosely typed field.
#[derive(Debug, Error)]
pub enum LenientError {
    #[error("failed to convert field '{field}' to int: {value:?} is not an integer")]
    InvalidInteger { field: String, value: String },

    #[error("unexpected type for field '{field}': {kind}")]
    UnexpectedType { field: String, kind: &'static str },

    #[error("failed to decode record: {0}")]
    Record(#[from] serde_json::Error),
}

/// Coerces a single JSON value into an integer.
///
/// * `null` or a missing value → `0`
/// * number → truncated towards zero
/// * `""` → `0`
/// * any other string → parsed as a base-10 integer
///
/// # Arguments
/// * `field` - Name of the field, used in error messages.
/// * `value` - The raw value, `None` if the field is absent.
pub fn coerce_int(field: &str, value: Option<&Value>) -> Result<i64, LenientError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => match number.as_i64() {
            Some(int) => Ok(int),
            None => Ok(number.as_f64().map(|f| f.trunc() as i64).unwrap_or(0)),
        },
        Some(Value::String(s)) if s.is_empty() => Ok(0),
        Some(Value::String(s)) => s.parse::<i64>().map_err(|_| LenientError::InvalidInteger {
            field: field.to_string(),
            value: s.clone(),
        }),
        Some(other) => Err(LenientError::UnexpectedType {
            field: field.to_string(),
            kind: json_kind(other),
        }),
    }
}

/// Rewrites the given integer fields of a raw record in place.
///
/// Every listed field ends up as a JSON integer, including fields that were
/// absent. Runs before the record is decoded into its typed struct.
pub fn normalize_int_fields(
    record: &mut Map<String, Value>,
    fields: &[&str],
) -> Result<(), LenientError> {
    for field in fields {
        let int = coerce_int(field, record.get(*field))?;
        record.insert((*field).to_string(), Value::from(int));
    }

    Ok(())
}

/// Deserializes a value that may be `null`, yielding `T::default()` instead.
///
/// Pair with `#[serde(default)]` so a missing key and an explicit `null`
/// decode the same way, e.g. an empty string or an empty list.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_coerce_int_accepts_number_string_empty_and_null() {
        let cases = [
            (json!(2020), 2020),
            (json!("2020"), 2020),
            (json!(""), 0),
            (json!(null), 0),
        ];

        for (value, expected) in cases {
            let result = coerce_int("year_start", Some(&value)).expect("Could not coerce value");
            assert_eq!(result, expected, "Unexpected result for {value}");
        }
    }

    #[test]
    fn test_coerce_int_missing_is_zero() {
        assert_eq!(coerce_int("varcount", None).unwrap(), 0);
    }

    #[test]
    fn test_coerce_int_truncates_floats() {
        assert_eq!(coerce_int("varcount", Some(&json!(85.9))).unwrap(), 85);
        assert_eq!(coerce_int("varcount", Some(&json!(-3.7))).unwrap(), -3);
    }

    #[test]
    fn test_coerce_int_rejects_non_numeric_string() {
        let err = coerce_int("year_start", Some(&json!("abc"))).unwrap_err();

        match err {
            LenientError::InvalidInteger { field, value } => {
                assert_eq!(field, "year_start");
                assert_eq!(value, "abc");
            }
            other => panic!("Expected InvalidInteger, got {other:?}"),
        }
    }

    #[test]
    fn test_coerce_int_rejects_other_types() {
        let err = coerce_int("year_end", Some(&json!([2020]))).unwrap_err();
        assert!(matches!(
            err,
            LenientError::UnexpectedType { kind: "array", .. }
        ));
    }

    #[test]
    fn test_normalize_int_fields_fills_missing_fields() {
        let mut record = json!({"idno": "X", "year_start": "2019", "year_end": null})
            .as_object()
            .cloned()
            .unwrap();

        normalize_int_fields(&mut record, &["year_start", "year_end", "varcount"]).unwrap();

        assert_eq!(record["year_start"], json!(2019));
        assert_eq!(record["year_end"], json!(0));
        assert_eq!(record["varcount"], json!(0));
        assert_eq!(record["idno"], json!("X"));
    }

    #[test]
    fn test_null_as_default_string() {
        #[derive(Deserialize)]
        struct Record {
            #[serde(default, deserialize_with = "null_as_default")]
            title: String,
        }

        let record: Record = serde_json::from_value(json!({"title": null})).unwrap();
        assert_eq!(record.title, "");

        let record: Record = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.title, "");

        let record: Record = serde_json::from_value(json!({"title": "HFS"})).unwrap();
        assert_eq!(record.title, "HFS");
    }

    #[test]
    fn test_null_as_default_list() {
        #[derive(Deserialize)]
        struct Listing {
            #[serde(default, deserialize_with = "null_as_default")]
            rows: Vec<Map<String, Value>>,
        }

        let listing: Listing = serde_json::from_value(json!({"rows": null})).unwrap();
        assert!(listing.rows.is_empty());

        let listing: Listing = serde_json::from_value(json!({"rows": [{"idno": "X"}]})).unwrap();
        assert_eq!(listing.rows.len(), 1);

        // A null list is tolerated, a list of the wrong shape is not
        assert!(serde_json::from_value::<Listing>(json!({"rows": "none"})).is_err());
    }
}
