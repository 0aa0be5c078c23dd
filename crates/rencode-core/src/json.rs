//! Conversions between rencode values and `serde_json::Value`.
//!
//! JSON has no byte strings, no integer widths and only string keys, so the mapping is
//! lossy in the rencode → JSON direction:
//!
//! - byte strings become JSON strings when they are valid UTF-8, otherwise arrays of
//!   byte values
//! - big numbers outside the `i64`/`u64` range become decimal strings
//! - non-finite floats become `null`
//! - dictionary keys are rendered as text; two keys with the same rendering (`7` and
//!   `b"7"`) are an error rather than a silent overwrite
//!
//! Object order is kept (serde_json's `preserve_order`), so `from_json` produces
//! dictionaries in document order.

use crate::collections::{Dictionary, List};
use crate::error::{RencodeError, Result};
use crate::types::Value;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde_json::{Map, Number};

/// Parse a JSON document into a rencode value.
pub fn parse_json(json: &str) -> Result<Value> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    from_json(&value)
}

/// Convert a JSON value. Integers take the narrowest variant that holds them.
pub fn from_json(json: &serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => from_number(n),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::List(
            items
                .iter()
                .map(from_json)
                .collect::<Result<List>>()?,
        ),
        serde_json::Value::Object(map) => {
            let mut dict = Dictionary::with_capacity(map.len());
            for (key, value) in map {
                dict.add(key.as_str(), from_json(value)?)?;
            }
            Value::Dict(dict)
        }
    })
}

fn from_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::integer(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // Finite by construction: serde_json rejects NaN and infinities.
        Value::Float64(n.as_f64().unwrap_or_default())
    }
}

/// Convert a rencode value into JSON.
///
/// Fails with [`RencodeError::DuplicateJsonKey`] when two keys of one dictionary
/// render to the same text.
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::None => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int8(_) | Value::Int16(_) | Value::Int32(_) | Value::Int64(_) => value
            .as_i64()
            .map(serde_json::Value::from)
            .unwrap_or(serde_json::Value::Null),
        Value::BigInt(n) => big_to_json(n),
        Value::Float32(x) => float_to_json(f64::from(*x)),
        Value::Float64(x) => float_to_json(*x),
        Value::Bytes(b) => bytes_to_json(b),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::List(list) => serde_json::Value::Array(
            list.iter().map(to_json).collect::<Result<Vec<_>>>()?,
        ),
        Value::Dict(dict) => {
            let mut map = Map::with_capacity(dict.len());
            for (key, value) in dict.iter() {
                let key = key_to_string(key);
                if map.contains_key(&key) {
                    return Err(RencodeError::DuplicateJsonKey { key });
                }
                map.insert(key, to_json(value)?);
            }
            serde_json::Value::Object(map)
        }
    })
}

fn big_to_json(n: &BigInt) -> serde_json::Value {
    if let Some(i) = n.to_i64() {
        serde_json::Value::from(i)
    } else if let Some(u) = n.to_u64() {
        serde_json::Value::from(u)
    } else {
        serde_json::Value::String(n.to_string())
    }
}

fn float_to_json(x: f64) -> serde_json::Value {
    Number::from_f64(x)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn bytes_to_json(b: &[u8]) -> serde_json::Value {
    match std::str::from_utf8(b) {
        Ok(s) => serde_json::Value::String(s.to_string()),
        Err(_) => serde_json::Value::Array(b.iter().map(|&byte| byte.into()).collect()),
    }
}

fn key_to_string(key: &Value) -> String {
    match key.as_str() {
        Some(s) => s.to_string(),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_take_narrowest_variant() {
        assert!(matches!(from_json(&json!(5)).unwrap(), Value::Int8(5)));
        assert!(matches!(from_json(&json!(300)).unwrap(), Value::Int16(300)));
        assert!(matches!(
            from_json(&json!(u64::MAX)).unwrap(),
            Value::BigInt(_)
        ));
    }

    #[test]
    fn invalid_utf8_bytes_become_array() {
        assert_eq!(to_json(&Value::Bytes(vec![0xff, 1])).unwrap(), json!([255, 1]));
        assert_eq!(to_json(&Value::Bytes(b"hi".to_vec())).unwrap(), json!("hi"));
    }

    #[test]
    fn non_text_keys_are_displayed() {
        let mut dict = Dictionary::new();
        dict.add(false, "bäz").unwrap();
        dict.add(7i8, 1i8).unwrap();
        assert_eq!(
            to_json(&Value::Dict(dict)).unwrap(),
            json!({"false": "bäz", "7": 1})
        );
    }

    #[test]
    fn keys_with_same_rendering_are_rejected() {
        let mut dict = Dictionary::new();
        dict.add(7i8, "int").unwrap();
        dict.add(b"7".to_vec(), "bytes").unwrap();
        match to_json(&Value::Dict(dict)) {
            Err(RencodeError::DuplicateJsonKey { key }) => assert_eq!(key, "7"),
            other => panic!("expected key collision, got {other:?}"),
        }
    }

    #[test]
    fn nan_becomes_null() {
        assert_eq!(to_json(&Value::Float64(f64::NAN)).unwrap(), json!(null));
    }
}
