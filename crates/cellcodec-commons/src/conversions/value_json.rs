use serde_json::{Map, Number};

use crate::conversions::to_string_binary;
use crate::errors::CodecError;
use crate::models::Value;

/// Render a decoded value as JSON.
///
/// Bytes are rendered as binary-escaped text, maps as objects keyed by the
/// display form of their keys. Non-finite floats become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bytes(b) => serde_json::Value::String(to_string_binary(b)),
        Value::Byte(v) => serde_json::Value::Number(Number::from(*v)),
        Value::Bool(v) => serde_json::Value::Bool(*v),
        Value::Int(v) => serde_json::Value::Number(Number::from(*v)),
        Value::Long(v) => serde_json::Value::Number(Number::from(*v)),
        Value::Float(v) => Number::from_f64(f64::from(*v))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Double(v) => Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Vector(items) | Value::List(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        },
        Value::Map(entries) => {
            let mut obj = Map::with_capacity(entries.len());
            for (k, v) in entries {
                let key = match k {
                    Value::Text(s) => s.clone(),
                    other => other.to_string(),
                };
                obj.insert(key, value_to_json(v));
            }
            serde_json::Value::Object(obj)
        },
    }
}

/// Build a value from JSON input.
///
/// Integers become `Long`, other numbers `Double`, arrays `Vector` and
/// objects `Map` with `Text` keys. `null` has no counterpart and is rejected.
pub fn json_to_value(json: &serde_json::Value) -> Result<Value, CodecError> {
    match json {
        serde_json::Value::Null => Err(CodecError::unsupported_value("null has no value representation")),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Long(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Double(f))
            } else {
                Err(CodecError::unsupported_value(format!("number out of range: {}", n)))
            }
        },
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        serde_json::Value::Array(items) => {
            items.iter().map(json_to_value).collect::<Result<Vec<_>, _>>().map(Value::Vector)
        },
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| Ok((Value::Text(k.clone()), json_to_value(v)?)))
            .collect::<Result<Vec<_>, CodecError>>()
            .map(Value::Map),
    }
}
