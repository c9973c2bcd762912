//! JSON <-> docsift Value conversion utilities

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::value::{DateValue, Document, Value};

/// Convert serde_json::Value to a docsift Value.
///
/// Strings holding an ISO-8601 date/time (`2024-03-01T10:00:00Z`, or without
/// an offset, read as UTC) become [`Value::Date`], keeping their text.
/// Numbers become decimals; a number outside the decimal range is kept as
/// [`Value::Float`].
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => number_from_json(&n),
        serde_json::Value::String(s) => match DateValue::parse(&s) {
            Some(date) => Value::Date(date),
            None => Value::String(s),
        },
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

/// Convert a docsift Value to serde_json::Value
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Number(n) => number_to_json(n),
        Value::String(s) => serde_json::Value::String(s),
        Value::Float(n) => serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Date(d) => serde_json::Value::String(d.as_str().to_string()),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Object(doc) => document_to_json(doc),
    }
}

pub fn document_to_json(doc: Document) -> serde_json::Value {
    serde_json::Value::Object(doc.into_iter().map(|(k, v)| (k, value_to_json(v))).collect())
}

/// Read documents from JSON: an array of objects, or a single object.
///
/// Returns `None` when the input is neither, or when an array element is not
/// an object.
pub fn json_to_documents(v: serde_json::Value) -> Option<Vec<Document>> {
    match v {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match json_to_value(item) {
                Value::Object(doc) => Some(doc),
                _ => None,
            })
            .collect(),
        obj @ serde_json::Value::Object(_) => match json_to_value(obj) {
            Value::Object(doc) => Some(vec![doc]),
            _ => None,
        },
        _ => None,
    }
}

fn number_from_json(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::Number(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Value::Number(Decimal::from(u));
    }

    let text = n.to_string();
    if let Ok(d) = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        return Value::Number(d);
    }
    // serde_json only yields finite doubles here
    n.as_f64().map_or(Value::Null, Value::from)
}

fn number_to_json(n: Decimal) -> serde_json::Value {
    n.normalize()
        .to_string()
        .parse::<serde_json::Number>()
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
