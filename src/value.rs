use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::path;

const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A JSON-like value held by documents and parameter bindings.
///
/// Numbers are kept as [`Decimal`] so that comparisons never suffer from
/// floating-point rounding, and date/time instants get their own tag so that
/// they compare chronologically rather than lexically.
///
/// # Examples
///
/// ```
/// use docsift::{Document, Value};
///
/// let null = Value::Null;
/// let flag = Value::from(true);
/// let age = Value::from(42);
/// let name = Value::from("John");
///
/// let list = Value::Array(vec![Value::from(1), Value::from(2)]);
///
/// let mut doc = Document::new();
/// doc.insert("name", name);
/// let object = Value::Object(doc);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean
    Boolean(bool),

    /// Decimal number
    Number(Decimal),

    /// Number outside the decimal range, kept as a double
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Date/time instant together with the text it was read from
    Date(DateValue),

    /// Array of values
    Array(Vec<Value>),

    /// Ordered mapping of field name to value
    Object(Document),
}

impl Value {
    /// Human-readable name of the value's tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Interpret the value as a decimal number.
    ///
    /// Numbers convert directly and strings are parsed (plain or scientific
    /// notation). Every other tag is non-numeric.
    pub fn as_decimal(&self) -> Option<Decimal> {
        // Booleans are not numeric here; they compare by their text.
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
            }
            _ => None,
        }
    }

    /// Interpret the value as a floating-point number. Used only when one
    /// side of a comparison is out of decimal range.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Number(n) => n.to_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Interpret the value as a date/time instant.
    ///
    /// Date values convert directly and strings holding an ISO-8601 date/time
    /// are parsed.
    pub fn as_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Value::Date(d) => Some(*d.instant()),
            Value::String(s) => DateValue::parse(s).map(|d| *d.instant()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual representation used for equality fallback comparisons.
    ///
    /// Strings render without quotes; containers render as compact JSON.
    pub fn as_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => n.normalize().to_string(),
            Value::String(s) => s.clone(),
            Value::Date(d) => d.as_str().to_string(),
            Value::Float(_) | Value::Array(_) | Value::Object(_) => {
                crate::convert::value_to_json(self.clone()).to_string()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<f64> for Value {
    /// Finite floats outside the decimal range become [`Value::Float`];
    /// non-finite floats become `Null`.
    fn from(n: f64) -> Self {
        match Decimal::from_f64(n) {
            Some(d) => Value::Number(d),
            None if n.is_finite() => Value::Float(n),
            None => Value::Null,
        }
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Value::Date(DateValue::from(d))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(DateValue::from(d.fixed_offset()))
    }
}

impl From<DateValue> for Value {
    fn from(d: DateValue) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc)
    }
}

/// A date/time instant and the exact text it was read from.
///
/// Comparisons between dates use the instant; textual equality and JSON
/// output use the text, so a date read from a document is written back
/// unchanged.
///
/// # Examples
/// ```
/// use docsift::value::DateValue;
///
/// let date = DateValue::parse("2024-01-01T00:00:00.000Z").unwrap();
/// assert_eq!(date.as_str(), "2024-01-01T00:00:00.000Z");
/// assert_eq!(date.instant().to_rfc3339(), "2024-01-01T00:00:00+00:00");
/// assert!(DateValue::parse("2024-01-01").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DateValue {
    instant: DateTime<FixedOffset>,
    text: String,
}

impl DateValue {
    pub fn new(instant: DateTime<FixedOffset>, text: impl Into<String>) -> Self {
        DateValue {
            instant,
            text: text.into(),
        }
    }

    /// Read an ISO-8601 date/time (`2024-03-01T10:00:00Z`). Without an
    /// offset the time is taken as UTC.
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() < 19 || bytes[4] != b'-' || bytes[7] != b'-' || bytes[10] != b'T' {
            return None;
        }

        let instant = DateTime::parse_from_rfc3339(text).ok().or_else(|| {
            NaiveDateTime::parse_from_str(text, NAIVE_DATE_TIME_FORMAT)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })?;
        Some(DateValue::new(instant, text))
    }

    pub fn instant(&self) -> &DateTime<FixedOffset> {
        &self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<DateTime<FixedOffset>> for DateValue {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        DateValue::new(instant, instant.to_rfc3339())
    }
}

/// One queryable record: an ordered list of named fields.
///
/// Field order is preserved as inserted. [`Document::get`] matches names
/// case-insensitively, while [`Document::insert`] and [`Document::remove`]
/// address fields by their exact name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name, ignoring ASCII case. The first match wins.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| path::names_match(key, name))
            .map(|(_, value)| value)
    }

    /// Look up a field by its exact name.
    pub fn get_exact(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a field, replacing an existing field of the same exact name in place.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Remove a field by its exact name.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(key, _)| key == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
