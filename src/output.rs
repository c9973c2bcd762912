//! JSON rendering of query results.
//!
//! Results render as a JSON array of objects. Field order follows the
//! documents (input order for `SELECT *`, select-list order otherwise).
//! Decimals print in their shortest exact form, and dates as RFC 3339 strings.
//!
//! # Examples
//!
//! ```
//! use docsift::{Document, Value};
//! use docsift::output::{to_json, to_json_pretty};
//!
//! let doc: Document = [("id", Value::from("1")), ("age", Value::from(30))]
//!     .into_iter()
//!     .collect();
//!
//! assert_eq!(to_json(&[doc.clone()]), r#"[{"id":"1","age":30}]"#);
//! assert!(to_json_pretty(&[doc]).contains("\n  {"));
//! ```

use crate::{convert::document_to_json, value::Document};

/// Compact JSON array of documents.
pub fn to_json(documents: &[Document]) -> String {
    to_json_value(documents).to_string()
}

/// Pretty-printed JSON array of documents, two-space indentation.
pub fn to_json_pretty(documents: &[Document]) -> String {
    // Serializing a serde_json::Value cannot fail.
    serde_json::to_string_pretty(&to_json_value(documents)).unwrap_or_default()
}

pub fn to_json_value(documents: &[Document]) -> serde_json::Value {
    serde_json::Value::Array(documents.iter().cloned().map(document_to_json).collect())
}
