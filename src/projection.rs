//! Shapes matching documents according to the query's select list.

use crate::{ast::Selection, value::Document};

/// Project one document onto a selection.
///
/// `SELECT *` yields an independent copy of the whole document. A field list
/// yields a new document holding only the requested fields, keyed by the
/// name as written in the query and looked up case-insensitively; fields the
/// source document lacks are left out.
///
/// # Examples
/// ```
/// use docsift::{ast::Selection, projection::project, Document, Value};
///
/// let doc: Document = [("id", Value::from("1")), ("Country", Value::from("US"))]
///     .into_iter()
///     .collect();
///
/// let picked = project(&doc, &Selection::Fields(vec!["country".into(), "name".into()]));
/// assert_eq!(picked.get_exact("country"), Some(&Value::from("US")));
/// assert_eq!(picked.len(), 1);
/// ```
pub fn project(doc: &Document, selection: &Selection) -> Document {
    match selection {
        Selection::All => doc.clone(),
        Selection::Fields(fields) => fields
            .iter()
            .filter_map(|field| doc.get(field).map(|value| (field.clone(), value.clone())))
            .collect(),
    }
}
