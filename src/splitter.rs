//! Splits query text into its select list and filter clause.
//!
//! Keywords are located by plain, case-sensitive substring search, so only
//! queries written as `SELECT ... FROM c WHERE ...` are understood. This is
//! the single place that knows about clause keywords; everything downstream
//! works on the extracted pieces.

use crate::{
    ast::Selection,
    error::{QueryError, QueryResult},
    path,
};

const SELECT: &str = "SELECT";
const FROM: &str = "FROM";
const WHERE: &str = "WHERE";

/// Raw clause text extracted from a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParts<'a> {
    /// Comma-separated tokens between `SELECT` and `FROM`, trimmed
    pub fields: Vec<&'a str>,
    /// Everything after `WHERE`, trimmed
    pub filter: &'a str,
}

impl QueryParts<'_> {
    /// Turn the raw select tokens into a [`Selection`].
    ///
    /// Any `*` token selects whole documents.
    pub fn selection(&self) -> Selection {
        if self.fields.contains(&"*") {
            Selection::All
        } else {
            Selection::Fields(
                self.fields
                    .iter()
                    .map(|field| path::property_name(field).to_string())
                    .collect(),
            )
        }
    }
}

/// Split query text into select tokens and the filter clause.
///
/// # Errors
///
/// [`QueryError::MalformedQuery`] when `SELECT`, `FROM` or `WHERE` is missing
/// (or out of order), or when the select list or the filter clause is empty.
///
/// # Examples
/// ```
/// use docsift::splitter::split_query;
///
/// let parts = split_query("SELECT c.id, c.name FROM c WHERE c.age > @age").unwrap();
/// assert_eq!(parts.fields, vec!["c.id", "c.name"]);
/// assert_eq!(parts.filter, "c.age > @age");
/// ```
pub fn split_query(text: &str) -> QueryResult<QueryParts<'_>> {
    let select_at = text
        .find(SELECT)
        .ok_or_else(|| malformed("missing SELECT keyword"))?;
    let after_select = select_at + SELECT.len();

    let from_at = text[after_select..]
        .find(FROM)
        .map(|i| after_select + i)
        .ok_or_else(|| malformed("missing FROM keyword after SELECT"))?;
    let after_from = from_at + FROM.len();

    let where_at = text[after_from..]
        .find(WHERE)
        .map(|i| after_from + i)
        .ok_or_else(|| malformed("missing WHERE keyword after FROM"))?;

    let select_list = text[after_select..from_at].trim();
    if select_list.is_empty() {
        return Err(malformed("empty select list"));
    }

    let filter = text[where_at + WHERE.len()..].trim();
    if filter.is_empty() {
        return Err(malformed("empty WHERE clause"));
    }

    let fields = select_list.split(',').map(str::trim).collect();

    Ok(QueryParts { fields, filter })
}

fn malformed(reason: &str) -> QueryError {
    QueryError::MalformedQuery(reason.to_string())
}
