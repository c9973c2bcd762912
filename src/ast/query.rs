use crate::ast::FilterExpr;

/// Fields requested between `SELECT` and `FROM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// `SELECT *` - whole documents
    All,

    /// Named fields with the `c.` alias already stripped, in select order
    Fields(Vec<String>),
}

/// A compiled query.
///
/// Holds no reference to any document collection or parameter values, so a
/// single `Query` can be cached by its text and evaluated many times.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Projection applied to matching documents
    pub selection: Selection,

    /// Filter tree from the `WHERE` clause
    pub filter: FilterExpr,
}
