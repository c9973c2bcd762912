//! # docsift Query Dialect - Abstract Syntax Tree
//!
//! A query is written as
//!
//! ```text
//! SELECT <fields | *> FROM c WHERE <condition>
//! ```
//!
//! and parsed into a [`Query`]: the [`Selection`] taken from between `SELECT`
//! and `FROM`, and a [`FilterExpr`] tree built from the text after `WHERE`.
//!
//! ## Submodules
//!
//! - **[filter]** - The boolean filter tree (`AND`, `OR`, leaf conditions)
//! - **[operators]** - Comparison operators usable in a leaf
//! - **[query]** - The parsed query and its select list
//!
//! ## Conditions
//!
//! ```text
//! c.country = @country AND c.age > @age OR IS_DEFINED(c.nickname)
//! ```
//!
//! `AND` binds tighter than `OR`, so the condition above groups as
//! `(c.country = @country AND c.age > @age) OR IS_DEFINED(c.nickname)`.
//! Parentheses override the grouping. A function call may be negated with
//! `NOT`, e.g. `NOT IS_STRING(c.id)`.
pub mod filter;
pub mod operators;
pub mod query;

pub use filter::FilterExpr;
pub use operators::CompareOp;
pub use query::{Query, Selection};
