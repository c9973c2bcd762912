//! # docsift
//!
//! An in-memory document query engine. Give it documents and a query such as
//!
//! ```text
//! SELECT c.id, c.name FROM c WHERE c.country = @country AND c.age >= @age
//! ```
//!
//! together with parameter bindings, and it returns the matching documents
//! projected onto the selected fields. It exists so that test code can
//! exercise realistic filter/select behavior without a database.
//!
//! Pipeline: [`splitter`] extracts the select list and the `WHERE` clause,
//! [`parser`] builds a [`FilterExpr`] tree, [`evaluator`] compiles it into a
//! predicate with parameters bound, and [`projection`] shapes the survivors.
//! [`QueryEngine`] ties these together and caches compiled queries; [`Store`]
//! offers container-style plumbing on top.

pub mod ast;
pub mod cli;
pub mod convert;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod output;
pub mod params;
pub mod parser;
pub mod path;
pub mod projection;
pub mod splitter;
pub mod store;
pub mod value;

pub use ast::{CompareOp, FilterExpr, Query, Selection};
pub use engine::{QueryEngine, QueryOptions, apply_filter};
pub use error::{QueryError, QueryResult, StoreError, StoreResult};
pub use functions::{FunctionRegistry, Predicate};
pub use output::{to_json, to_json_pretty};
pub use params::Parameters;
pub use parser::Parser;
pub use store::{Container, FeedIterator, PatchOperation, Store};
pub use value::{DateValue, Document, Value};
