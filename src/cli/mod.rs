//! CLI support for docsift
//!
//! Programmatic access to the `docsift` binary's commands, so other tools can
//! run queries over JSON input without shelling out.

mod check;
mod query;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use query::{RunOptions, execute_query, parse_param};

use std::io;

use thiserror::Error;

use crate::{FunctionRegistry, QueryError};

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Input must be a JSON object or an array of objects")]
    InvalidDocuments,

    #[error("Invalid parameter {0:?}: expected name=value")]
    InvalidParam(String),
}

/// Names of the functions usable in `WHERE` clauses, one per line.
pub fn list_functions(registry: &FunctionRegistry) -> String {
    registry
        .names()
        .into_iter()
        .map(|name| format!("{name}(c.property)\n"))
        .collect()
}
