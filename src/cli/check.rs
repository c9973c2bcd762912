//! Validate docsift queries without running them

use super::CliError;
use crate::{FunctionRegistry, Parser, Query, Selection};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query text
    pub query: String,
    /// Fail on unrecognized conditions
    pub strict: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub struct CheckResult {
    pub query: Query,
}

impl CheckResult {
    /// Human-readable summary: the select list and the grouped filter tree.
    pub fn describe(&self) -> String {
        let select = match &self.query.selection {
            Selection::All => "*".to_string(),
            Selection::Fields(fields) => fields.join(", "),
        };
        format!("select: {select}\nfilter: {}", self.query.filter)
    }
}

/// Parse a query and report its structure
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let registry = FunctionRegistry::default();
    let query = Parser::new(&registry)
        .strict(options.strict)
        .parse_query(&options.query)?;
    Ok(CheckResult { query })
}
