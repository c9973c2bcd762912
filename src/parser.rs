use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::{
    ast::{CompareOp, FilterExpr, Query},
    error::{QueryError, QueryResult},
    functions::FunctionRegistry,
    path,
    splitter::split_query,
};

const OR: &str = " OR ";
const AND: &str = " AND ";

/// `c.property <op> @param`, with the operator optional.
static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^c\.(\w+)\s*(<>|!=|<=|>=|=|<|>)?\s*@(\w+)$")
        .expect("comparison pattern is valid")
});

/// `[NOT ]NAME(property)`
static FUNCTION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(NOT\s+)?(\w+)\s*\(\s*([\w.]+)\s*\)$")
        .expect("function call pattern is valid")
});

/// Compiles query text into a [`Query`].
///
/// Precedence follows the grammar
///
/// ```text
/// Or   := And (" OR " And)*
/// And  := Leaf (" AND " Leaf)*
/// Leaf := "(" Or ")" | ["NOT "] FunctionCall | Comparison
/// ```
///
/// Delimiters are the literal, space-padded words `AND` / `OR`, and are only
/// recognized outside parentheses.
///
/// In the default lenient mode a leaf that matches no shape becomes
/// [`FilterExpr::Unrecognized`] and simply matches nothing. In strict mode it
/// is reported as [`QueryError::UnrecognizedCondition`].
pub struct Parser<'r> {
    registry: &'r FunctionRegistry,
    strict: bool,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Parser {
            registry,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a complete `SELECT ... FROM c WHERE ...` query
    pub fn parse_query(&self, text: &str) -> QueryResult<Query> {
        let parts = split_query(text)?;
        let filter = self.parse_filter(parts.filter)?;

        Ok(Query {
            selection: parts.selection(),
            filter,
        })
    }

    /// Parse a bare filter clause (the text after `WHERE`)
    pub fn parse_filter(&self, text: &str) -> QueryResult<FilterExpr> {
        self.parse_or(text)
    }

    fn parse_or(&self, text: &str) -> QueryResult<FilterExpr> {
        let mut parts = split_top_level(text, OR).into_iter();
        // split_top_level always yields at least one part
        let mut expr = self.parse_and(parts.next().unwrap_or(text))?;

        for part in parts {
            expr = FilterExpr::or(expr, self.parse_and(part)?);
        }
        Ok(expr)
    }

    fn parse_and(&self, text: &str) -> QueryResult<FilterExpr> {
        let mut parts = split_top_level(text, AND).into_iter();
        let mut expr = self.parse_leaf(parts.next().unwrap_or(text))?;

        for part in parts {
            expr = FilterExpr::and(expr, self.parse_leaf(part)?);
        }
        Ok(expr)
    }

    fn parse_leaf(&self, text: &str) -> QueryResult<FilterExpr> {
        let text = text.trim();

        if let Some(inner) = strip_outer_parens(text) {
            return self.parse_or(inner);
        }

        if let Some(expr) = self.parse_function_call(text) {
            return Ok(expr);
        }

        match parse_comparison(text) {
            Some(FilterExpr::Comparison { operator: None, .. }) if self.strict => {
                Err(QueryError::UnrecognizedCondition(text.to_string()))
            }
            Some(expr) => Ok(expr),
            None if self.strict => Err(QueryError::UnrecognizedCondition(text.to_string())),
            None => {
                trace!(condition = text, "unrecognized condition matches nothing");
                Ok(FilterExpr::Unrecognized(text.to_string()))
            }
        }
    }

    /// Recognize `[NOT ]NAME(c.property)` where NAME is registered.
    fn parse_function_call(&self, text: &str) -> Option<FilterExpr> {
        let caps = FUNCTION_CALL.captures(text)?;
        let function = &caps[2];

        if !self.registry.contains(function) {
            trace!(function, "unknown function");
            return None;
        }

        Some(FilterExpr::FunctionCall {
            function: function.to_ascii_uppercase(),
            property: path::property_name(&caps[3]).to_string(),
            negated: caps.get(1).is_some(),
        })
    }
}

fn parse_comparison(text: &str) -> Option<FilterExpr> {
    let caps = COMPARISON.captures(text)?;

    Some(FilterExpr::Comparison {
        property: caps[1].to_string(),
        operator: caps.get(2).and_then(|op| CompareOp::from_symbol(op.as_str())),
        parameter: caps[3].to_string(),
    })
}

/// Split `text` on `delimiter`, ignoring occurrences nested in parentheses.
///
/// Always returns at least one part.
///
/// # Examples
/// ```
/// use docsift::parser::split_top_level;
///
/// let parts = split_top_level("a AND (b AND c) AND d", " AND ");
/// assert_eq!(parts, vec!["a", "(b AND c)", "d"]);
/// ```
pub fn split_top_level<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    let bytes = text.as_bytes();
    let delim = delimiter.as_bytes();
    let mut parts = vec![];
    let mut depth = 0i32;
    let mut last_split = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }

        if depth == 0 && bytes[i..].starts_with(delim) {
            parts.push(&text[last_split..i]);
            i += delim.len();
            last_split = i;
        } else {
            i += 1;
        }
    }

    parts.push(&text[last_split..]);
    parts
}

/// Return the inside of `text` when a single pair of parentheses encloses all of it.
fn strip_outer_parens(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;

    let mut depth = 0i32;
    for b in inner.bytes() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                // "(a) AND (b)": the opening paren closes before the end
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    Some(inner)
}
