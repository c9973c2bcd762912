//! Run docsift queries against JSON input

use super::CliError;
use crate::{
    Parameters, QueryEngine, QueryOptions, convert::json_to_documents, convert::json_to_value,
    output,
};

/// Options for the query command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The query text
    pub query: String,
    /// JSON input: an array of documents or a single document
    pub input: Option<String>,
    /// Raw `name=value` parameter bindings
    pub params: Vec<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Fail on unrecognized conditions and unbound parameters
    pub strict: bool,
}

/// Parse a `name=value` binding.
///
/// The value is read as JSON when it parses (`25`, `true`, `"25"`,
/// `"2024-01-01T00:00:00Z"`), and as a plain string otherwise.
///
/// # Examples
/// ```
/// use docsift::{cli::parse_param, Value};
///
/// assert_eq!(parse_param("age=25").unwrap(), ("age".to_string(), Value::from(25)));
/// assert_eq!(parse_param("@name=John").unwrap(), ("@name".to_string(), Value::from("John")));
/// assert!(parse_param("age").is_err());
/// ```
pub fn parse_param(raw: &str) -> Result<(String, crate::Value), CliError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidParam(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() || name == "@" {
        return Err(CliError::InvalidParam(raw.to_string()));
    }

    let value = match serde_json::from_str::<serde_json::Value>(value) {
        Ok(json) => json_to_value(json),
        Err(_) => crate::Value::from(value),
    };
    Ok((name.to_string(), value))
}

/// Execute a query over JSON input and render the result as JSON
pub fn execute_query(options: &RunOptions) -> Result<String, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    let documents = json_to_documents(json_value).ok_or(CliError::InvalidDocuments)?;

    let params = options
        .params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<Result<Parameters, CliError>>()?;

    let engine = QueryEngine::with_options(QueryOptions::default().strict(options.strict));
    let results = engine.apply_filter(&documents, &options.query, &params)?;

    Ok(if options.pretty {
        output::to_json_pretty(&results)
    } else {
        output::to_json(&results)
    })
}
