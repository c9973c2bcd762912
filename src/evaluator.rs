use std::sync::Arc;

use tracing::trace;

use crate::{
    ast::{CompareOp, FilterExpr},
    error::{QueryError, QueryResult},
    functions::{FunctionRegistry, Predicate},
    params::Parameters,
    value::{Document, Value},
};

/// Compare a document field against a bound parameter.
///
/// Coercion rules, applied in order:
///
/// 1. A missing or null operand on either side never matches.
/// 2. When either side is a date and the other is a date or an ISO-8601
///    string, the two instants are compared.
/// 3. When both sides read as decimal numbers (numbers, or numeric strings),
///    they compare numerically. A number outside the decimal range compares
///    as a double.
/// 4. Otherwise only `=` and `!=`/`<>` apply, to the textual forms of both
///    sides; ordering operators do not match.
///
/// # Examples
/// ```
/// use docsift::{ast::CompareOp, evaluator::compare, Value};
///
/// let age = Value::from(25);
/// assert!(compare(Some(&age), Some(&Value::from(20)), CompareOp::GreaterThan));
/// assert!(compare(Some(&age), Some(&Value::from("25")), CompareOp::Equal));
/// assert!(!compare(None, Some(&Value::from(25)), CompareOp::NotEqual));
/// ```
pub fn compare(field: Option<&Value>, param: Option<&Value>, op: CompareOp) -> bool {
    let (Some(field), Some(param)) = (field, param) else {
        return false;
    };
    if field.is_null() || param.is_null() {
        return false;
    }

    if (matches!(field, Value::Date(_)) || matches!(param, Value::Date(_)))
        && let (Some(field_date), Some(param_date)) = (field.as_date(), param.as_date())
    {
        return op.holds(&field_date, &param_date);
    }

    if let (Some(field_num), Some(param_num)) = (field.as_decimal(), param.as_decimal()) {
        return op.holds(&field_num, &param_num);
    }

    if (matches!(field, Value::Float(_)) || matches!(param, Value::Float(_)))
        && let (Some(field_num), Some(param_num)) = (field.as_f64(), param.as_f64())
    {
        return op.holds(&field_num, &param_num);
    }

    if op.is_equality() {
        op.holds(field.as_text().as_str(), param.as_text().as_str())
    } else {
        false
    }
}

/// Turns a [`FilterExpr`] into a [`Predicate`] closure.
///
/// Parameters are resolved once, at compile time, so the resulting predicate
/// only reads documents. An unbound parameter, an unknown function or an
/// unrecognized leaf compiles to a predicate that is always false, unless
/// strict mode is on, in which case compilation fails instead.
pub struct Evaluator<'a> {
    registry: &'a FunctionRegistry,
    parameters: &'a Parameters,
    strict: bool,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a FunctionRegistry, parameters: &'a Parameters) -> Self {
        Evaluator {
            registry,
            parameters,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Compile a filter tree into a document predicate.
    ///
    /// # Examples
    /// ```
    /// use docsift::{Document, FunctionRegistry, Parameters, Value};
    /// use docsift::{evaluator::Evaluator, parser::Parser};
    ///
    /// let registry = FunctionRegistry::default();
    /// let filter = Parser::new(&registry).parse_filter("c.age > @age").unwrap();
    /// let params = Parameters::new().with("age", 20);
    ///
    /// let predicate = Evaluator::new(&registry, &params).compile(&filter).unwrap();
    /// let doc: Document = [("age", Value::from(25))].into_iter().collect();
    /// assert!(predicate(&doc));
    /// ```
    pub fn compile(&self, expr: &FilterExpr) -> QueryResult<Predicate> {
        match expr {
            FilterExpr::And(left, right) => {
                let left = self.compile(left)?;
                let right = self.compile(right)?;
                Ok(Arc::new(move |doc: &Document| left(doc) && right(doc)))
            }
            FilterExpr::Or(left, right) => {
                let left = self.compile(left)?;
                let right = self.compile(right)?;
                Ok(Arc::new(move |doc: &Document| left(doc) || right(doc)))
            }
            FilterExpr::Comparison {
                property,
                operator,
                parameter,
            } => self.compile_comparison(property, *operator, parameter),
            FilterExpr::FunctionCall {
                function,
                property,
                negated,
            } => match self.registry.build(function, property) {
                Some(predicate) if *negated => Ok(Arc::new(move |doc: &Document| !predicate(doc))),
                Some(predicate) => Ok(predicate),
                None => self.soft_failure(QueryError::UnrecognizedCondition(expr.to_string())),
            },
            FilterExpr::Unrecognized(text) => {
                self.soft_failure(QueryError::UnrecognizedCondition(text.clone()))
            }
        }
    }

    fn compile_comparison(
        &self,
        property: &str,
        operator: Option<CompareOp>,
        parameter: &str,
    ) -> QueryResult<Predicate> {
        let Some(value) = self.parameters.get(parameter) else {
            return self.soft_failure(QueryError::MissingParameter(parameter.to_string()));
        };
        let Some(op) = operator else {
            return self.soft_failure(QueryError::UnrecognizedCondition(format!(
                "c.{property} @{parameter}"
            )));
        };

        let property = property.to_string();
        let value = value.clone();
        Ok(Arc::new(move |doc: &Document| compare(doc.get(&property), Some(&value), op)))
    }

    /// Lenient mode: log and match nothing. Strict mode: fail.
    fn soft_failure(&self, err: QueryError) -> QueryResult<Predicate> {
        if self.strict {
            return Err(err);
        }
        trace!(reason = %err, "condition compiled to constant false");
        Ok(never())
    }
}

/// A predicate that rejects every document.
pub fn never() -> Predicate {
    Arc::new(|_: &Document| false)
}
