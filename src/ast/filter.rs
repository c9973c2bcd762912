use std::fmt;

use crate::ast::CompareOp;

/// Filter tree parsed from the `WHERE` clause.
///
/// Built once per query text and never mutated afterwards. Combinators are
/// binary and nest to the left in source order: `a AND b AND c` is
/// `And(And(a, b), c)`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Both sides must hold (`AND`)
    And(Box<FilterExpr>, Box<FilterExpr>),

    /// Either side must hold (`OR`)
    Or(Box<FilterExpr>, Box<FilterExpr>),

    /// Property compared against a bound parameter
    ///
    /// # Example
    /// ```text
    /// c.age >= @age
    /// ```
    ///
    /// `operator` is `None` when the source omits it (`c.age @age`); such a
    /// comparison parses but never matches.
    Comparison {
        property: String,
        operator: Option<CompareOp>,
        parameter: String,
    },

    /// Registered unary function applied to a property
    ///
    /// # Example
    /// ```text
    /// NOT IS_DEFINED(c.deletedAt)
    /// ```
    FunctionCall {
        function: String,
        property: String,
        negated: bool,
    },

    /// A leaf matching no known shape. Never matches any document.
    Unrecognized(String),
}

impl FilterExpr {
    pub fn and(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::Or(Box::new(left), Box::new(right))
    }

    /// Names of all parameters referenced by comparisons, in source order.
    pub fn parameters(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_parameters(&mut names);
        names
    }

    fn collect_parameters<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            FilterExpr::And(left, right) | FilterExpr::Or(left, right) => {
                left.collect_parameters(names);
                right.collect_parameters(names);
            }
            FilterExpr::Comparison { parameter, .. } => names.push(parameter),
            FilterExpr::FunctionCall { .. } | FilterExpr::Unrecognized(_) => {}
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpr::And(left, right) => write!(f, "({left} AND {right})"),
            FilterExpr::Or(left, right) => write!(f, "({left} OR {right})"),
            FilterExpr::Comparison {
                property,
                operator: Some(op),
                parameter,
            } => write!(f, "c.{property} {op} @{parameter}"),
            FilterExpr::Comparison {
                property,
                operator: None,
                parameter,
            } => write!(f, "c.{property} @{parameter}"),
            FilterExpr::FunctionCall {
                function,
                property,
                negated,
            } => {
                if *negated {
                    f.write_str("NOT ")?;
                }
                write!(f, "{function}(c.{property})")
            }
            FilterExpr::Unrecognized(text) => write!(f, "<unrecognized: {text}>"),
        }
    }
}
