use std::fmt;

/// Comparison operators allowed between a property and a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`)
    Equal,
    /// Not equal (`!=` or `<>`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl CompareOp {
    /// Map an operator symbol to its variant.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(CompareOp::Equal),
            "!=" | "<>" => Some(CompareOp::NotEqual),
            "<" => Some(CompareOp::LessThan),
            ">" => Some(CompareOp::GreaterThan),
            "<=" => Some(CompareOp::LessEqual),
            ">=" => Some(CompareOp::GreaterEqual),
            _ => None,
        }
    }

    /// Whether the operator only tests (in)equality rather than ordering
    pub fn is_equality(self) -> bool {
        matches!(self, CompareOp::Equal | CompareOp::NotEqual)
    }

    /// Apply the operator to two ordered operands.
    pub fn holds<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            CompareOp::Equal => left == right,
            CompareOp::NotEqual => left != right,
            CompareOp::LessThan => left < right,
            CompareOp::GreaterThan => left > right,
            CompareOp::LessEqual => left <= right,
            CompareOp::GreaterEqual => left >= right,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
            CompareOp::LessThan => "<",
            CompareOp::GreaterThan => ">",
            CompareOp::LessEqual => "<=",
            CompareOp::GreaterEqual => ">=",
        };
        f.write_str(symbol)
    }
}
