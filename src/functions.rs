//! Named unary functions usable as leaf conditions, e.g. `IS_DEFINED(c.name)`.
//!
//! The registry maps an upper-cased function name to a builder. Given the
//! property a call refers to, a builder returns a [`Predicate`] over whole
//! documents. New functions only need a [`FunctionRegistry::register`] call.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::value::{Document, Value};

/// A boolean test over one document.
pub type Predicate = Arc<dyn Fn(&Document) -> bool + Send + Sync>;

/// Builds a [`Predicate`] for the property named in a function call.
pub type FunctionBuilder = Arc<dyn Fn(&str) -> Predicate + Send + Sync>;

/// Built-in type checks, applied to the value found under the property
/// (`None` when the document has no such field).
const BUILTINS: &[(&str, fn(Option<&Value>) -> bool)] = &[
    ("IS_DEFINED", is_defined),
    ("IS_STRING", is_string),
    ("IS_NUMBER", is_number),
    ("IS_BOOL", is_bool),
    ("IS_NULL", is_null),
    ("IS_ARRAY", is_array),
    ("IS_OBJECT", is_object),
    ("IS_PRIMITIVE", is_primitive),
];

/// The field exists and holds something other than null.
fn is_defined(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// Dates are strings in the source JSON.
fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_) | Value::Date(_)))
}

fn is_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(_) | Value::Float(_)))
}

fn is_bool(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Boolean(_)))
}

/// Present with an explicit null; a missing field is not null.
fn is_null(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Null))
}

fn is_array(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Array(_)))
}

fn is_object(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Object(_)))
}

fn is_primitive(value: Option<&Value>) -> bool {
    matches!(
        value,
        Some(
            Value::Null
                | Value::Boolean(_)
                | Value::Number(_)
                | Value::Float(_)
                | Value::String(_)
                | Value::Date(_)
        )
    )
}

/// Table of functions recognized in leaf conditions.
///
/// Names are matched case-insensitively. [`FunctionRegistry::default`]
/// contains the built-ins; [`FunctionRegistry::empty`] contains nothing.
///
/// # Examples
///
/// ```
/// use docsift::{Document, FunctionRegistry, Value};
///
/// let mut registry = FunctionRegistry::default();
/// registry.register_field_check("IS_POSITIVE", |v| {
///     v.and_then(Value::as_decimal).is_some_and(|n| n.is_sign_positive() && !n.is_zero())
/// });
///
/// let doc: Document = [("stock", Value::from(3))].into_iter().collect();
/// let check = registry.build("is_positive", "stock").unwrap();
/// assert!(check(&doc));
/// ```
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionBuilder>,
}

impl FunctionRegistry {
    /// A registry with no functions at all.
    pub fn empty() -> Self {
        FunctionRegistry {
            functions: HashMap::new(),
        }
    }

    /// Register (or replace) a function under `name`.
    pub fn register<F>(&mut self, name: &str, builder: F)
    where
        F: Fn(&str) -> Predicate + Send + Sync + 'static,
    {
        self.functions
            .insert(name.to_ascii_uppercase(), Arc::new(builder));
    }

    /// Register a function that only inspects the value under its property.
    pub fn register_field_check<F>(&mut self, name: &str, check: F)
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        let check = Arc::new(check);
        self.register(name, move |property: &str| -> Predicate {
            let property = property.to_string();
            let check = Arc::clone(&check);
            Arc::new(move |doc: &Document| check(doc.get(&property)))
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_ascii_uppercase())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionBuilder> {
        self.functions.get(&name.to_ascii_uppercase())
    }

    /// Build the predicate for `name(property)`, if `name` is registered.
    pub fn build(&self, name: &str, property: &str) -> Option<Predicate> {
        self.get(name).map(|builder| builder(property))
    }

    /// Registered names, upper-cased and sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        let mut registry = FunctionRegistry::empty();
        for &(name, check) in BUILTINS {
            registry.register_field_check(name, check);
        }
        registry
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
