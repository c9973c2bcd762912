use crate::{path, value::Value};

/// Ordered parameter bindings referenced from queries as `@name`.
///
/// Names may be given with or without the `@` sigil. Lookup is exact and
/// case-sensitive; when a name is bound twice the first binding wins.
///
/// # Examples
/// ```
/// use docsift::{Parameters, Value};
///
/// let params = Parameters::new().with("@name", "John").with("age", 25);
/// assert_eq!(params.get("name"), Some(&Value::from("John")));
/// assert_eq!(params.get("@age"), Some(&Value::from(25)));
/// assert_eq!(params.get("country"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    bindings: Vec<(String, Value)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Parameters::push`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.push((name.into(), value.into()));
    }

    /// Resolve a parameter reference. `None` means unbound, which is distinct
    /// from a binding to [`Value::Null`].
    pub fn get(&self, name: &str) -> Option<&Value> {
        let name = path::parameter_name(name);
        self.bindings
            .iter()
            .find(|(bound, _)| path::parameter_name(bound) == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}
