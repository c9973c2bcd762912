//! Property-name normalization shared by the comparator, the function
//! registry and the projector.
//!
//! Queries address fields through the source alias (`c.name`) while documents
//! store bare names (`name`). Every component resolves names through these two
//! helpers so that alias stripping and case folding behave the same everywhere.

/// The only source alias the query dialect accepts (`FROM c`).
pub const SOURCE_ALIAS: &str = "c";

/// Strip a leading `c.` alias prefix and surrounding whitespace.
///
/// # Examples
/// ```
/// use docsift::path::property_name;
///
/// assert_eq!(property_name("c.name"), "name");
/// assert_eq!(property_name(" C.Name "), "Name");
/// assert_eq!(property_name("name"), "name");
/// ```
pub fn property_name(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.split_once('.') {
        Some((alias, rest)) if alias.eq_ignore_ascii_case(SOURCE_ALIAS) && !rest.is_empty() => rest,
        _ => raw,
    }
}

/// Compare two field names the way document lookup does: ASCII case-insensitive.
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Strip the `@` sigil from a parameter reference.
pub fn parameter_name(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix('@').unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name_strips_alias_once() {
        assert_eq!(property_name("c.c.x"), "c.x");
        assert_eq!(property_name("c."), "c.");
        assert_eq!(property_name("doc.name"), "doc.name");
    }

    #[test]
    fn test_names_match_ignores_case() {
        assert!(names_match("Country", "country"));
        assert!(!names_match("country", "countries"));
    }

    #[test]
    fn test_parameter_name() {
        assert_eq!(parameter_name("@age"), "age");
        assert_eq!(parameter_name("age"), "age");
    }
}
