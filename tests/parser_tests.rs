// tests/parser_tests.rs

use docsift::ast::{CompareOp, FilterExpr, Selection};
use docsift::parser::{Parser, split_top_level};
use docsift::{FunctionRegistry, QueryError};

fn parse(filter: &str) -> FilterExpr {
    let registry = FunctionRegistry::default();
    Parser::new(&registry).parse_filter(filter).unwrap()
}

fn cmp(property: &str, op: CompareOp, parameter: &str) -> FilterExpr {
    FilterExpr::Comparison {
        property: property.to_string(),
        operator: Some(op),
        parameter: parameter.to_string(),
    }
}

// ============================================================================
// Leaf conditions
// ============================================================================

#[test]
fn test_comparison_leaf() {
    assert_eq!(parse("c.age > @age"), cmp("age", CompareOp::GreaterThan, "age"));
}

#[test]
fn test_all_operators() {
    let cases = [
        ("=", CompareOp::Equal),
        ("!=", CompareOp::NotEqual),
        ("<>", CompareOp::NotEqual),
        (">", CompareOp::GreaterThan),
        (">=", CompareOp::GreaterEqual),
        ("<", CompareOp::LessThan),
        ("<=", CompareOp::LessEqual),
    ];

    for (symbol, op) in cases {
        assert_eq!(parse(&format!("c.x {symbol} @x")), cmp("x", op, "x"), "{symbol}");
        assert_eq!(parse(&format!("c.x{symbol}@x")), cmp("x", op, "x"), "{symbol} without spaces");
    }
}

#[test]
fn test_comparison_without_operator_parses() {
    assert_eq!(
        parse("c.name @name"),
        FilterExpr::Comparison {
            property: "name".into(),
            operator: None,
            parameter: "name".into(),
        }
    );
}

#[test]
fn test_function_call() {
    assert_eq!(
        parse("IS_DEFINED(c.nickname)"),
        FilterExpr::FunctionCall {
            function: "IS_DEFINED".into(),
            property: "nickname".into(),
            negated: false,
        }
    );
}

#[test]
fn test_negated_function_call_is_case_insensitive() {
    assert_eq!(
        parse("NOT is_string(c.id)"),
        FilterExpr::FunctionCall {
            function: "IS_STRING".into(),
            property: "id".into(),
            negated: true,
        }
    );
}

#[test]
fn test_unknown_function_is_unrecognized() {
    assert_eq!(
        parse("LOWER(c.name)"),
        FilterExpr::Unrecognized("LOWER(c.name)".into())
    );
}

#[test]
fn test_garbage_is_unrecognized() {
    assert!(matches!(parse("c.name LIKE 'J%'"), FilterExpr::Unrecognized(_)));
    assert!(matches!(parse("c.name = 'John'"), FilterExpr::Unrecognized(_)));
}

#[test]
fn test_lowercase_combinators_are_not_split() {
    // Only the upper-case, space-padded words act as delimiters.
    assert!(matches!(
        parse("c.a = @a and c.b = @b"),
        FilterExpr::Unrecognized(_)
    ));
}

// ============================================================================
// Precedence and grouping
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    let a = cmp("a", CompareOp::Equal, "a");
    let b = cmp("b", CompareOp::Equal, "b");
    let c = cmp("c", CompareOp::Equal, "c");

    assert_eq!(
        parse("c.a = @a AND c.b = @b OR c.c = @c"),
        FilterExpr::or(FilterExpr::and(a.clone(), b.clone()), c.clone())
    );
    assert_eq!(
        parse("c.a = @a OR c.b = @b AND c.c = @c"),
        FilterExpr::or(a, FilterExpr::and(b, c))
    );
}

#[test]
fn test_parentheses_override_precedence() {
    let a = cmp("a", CompareOp::Equal, "a");
    let b = cmp("b", CompareOp::Equal, "b");
    let c = cmp("c", CompareOp::Equal, "c");

    assert_eq!(
        parse("c.a = @a AND (c.b = @b OR c.c = @c)"),
        FilterExpr::and(a, FilterExpr::or(b, c))
    );
}

#[test]
fn test_combinators_nest_left() {
    let a = cmp("a", CompareOp::Equal, "a");
    let b = cmp("b", CompareOp::Equal, "b");
    let c = cmp("c", CompareOp::Equal, "c");

    assert_eq!(
        parse("c.a = @a AND c.b = @b AND c.c = @c"),
        FilterExpr::and(FilterExpr::and(a, b), c)
    );
}

#[test]
fn test_redundant_parentheses() {
    assert_eq!(parse("((c.a = @a))"), cmp("a", CompareOp::Equal, "a"));
}

#[test]
fn test_parenthesized_groups_on_both_sides() {
    let expr = parse("(c.a = @a OR c.b = @b) AND (c.c = @c OR IS_DEFINED(c.d))");
    match expr {
        FilterExpr::And(left, right) => {
            assert!(matches!(*left, FilterExpr::Or(..)));
            assert!(matches!(*right, FilterExpr::Or(..)));
        }
        other => panic!("Expected AND at the root, got {other:?}"),
    }
}

#[test]
fn test_single_leaf_has_no_combinator() {
    assert!(matches!(parse("c.a = @a"), FilterExpr::Comparison { .. }));
}

#[test]
fn test_parameters_in_source_order() {
    let expr = parse("c.a = @first OR (c.b > @second AND NOT IS_NULL(c.x))");
    assert_eq!(expr.parameters(), vec!["first", "second"]);
}

// ============================================================================
// Splitting
// ============================================================================

#[test]
fn test_split_ignores_nested_delimiters() {
    assert_eq!(
        split_top_level("a OR (b OR c) OR d", " OR "),
        vec!["a", "(b OR c)", "d"]
    );
    assert_eq!(split_top_level("a", " OR "), vec!["a"]);
}

// ============================================================================
// Whole queries and strict mode
// ============================================================================

#[test]
fn test_parse_query() {
    let registry = FunctionRegistry::default();
    let query = Parser::new(&registry)
        .parse_query("SELECT c.id, c.name FROM c WHERE c.country = @country")
        .unwrap();

    assert_eq!(
        query.selection,
        Selection::Fields(vec!["id".into(), "name".into()])
    );
    assert_eq!(query.filter, cmp("country", CompareOp::Equal, "country"));
}

#[test]
fn test_strict_mode_rejects_unrecognized_leaf() {
    let registry = FunctionRegistry::default();
    let err = Parser::new(&registry)
        .strict(true)
        .parse_filter("c.a = @a AND LOWER(c.name)")
        .unwrap_err();

    assert_eq!(err, QueryError::UnrecognizedCondition("LOWER(c.name)".into()));
}

#[test]
fn test_strict_mode_rejects_missing_operator() {
    let registry = FunctionRegistry::default();
    let result = Parser::new(&registry).strict(true).parse_filter("c.a @a");
    assert!(matches!(result, Err(QueryError::UnrecognizedCondition(_))));
}

#[test]
fn test_malformed_query() {
    let registry = FunctionRegistry::default();
    let result = Parser::new(&registry).parse_query("SELECT * FROM c");
    assert!(matches!(result, Err(QueryError::MalformedQuery(_))));
}

#[test]
fn test_display_shows_grouping() {
    let expr = parse("c.a = @a AND c.b <> @b OR NOT IS_DEFINED(c.x)");
    assert_eq!(
        expr.to_string(),
        "((c.a = @a AND c.b != @b) OR NOT IS_DEFINED(c.x))"
    );
}
