use docsift::FunctionRegistry;
use docsift::cli::{
    CheckOptions, CliError, RunOptions, execute_check, execute_query, list_functions, parse_param,
};
use docsift::{QueryError, Value};

fn run(query: &str, input: &str, params: &[&str]) -> Result<String, CliError> {
    execute_query(&RunOptions {
        query: query.to_string(),
        input: Some(input.to_string()),
        params: params.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    })
}

#[test]
fn test_query_command() {
    let output = run(
        "SELECT c.id FROM c WHERE c.age > @age",
        r#"[{"id":"1","age":20},{"id":"2","age":25}]"#,
        &["age=20"],
    )
    .unwrap();

    assert_eq!(output, r#"[{"id":"2"}]"#);
}

#[test]
fn test_query_command_single_document_input() {
    let output = run(
        "SELECT * FROM c WHERE c.name = @name",
        r#"{"name":"John","age":30}"#,
        &["@name=John"],
    )
    .unwrap();

    assert_eq!(output, r#"[{"name":"John","age":30}]"#);
}

#[test]
fn test_query_command_preserves_field_order_and_normalizes_decimals() {
    let output = run(
        "SELECT * FROM c WHERE c.price >= @min",
        r#"[{"zeta":1,"price":2.50,"alpha":"x"}]"#,
        &["min=2.5"],
    )
    .unwrap();

    assert_eq!(output, r#"[{"zeta":1,"price":2.5,"alpha":"x"}]"#);
}

#[test]
fn test_query_command_plain_date_param() {
    let output = run(
        "SELECT c.id FROM c WHERE c.created = @created",
        r#"[{"id":"1","created":"2024-01-01T00:00:00Z"},{"id":"2","created":"2024-06-01T00:00:00Z"}]"#,
        &["created=2024-01-01T00:00:00Z"],
    )
    .unwrap();

    assert_eq!(output, r#"[{"id":"1"}]"#);
}

#[test]
fn test_query_command_round_trips_documents() {
    let input = r#"[{"id":"1","created":"2024-01-01T00:00:00.000Z","big":1e30}]"#;
    let output = run("SELECT * FROM c WHERE c.id = @id", input, &["id=\"1\""]).unwrap();

    assert_eq!(output, input);
}

#[test]
fn test_query_command_pretty() {
    let output = execute_query(&RunOptions {
        query: "SELECT c.id FROM c WHERE IS_DEFINED(c.id)".into(),
        input: Some(r#"[{"id":"1"}]"#.into()),
        pretty: true,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(output, "[\n  {\n    \"id\": \"1\"\n  }\n]");
}

#[test]
fn test_query_command_errors() {
    assert!(matches!(
        execute_query(&RunOptions {
            query: "SELECT * FROM c WHERE c.id = @id".into(),
            ..Default::default()
        }),
        Err(CliError::NoInput)
    ));
    assert!(matches!(
        run("SELECT * FROM c WHERE c.id = @id", "[1, 2]", &[]),
        Err(CliError::InvalidDocuments)
    ));
    assert!(matches!(
        run("SELECT * FROM c WHERE c.id = @id", "{not json", &[]),
        Err(CliError::Json(_))
    ));
    assert!(matches!(
        run("SELECT * FROM c", "[]", &[]),
        Err(CliError::Query(QueryError::MalformedQuery(_)))
    ));
    assert!(matches!(
        run("SELECT * FROM c WHERE c.id = @id", "[]", &["id"]),
        Err(CliError::InvalidParam(_))
    ));
}

#[test]
fn test_query_command_strict() {
    let result = execute_query(&RunOptions {
        query: "SELECT * FROM c WHERE c.id = @id".into(),
        input: Some("[]".into()),
        strict: true,
        ..Default::default()
    });

    assert!(matches!(
        result,
        Err(CliError::Query(QueryError::MissingParameter(name))) if name == "id"
    ));
}

#[test]
fn test_parse_param_values() {
    assert_eq!(parse_param("age=25").unwrap().1, Value::from(25));
    assert_eq!(parse_param("flag=true").unwrap().1, Value::from(true));
    assert_eq!(parse_param("code=\"25\"").unwrap().1, Value::from("25"));
    assert_eq!(parse_param("name=John Doe").unwrap().1, Value::from("John Doe"));
    assert_eq!(parse_param("expr=a=b").unwrap().1, Value::from("a=b"));
    assert_eq!(parse_param("empty=").unwrap().1, Value::from(""));
    assert!(matches!(
        parse_param("since=\"2024-01-01T00:00:00Z\"").unwrap().1,
        Value::Date(_)
    ));
}

#[test]
fn test_parse_param_rejects_missing_name() {
    for raw in ["=1", "@=1", "  =1", "noequals"] {
        assert!(matches!(parse_param(raw), Err(CliError::InvalidParam(_))), "{raw}");
    }
}

#[test]
fn test_check_command() {
    let result = execute_check(&CheckOptions {
        query: "SELECT c.id, c.name FROM c WHERE c.a = @a AND c.b = @b OR NOT IS_DEFINED(c.x)"
            .into(),
        strict: false,
    })
    .unwrap();

    assert_eq!(
        result.describe(),
        "select: id, name\nfilter: ((c.a = @a AND c.b = @b) OR NOT IS_DEFINED(c.x))"
    );
}

#[test]
fn test_check_command_strict() {
    let result = execute_check(&CheckOptions {
        query: "SELECT * FROM c WHERE c.name LIKE @name".into(),
        strict: true,
    });

    assert!(matches!(
        result,
        Err(CliError::Query(QueryError::UnrecognizedCondition(_)))
    ));
}

#[test]
fn test_list_functions() {
    let listing = list_functions(&FunctionRegistry::default());

    assert!(listing.starts_with("IS_ARRAY(c.property)\n"));
    assert!(listing.contains("IS_DEFINED(c.property)\n"));
    assert!(listing.contains("IS_STRING(c.property)\n"));
    assert_eq!(listing.lines().count(), 8);
}
