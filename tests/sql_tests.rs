// tests/sql_tests.rs

use serde_json::{Value, json};
use sift_lang::ast::{Expr, NullCondition, NumberCondition, NumberOp};
use sift_lang::{CompileError, Filtering, SqlCompiler, SqlDialect, parse, to_sql};

fn compile(input: &str) -> (String, Vec<Value>) {
    to_sql(&parse(input).unwrap()).unwrap()
}

// ============================================================================
// Conditions
// ============================================================================

#[test]
fn test_empty_filter() {
    assert_eq!(compile(""), (String::new(), vec![]));
    assert_eq!(to_sql(&Filtering::empty()).unwrap(), (String::new(), vec![]));
}

#[test]
fn test_number_condition() {
    assert_eq!(compile("age > 30"), ("(age > ?)".to_string(), vec![json!(30)]));
}

#[test]
fn test_number_operators() {
    let test_cases = vec![
        ("x == 1", "(x = ?)"),
        ("x != 1", "NOT(x = ?)"),
        ("x > 1", "(x > ?)"),
        ("x >= 1", "(x >= ?)"),
        ("x < 1", "(x < ?)"),
        ("x <= 1", "(x <= ?)"),
        ("not x <= 1", "NOT(x <= ?)"),
    ];

    for (input, expected) in test_cases {
        let (sql, args) = compile(input);
        assert_eq!(sql, expected, "Failed for input: {}", input);
        assert_eq!(args, vec![json!(1)], "Failed for input: {}", input);
    }
}

#[test]
fn test_number_argument_kinds() {
    let test_cases = vec![
        ("age > 30", json!(30)),
        ("age > 0", json!(0)),
        ("score >= 7.5", json!(7.5)),
        ("score < 0.25", json!(0.25)),
        ("big == 10000000000000000000", json!(1e19)),
    ];

    for (input, expected) in test_cases {
        let (_, args) = compile(input);
        assert_eq!(args, vec![expected], "Failed for input: {}", input);
    }
    assert!(compile("age > 30").1[0].is_i64());
    assert!(compile("score >= 7.5").1[0].is_f64());
}

#[test]
fn test_string_conditions() {
    assert_eq!(compile("name == 'Bob'"), ("(name = ?)".to_string(), vec![json!("Bob")]));
    assert_eq!(compile("name != 'Bob'"), ("NOT(name = ?)".to_string(), vec![json!("Bob")]));
    assert_eq!(compile("name ~ '^B'"), ("(name ~ ?)".to_string(), vec![json!("^B")]));
    assert_eq!(compile("name !~ '^B'"), ("NOT(name ~ ?)".to_string(), vec![json!("^B")]));
}

#[test]
fn test_values_never_inlined() {
    let (sql, args) = compile("name == 'x; DROP TABLE users; --'");
    assert_eq!(sql, "(name = ?)");
    assert_eq!(args, vec![json!("x; DROP TABLE users; --")]);
}

#[test]
fn test_null_conditions_take_no_arguments() {
    assert_eq!(
        compile("(a == null) or (b != null)"),
        ("((a IS NULL) OR NOT(b IS NULL))".to_string(), vec![])
    );
}

#[test]
fn test_dotted_field_path() {
    assert_eq!(
        compile("address.city == 'Springfield'"),
        ("(address.city = ?)".to_string(), vec![json!("Springfield")])
    );
}

// ============================================================================
// Logical operators
// ============================================================================

#[test]
fn test_arguments_follow_placeholder_order() {
    let (sql, args) = compile("a == 1 or b == 'two' and c > 3");
    assert_eq!(sql, "((a = ?) OR ((b = ?) AND (c > ?)))");
    assert_eq!(args, vec![json!(1), json!("two"), json!(3)]);
}

#[test]
fn test_negated_group() {
    let (sql, args) = compile("not (a == 1 and b == null)");
    assert_eq!(sql, "NOT((a = ?) AND (b IS NULL))");
    assert_eq!(args, vec![json!(1)]);
}

#[test]
fn test_left_associative_nesting() {
    let (sql, _) = compile("a == 1 and b == 2 and c == 3");
    assert_eq!(sql, "(((a = ?) AND (b = ?)) AND (c = ?))");
}

// ============================================================================
// Dialects
// ============================================================================

#[test]
fn test_match_operator_per_dialect() {
    let filtering = parse("name ~ '^B'").unwrap();
    let test_cases = vec![
        (SqlDialect::Postgres, "(name ~ ?)"),
        (SqlDialect::MySql, "(name REGEXP ?)"),
        (SqlDialect::Sqlite, "(name REGEXP ?)"),
    ];

    for (dialect, expected) in test_cases {
        let (sql, _) = SqlCompiler::new(dialect).compile(&filtering).unwrap();
        assert_eq!(sql, expected, "Failed for dialect: {}", dialect);
    }
}

#[test]
fn test_ansi_dialect_rejects_match() {
    let filtering = parse("age > 1 and name !~ '^B'").unwrap();
    assert_eq!(
        SqlCompiler::new(SqlDialect::Ansi).compile(&filtering),
        Err(CompileError::UnsupportedOperator {
            dialect: SqlDialect::Ansi,
            op: "~".to_string()
        })
    );

    let filtering = parse("age > 1 and name == 'Bob'").unwrap();
    assert!(SqlCompiler::new(SqlDialect::Ansi).compile(&filtering).is_ok());
}

#[test]
fn test_dialect_names() {
    assert_eq!(SqlDialect::from_name("PostgreSQL"), Some(SqlDialect::Postgres));
    assert_eq!(SqlDialect::from_name("mariadb"), Some(SqlDialect::MySql));
    assert_eq!(SqlDialect::from_name("sqlite"), Some(SqlDialect::Sqlite));
    assert_eq!(SqlDialect::from_name("ansi"), Some(SqlDialect::Ansi));
    assert_eq!(SqlDialect::from_name("oracle"), None);
}

// ============================================================================
// Hand-built trees
// ============================================================================

#[test]
fn test_empty_field_path_is_rejected() {
    let filtering = Filtering::new(Expr::Null(NullCondition {
        field_path: vec![],
        is_negative: false,
    }));
    assert_eq!(
        to_sql(&filtering),
        Err(CompileError::InvalidNode("null condition with empty field path".to_string()))
    );
}

#[test]
fn test_non_finite_number_is_rejected() {
    let filtering = Filtering::new(Expr::Number(NumberCondition {
        field_path: vec!["x".to_string()],
        value: f64::INFINITY,
        op: NumberOp::Gt,
        is_negative: false,
    }));
    assert!(matches!(to_sql(&filtering), Err(CompileError::InvalidNode(_))));
}
