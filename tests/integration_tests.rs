use serde_json::json;
use sift_lang::{
    EvalError, Evaluator, Filtering, Matcher, Record, Value, filter, filter_records, parse,
};
use std::collections::HashMap;

fn eval(filter_str: &str, record: &serde_json::Value) -> Result<bool, EvalError> {
    let filtering = parse(filter_str).unwrap();
    filter(&filtering, record)
}

fn person() -> serde_json::Value {
    json!({
        "name": "Bob",
        "age": 42,
        "score": 7.5,
        "city": "Springfield",
        "active": true,
        "deleted_at": null,
        "address": {"zip": "49007", "floor": 3},
        "tags": ["admin", "ops"]
    })
}

// ============================================================================
// Empty filter
// ============================================================================

#[test]
fn test_empty_filter_matches_everything() {
    let filtering = parse("").unwrap();
    assert!(filter(&filtering, &person()).unwrap());
    assert!(filter(&filtering, &json!(null)).unwrap());
    assert!(filter(&Filtering::empty(), &HashMap::<String, Value>::new()).unwrap());
}

// ============================================================================
// String conditions
// ============================================================================

#[test]
fn test_string_equality() {
    assert!(eval("name == 'Bob'", &person()).unwrap());
    assert!(!eval("name == 'bob'", &person()).unwrap());
    assert!(eval("name != 'Alice'", &person()).unwrap());
}

#[test]
fn test_match_is_unanchored_search() {
    assert!(eval("city ~ 'Spring.*'", &json!({"city": "Springfield"})).unwrap());
    assert!(eval("city ~ 'field'", &person()).unwrap());
    assert!(!eval("city ~ '^field'", &person()).unwrap());
    assert!(eval("city !~ '^field'", &person()).unwrap());
}

#[test]
fn test_invalid_regex_is_an_evaluation_error() {
    let filtering = parse("city ~ '[unclosed'").unwrap();
    let err = filter(&filtering, &person()).unwrap_err();
    match err {
        EvalError::InvalidRegex { pattern, .. } => assert_eq!(pattern, "[unclosed"),
        other => panic!("Expected InvalidRegex, got {:?}", other),
    }
}

#[test]
fn test_string_condition_on_number_field() {
    assert_eq!(
        eval("age == '42'", &person()),
        Err(EvalError::TypeMismatch {
            expected: "string",
            path: "age".to_string()
        })
    );
}

// ============================================================================
// Number conditions
// ============================================================================

#[test]
fn test_number_comparisons() {
    let record = person();
    assert!(eval("age > 30", &record).unwrap());
    assert!(eval("age >= 42", &record).unwrap());
    assert!(!eval("age < 42", &record).unwrap());
    assert!(eval("age <= 42", &record).unwrap());
    assert!(eval("age == 42", &record).unwrap());
    assert!(eval("age != 41", &record).unwrap());
    assert!(eval("score > 7.25", &record).unwrap());
    assert!(eval("score == 7.5", &record).unwrap());
}

#[test]
fn test_number_kinds_are_coerced() {
    let mut record = HashMap::new();
    record.insert("signed".to_string(), Value::Integer(-3));
    record.insert("unsigned".to_string(), Value::Unsigned(u64::MAX));
    record.insert("float".to_string(), Value::Float(0.5));

    let check = |f: &str| filter(&parse(f).unwrap(), &record).unwrap();
    assert!(check("signed < 0"));
    assert!(check("unsigned > 1000000"));
    assert!(check("float == 0.5"));
}

#[test]
fn test_number_condition_on_string_field() {
    assert_eq!(
        eval("name > 3", &person()),
        Err(EvalError::TypeMismatch {
            expected: "number",
            path: "name".to_string()
        })
    );
}

#[test]
fn test_number_condition_on_boolean_field() {
    assert!(matches!(
        eval("active == 1", &person()),
        Err(EvalError::TypeMismatch { expected: "number", .. })
    ));
}

#[test]
fn test_not_ordering_condition() {
    assert!(!eval("not age > 30", &person()).unwrap());
    assert!(eval("not age > 50", &person()).unwrap());
}

// ============================================================================
// Null conditions
// ============================================================================

#[test]
fn test_null_conditions_on_json() {
    let record = person();
    assert!(eval("deleted_at == null", &record).unwrap());
    assert!(!eval("deleted_at != null", &record).unwrap());
    assert!(!eval("name == null", &record).unwrap());
    assert!(eval("name != null", &record).unwrap());
}

#[test]
fn test_null_field_fails_value_conditions() {
    assert_eq!(
        eval("deleted_at == 'x'", &person()),
        Err(EvalError::TypeMismatch {
            expected: "string",
            path: "deleted_at".to_string()
        })
    );
}

#[test]
fn test_null_condition_requires_nullable_field() {
    let mut record = HashMap::new();
    record.insert("count".to_string(), Value::Integer(1));
    record.insert("nickname".to_string(), Value::from(None::<String>));
    record.insert("manager".to_string(), Value::from(Some("Alice")));

    let check = |f: &str| filter(&parse(f).unwrap(), &record);
    assert_eq!(
        check("count == null"),
        Err(EvalError::TypeMismatch {
            expected: "nullable",
            path: "count".to_string()
        })
    );
    assert_eq!(check("nickname == null"), Ok(true));
    assert_eq!(check("manager == null"), Ok(false));
    assert_eq!(check("manager == 'Alice'"), Ok(true));
}

// ============================================================================
// Field paths
// ============================================================================

#[test]
fn test_missing_field_is_type_mismatch() {
    assert_eq!(
        eval("nickname == 'B'", &person()),
        Err(EvalError::TypeMismatch {
            expected: "string",
            path: "nickname".to_string()
        })
    );
    assert!(matches!(
        eval("nickname == null", &person()),
        Err(EvalError::TypeMismatch { expected: "nullable", .. })
    ));
}

#[test]
fn test_nested_field_paths() {
    let record = person();
    assert!(eval("address.zip == '49007'", &record).unwrap());
    assert!(eval("address.floor >= 3", &record).unwrap());
    assert_eq!(
        eval("address.street == 'Main'", &record),
        Err(EvalError::TypeMismatch {
            expected: "string",
            path: "address.street".to_string()
        })
    );
}

// ============================================================================
// Logical operators
// ============================================================================

#[test]
fn test_and_or() {
    let record = person();
    assert!(eval("name == 'Bob' and age > 30", &record).unwrap());
    assert!(!eval("name == 'Bob' and age > 50", &record).unwrap());
    assert!(eval("name == 'Alice' or age > 30", &record).unwrap());
    assert!(!eval("name == 'Alice' or age > 50", &record).unwrap());
}

#[test]
fn test_precedence_in_evaluation() {
    // true or (false and false) => true
    assert!(eval("age == 42 or age == 1 and age == 2", &person()).unwrap());
    // (true or false) and false => false
    assert!(!eval("(age == 42 or age == 1) and age == 2", &person()).unwrap());
}

#[test]
fn test_negated_groups() {
    let record = person();
    assert!(!eval("not (name == 'Bob' and age > 30)", &record).unwrap());
    assert!(eval("not (name == 'Bob' and age > 50)", &record).unwrap());
    assert!(eval("not (name == 'Alice' or age > 50)", &record).unwrap());
}

#[test]
fn test_and_short_circuits() {
    // The right side would fail with a type mismatch if it were evaluated.
    assert_eq!(eval("age > 50 and name > 1", &person()), Ok(false));
    assert_eq!(eval("not (age > 50 and name > 1)", &person()), Ok(true));
}

#[test]
fn test_or_short_circuits() {
    assert_eq!(eval("age > 30 or name > 1", &person()), Ok(true));
    assert_eq!(eval("not (age > 30 or name > 1)", &person()), Ok(false));
}

#[test]
fn test_errors_on_evaluated_side_propagate() {
    assert!(eval("age > 30 and name > 1", &person()).is_err());
    assert!(eval("age > 50 or name > 1", &person()).is_err());
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_value_object_record() {
    let mut inner = HashMap::new();
    inner.insert("city".to_string(), Value::from("Springfield"));
    let mut fields = HashMap::new();
    fields.insert("address".to_string(), Value::Object(inner));
    let record = Value::Object(fields);

    assert!(filter(&parse("address.city ~ 'field$'").unwrap(), &record).unwrap());
}

struct Employee {
    name: String,
    salary: u32,
}

impl Record for Employee {
    fn lookup(&self, path: &[String]) -> Option<Value> {
        match path {
            [field] if field == "name" => Some(Value::from(self.name.as_str())),
            [field] if field == "salary" => Some(Value::Unsigned(self.salary.into())),
            _ => None,
        }
    }
}

#[test]
fn test_typed_record() {
    let employee = Employee {
        name: "Carol".to_string(),
        salary: 5000,
    };
    assert!(filter(&parse("name == 'Carol' and salary >= 5000").unwrap(), &employee).unwrap());
    assert!(filter(&parse("salary.amount > 1").unwrap(), &employee).is_err());
}

/// Matches when the filter text mentions the record's tag.
struct Tagged(&'static str);

impl Matcher for Tagged {
    fn matches(&self, filtering: &Filtering) -> Result<bool, EvalError> {
        if self.0.is_empty() {
            return Err(EvalError::UnsupportedOperator {
                kind: "tag".to_string(),
                op: filtering.to_string(),
            });
        }
        Ok(filtering.to_string().contains(self.0))
    }
}

impl Record for Tagged {
    fn lookup(&self, _path: &[String]) -> Option<Value> {
        None
    }

    fn as_matcher(&self) -> Option<&dyn Matcher> {
        Some(self)
    }
}

#[test]
fn test_custom_matcher_replaces_structural_evaluation() {
    let filtering = parse("team == 'ops'").unwrap();
    assert!(filter(&filtering, &Tagged("ops")).unwrap());
    assert!(!filter(&filtering, &Tagged("dev")).unwrap());
    assert!(matches!(
        filter(&filtering, &Tagged("")),
        Err(EvalError::UnsupportedOperator { .. })
    ));
}

#[test]
fn test_custom_matcher_not_consulted_for_empty_filter() {
    assert!(filter(&Filtering::empty(), &Tagged("")).unwrap());
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn test_filter_records_keeps_order() {
    let records = vec![
        json!({"name": "Ann", "age": 31}),
        json!({"name": "Ben", "age": 17}),
        json!({"name": "Cid", "age": 64}),
    ];
    let filtering = parse("age >= 18").unwrap();
    let matched = filter_records(&filtering, &records).unwrap();
    assert_eq!(matched, vec![&records[0], &records[2]]);
}

#[test]
fn test_filter_records_stops_on_error() {
    let records = vec![json!({"age": 31}), json!({"age": "unknown"})];
    let filtering = parse("age >= 18").unwrap();
    assert!(filter_records(&filtering, &records).is_err());
}

#[test]
fn test_evaluator_shared_across_threads() {
    let evaluator = Evaluator::new();
    let filtering = parse("name ~ '^B' and age > 18").unwrap();

    std::thread::scope(|scope| {
        for i in 0..4 {
            let evaluator = &evaluator;
            let filtering = &filtering;
            scope.spawn(move || {
                let record = json!({"name": "Bob", "age": 20 + i});
                assert!(evaluator.filter(filtering, &record).unwrap());
            });
        }
    });
}
