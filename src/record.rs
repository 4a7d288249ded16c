//! Record capabilities consumed by the evaluator.
//!
//! The evaluator never inspects a record's layout itself. A record exposes
//! its fields through [`Record::lookup`], and may take over evaluation
//! entirely by returning a [`Matcher`] from [`Record::as_matcher`].
//!
//! Implementations are provided for `serde_json::Value`, for
//! `HashMap<String, Value>` and for [`Value`] itself. All three resolve
//! every segment of a dotted field path through nested objects.

use std::collections::HashMap;

use crate::{ast::Filtering, evaluator::EvalError, value::Value};

/// A record that filters can be evaluated against.
pub trait Record {
    /// Resolves a field path to the field's current value.
    ///
    /// `path` always has at least one segment. Returns `None` when the
    /// record has no such field.
    fn lookup(&self, path: &[String]) -> Option<Value>;

    /// Custom match logic that replaces structural evaluation.
    fn as_matcher(&self) -> Option<&dyn Matcher> {
        None
    }
}

/// Custom match logic for a record type.
pub trait Matcher {
    fn matches(&self, filtering: &Filtering) -> Result<bool, EvalError>;
}

impl<R: Record + ?Sized> Record for &R {
    fn lookup(&self, path: &[String]) -> Option<Value> {
        (**self).lookup(path)
    }

    fn as_matcher(&self) -> Option<&dyn Matcher> {
        (**self).as_matcher()
    }
}

impl Record for HashMap<String, Value> {
    fn lookup(&self, path: &[String]) -> Option<Value> {
        let (first, rest) = path.split_first()?;
        walk(self.get(first)?, rest).cloned()
    }
}

impl Record for Value {
    fn lookup(&self, path: &[String]) -> Option<Value> {
        walk(self, path).cloned()
    }
}

fn walk<'a>(mut current: &'a Value, path: &[String]) -> Option<&'a Value> {
    for segment in path {
        current = current.deref_nullable()?.get(segment)?;
    }
    Some(current)
}

/// JSON documents: every member is nullable, `null` members are null.
impl Record for serde_json::Value {
    fn lookup(&self, path: &[String]) -> Option<Value> {
        let mut current = self;
        for segment in path {
            current = current.as_object()?.get(segment)?;
        }
        Some(match Value::from(current) {
            null @ Value::Nullable(None) => null,
            value => Value::some(value),
        })
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Unsigned(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(arr) => Value::Array(arr.iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(p: &str) -> Vec<String> {
        p.split('.').map(str::to_string).collect()
    }

    #[test]
    fn test_json_lookup_wraps_members_as_nullable() {
        let doc = json!({"name": "Bob", "age": 30, "deleted_at": null});
        assert_eq!(doc.lookup(&path("name")), Some(Value::some("Bob".into())));
        assert_eq!(doc.lookup(&path("age")), Some(Value::some(Value::Integer(30))));
        assert_eq!(doc.lookup(&path("deleted_at")), Some(Value::null()));
        assert_eq!(doc.lookup(&path("missing")), None);
    }

    #[test]
    fn test_json_lookup_walks_nested_objects() {
        let doc = json!({"parent": {"child": {"score": 1.5}}});
        assert_eq!(
            doc.lookup(&path("parent.child.score")),
            Some(Value::some(Value::Float(1.5)))
        );
        assert_eq!(doc.lookup(&path("parent.score")), None);
    }

    #[test]
    fn test_map_lookup_walks_through_nullable_objects() {
        let mut inner = HashMap::new();
        inner.insert("city".to_string(), Value::from("Springfield"));

        let mut record = HashMap::new();
        record.insert("address".to_string(), Value::some(Value::Object(inner)));

        assert_eq!(record.lookup(&path("address.city")), Some(Value::from("Springfield")));
        assert_eq!(record.lookup(&path("address.zip")), None);
    }
}
