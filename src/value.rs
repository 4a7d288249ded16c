use std::{collections::HashMap, fmt};

/// A field value handed to the evaluator by a [`Record`](crate::Record).
///
/// The variants mirror the kinds a typed record can expose. Integers,
/// unsigned integers and floats are kept apart so records can report their
/// fields faithfully; the evaluator coerces all three to `f64` for numeric
/// conditions.
///
/// # Nullability
///
/// Only [`Value::Nullable`] can be tested with `== null` / `!= null`. It
/// plays the role of an optional or pointer-typed field: `Nullable(None)` is
/// null, `Nullable(Some(v))` is dereferenced to `v` before string and
/// numeric conditions look at it.
///
/// # Examples
///
/// ```
/// use sift_lang::{Kind, Value};
///
/// let age = Value::Integer(42);
/// assert_eq!(age.kind(), Kind::Integer);
///
/// let nickname = Value::Nullable(Some(Box::new(Value::String("Bob".into()))));
/// assert_eq!(nickname.kind(), Kind::Nullable);
/// assert_eq!(nickname.deref_nullable(), Some(&Value::String("Bob".into())));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string
    String(String),

    /// Signed integer
    Integer(i64),

    /// Unsigned integer
    Unsigned(u64),

    /// Floating-point number
    Float(f64),

    /// Boolean (true/false)
    Boolean(bool),

    /// Optional value; `None` is null
    Nullable(Option<Box<Value>>),

    /// Array of values
    Array(Vec<Value>),

    /// Nested record with string keys
    Object(HashMap<String, Value>),
}

/// The kind of a [`Value`], used in type checks and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Integer,
    Unsigned,
    Float,
    Boolean,
    Nullable,
    Array,
    Object,
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Unsigned(_) => Kind::Unsigned,
            Value::Float(_) => Kind::Float,
            Value::Boolean(_) => Kind::Boolean,
            Value::Nullable(_) => Kind::Nullable,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Wraps a value as a non-null nullable.
    pub fn some(value: Value) -> Value {
        Value::Nullable(Some(Box::new(value)))
    }

    /// The null value.
    pub fn null() -> Value {
        Value::Nullable(None)
    }

    /// Strips every `Nullable` layer.
    ///
    /// Returns `None` if a null is found on the way.
    pub fn deref_nullable(&self) -> Option<&Value> {
        match self {
            Value::Nullable(Some(inner)) => inner.deref_nullable(),
            Value::Nullable(None) => None,
            other => Some(other),
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as float, coercing integer kinds
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Unsigned(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Look up a direct member of an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Unsigned => "unsigned",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Nullable => "nullable",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Unsigned(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        Value::Nullable(opt.map(|v| Box::new(v.into())))
    }
}
