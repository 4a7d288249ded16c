use std::collections::HashMap;

use parking_lot::RwLock;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{
        Expr, Filtering, LogicalOp, LogicalOperator, NullCondition, NumberCondition, StringCondition,
        StringOp,
    },
    record::Record,
    value::Value,
};

/// Errors that can occur while evaluating a filter against a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The field is missing or its kind does not fit the condition.
    ///
    /// `expected` is one of `"string"`, `"number"` or `"nullable"`.
    #[error("type mismatch: field '{path}' is not {expected}")]
    TypeMismatch { expected: &'static str, path: String },

    /// The operator cannot be applied to a field of this kind.
    #[error("unsupported operator '{op}' for {kind} field")]
    UnsupportedOperator { kind: String, op: String },

    /// The pattern of a `~` / `!~` condition is not a valid regular expression.
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    /// Raised by custom [`Matcher`](crate::Matcher) implementations.
    #[error("{0}")]
    Custom(String),
}

/// Number of compiled patterns an [`Evaluator::new`] keeps.
pub const DEFAULT_REGEX_CACHE_CAPACITY: usize = 256;

/// Evaluates parsed filters against records.
///
/// Compiled regular expressions are cached by pattern, so one evaluator
/// reused across many records compiles each pattern once. The cache only
/// ever holds fully compiled entries and may be shared between threads.
/// It holds at most `cache_capacity` patterns and is cleared when a new
/// pattern arrives while it is full.
#[derive(Debug)]
pub struct Evaluator {
    regex_cache: RwLock<HashMap<String, Regex>>,
    cache_capacity: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_cache_capacity(DEFAULT_REGEX_CACHE_CAPACITY)
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An evaluator caching at most `capacity` compiled patterns.
    /// A capacity of zero disables the cache.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Evaluator {
            regex_cache: RwLock::new(HashMap::new()),
            cache_capacity: capacity,
        }
    }

    /// Tests whether `record` satisfies `filtering`.
    ///
    /// An empty filter matches every record. A record that provides a
    /// [`Matcher`](crate::Matcher) decides on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift_lang::{Evaluator, parse};
    /// use serde_json::json;
    ///
    /// let filtering = parse("city ~ 'Spring.*' and population >= 1000").unwrap();
    /// let record = json!({"city": "Springfield", "population": 30720});
    ///
    /// let evaluator = Evaluator::new();
    /// assert!(evaluator.filter(&filtering, &record).unwrap());
    /// ```
    pub fn filter<R: Record + ?Sized>(
        &self,
        filtering: &Filtering,
        record: &R,
    ) -> Result<bool, EvalError> {
        let Some(root) = &filtering.root else {
            return Ok(true);
        };

        if let Some(matcher) = record.as_matcher() {
            return matcher.matches(filtering);
        }

        self.eval_expr(root, record)
    }

    /// Evaluates a single expression node.
    pub fn eval_expr<R: Record + ?Sized>(&self, expr: &Expr, record: &R) -> Result<bool, EvalError> {
        match expr {
            Expr::Logical(node) => self.eval_logical(node, record),
            Expr::String(cond) => self.eval_string(cond, record),
            Expr::Number(cond) => eval_number(cond, record),
            Expr::Null(cond) => eval_null(cond, record),
        }
    }

    fn eval_logical<R: Record + ?Sized>(
        &self,
        node: &LogicalOperator,
        record: &R,
    ) -> Result<bool, EvalError> {
        let left = self.eval_expr(&node.left, record)?;

        let result = match node.op {
            LogicalOp::And if !left => false,
            LogicalOp::Or if left => true,
            _ => self.eval_expr(&node.right, record)?,
        };
        Ok(result != node.is_negative)
    }

    fn eval_string<R: Record + ?Sized>(
        &self,
        cond: &StringCondition,
        record: &R,
    ) -> Result<bool, EvalError> {
        let value = record.lookup(&cond.field_path);
        let Some(field) = value.as_ref().and_then(Value::deref_nullable).and_then(Value::as_str)
        else {
            return Err(type_mismatch("string", &cond.field_path));
        };

        let matched = match cond.op {
            StringOp::Eq => field == cond.value,
            StringOp::Match => self.regex(&cond.value)?.is_match(field),
        };
        Ok(matched != cond.is_negative)
    }

    /// Read-through lookup in the compiled pattern cache.
    fn regex(&self, pattern: &str) -> Result<Regex, EvalError> {
        if let Some(re) = self.regex_cache.read().get(pattern) {
            return Ok(re.clone());
        }

        let re = Regex::new(pattern).map_err(|e| EvalError::InvalidRegex {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        debug!(pattern, "compiled match pattern");

        if self.cache_capacity == 0 {
            return Ok(re);
        }
        let mut cache = self.regex_cache.write();
        if cache.len() >= self.cache_capacity && !cache.contains_key(pattern) {
            debug!(entries = cache.len(), "regex cache full, clearing");
            cache.clear();
        }
        cache.entry(pattern.to_string()).or_insert_with(|| re.clone());
        Ok(re)
    }
}

fn eval_number<R: Record + ?Sized>(cond: &NumberCondition, record: &R) -> Result<bool, EvalError> {
    let value = record.lookup(&cond.field_path);
    let Some(field) = value.as_ref().and_then(Value::deref_nullable).and_then(Value::as_float)
    else {
        return Err(type_mismatch("number", &cond.field_path));
    };

    Ok(cond.op.compare(field, cond.value) != cond.is_negative)
}

fn eval_null<R: Record + ?Sized>(cond: &NullCondition, record: &R) -> Result<bool, EvalError> {
    match record.lookup(&cond.field_path) {
        Some(value @ Value::Nullable(_)) => {
            Ok(value.deref_nullable().is_none() != cond.is_negative)
        }
        _ => Err(type_mismatch("nullable", &cond.field_path)),
    }
}

fn type_mismatch(expected: &'static str, path: &[String]) -> EvalError {
    EvalError::TypeMismatch {
        expected,
        path: path.join("."),
    }
}

/// Tests a single record with a fresh [`Evaluator`].
pub fn filter<R: Record + ?Sized>(filtering: &Filtering, record: &R) -> Result<bool, EvalError> {
    Evaluator::new().filter(filtering, record)
}

/// Keeps the records that satisfy `filtering`, in their original order.
///
/// Stops at the first evaluation error.
pub fn filter_records<'a, R: Record>(
    filtering: &Filtering,
    records: &'a [R],
) -> Result<Vec<&'a R>, EvalError> {
    let evaluator = Evaluator::new();
    let mut matched = Vec::new();
    for record in records {
        if evaluator.filter(filtering, record)? {
            matched.push(record);
        }
    }
    debug!(total = records.len(), matched = matched.len(), "filtered records");
    Ok(matched)
}
