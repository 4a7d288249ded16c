//! Compilation of filters into parameterized SQL `WHERE` fragments.
//!
//! Literal values never appear in the generated text. Each one is replaced
//! by a `?` placeholder and returned in the argument list, in the order the
//! placeholders appear.
//!
//! Field paths are emitted as written (dot-joined, unquoted). Callers are
//! responsible for accepting only safe field names.
//!
//! ```
//! use sift_lang::{parse, to_sql};
//! use serde_json::json;
//!
//! let filtering = parse("age > 30 and name != 'Bob'").unwrap();
//! let (sql, args) = to_sql(&filtering).unwrap();
//!
//! assert_eq!(sql, "((age > ?) AND NOT(name = ?))");
//! assert_eq!(args, vec![json!(30), json!("Bob")]);
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::ast::{Expr, Filtering, LogicalOp, NumberOp, StringOp};

/// Errors raised while compiling a filter to SQL.
///
/// Both indicate a tree that was built by hand rather than by the parser,
/// or a dialect that cannot express the filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("cannot compile {0}")]
    InvalidNode(String),

    #[error("operator '{op}' is not supported by the {dialect} dialect")]
    UnsupportedOperator { dialect: SqlDialect, op: String },
}

/// SQL flavour; only affects how `~` / `!~` are spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SqlDialect {
    /// `~` (POSIX regular expression match)
    #[default]
    Postgres,
    /// `REGEXP`
    MySql,
    /// `REGEXP` (needs a user-defined `regexp()` function at runtime)
    Sqlite,
    /// Standard SQL without a regular expression operator
    Ansi,
}

impl SqlDialect {
    /// Parse dialect name from string
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            "mysql" | "mariadb" => Some(Self::MySql),
            "sqlite" => Some(Self::Sqlite),
            "ansi" | "standard" => Some(Self::Ansi),
            _ => None,
        }
    }

    fn match_operator(self) -> Option<&'static str> {
        match self {
            SqlDialect::Postgres => Some("~"),
            SqlDialect::MySql | SqlDialect::Sqlite => Some("REGEXP"),
            SqlDialect::Ansi => None,
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SqlDialect::Postgres => "postgres",
            SqlDialect::MySql => "mysql",
            SqlDialect::Sqlite => "sqlite",
            SqlDialect::Ansi => "ansi",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlCompiler {
    dialect: SqlDialect,
}

impl SqlCompiler {
    pub fn new(dialect: SqlDialect) -> Self {
        SqlCompiler { dialect }
    }

    /// Compiles a filter into a `WHERE` fragment and its arguments.
    ///
    /// An empty filter compiles to an empty string with no arguments.
    pub fn compile(&self, filtering: &Filtering) -> Result<(String, Vec<Value>), CompileError> {
        let Some(root) = &filtering.root else {
            return Ok((String::new(), Vec::new()));
        };

        let mut args = Vec::new();
        let sql = self.compile_expr(root, &mut args)?;
        debug!(%sql, args = args.len(), dialect = %self.dialect, "compiled filter to sql");
        Ok((sql, args))
    }

    fn compile_expr(&self, expr: &Expr, args: &mut Vec<Value>) -> Result<String, CompileError> {
        let body = match expr {
            Expr::Logical(node) => {
                let left = self.compile_expr(&node.left, args)?;
                let right = self.compile_expr(&node.right, args)?;
                let op = match node.op {
                    LogicalOp::And => "AND",
                    LogicalOp::Or => "OR",
                };
                format!("{} {} {}", left, op, right)
            }
            Expr::String(cond) => {
                let op = match cond.op {
                    StringOp::Eq => "=",
                    StringOp::Match => self.dialect.match_operator().ok_or_else(|| {
                        CompileError::UnsupportedOperator {
                            dialect: self.dialect,
                            op: "~".to_string(),
                        }
                    })?,
                };
                args.push(Value::String(cond.value.clone()));
                format!("{} {} ?", column(expr, &cond.field_path)?, op)
            }
            Expr::Number(cond) => {
                args.push(number_argument(cond.value)?);
                format!("{} {} ?", column(expr, &cond.field_path)?, number_operator(cond.op))
            }
            Expr::Null(cond) => format!("{} IS NULL", column(expr, &cond.field_path)?),
        };

        let prefix = if expr.is_negative() { "NOT" } else { "" };
        Ok(format!("{}({})", prefix, body))
    }
}

fn number_operator(op: NumberOp) -> &'static str {
    match op {
        NumberOp::Eq => "=",
        other => other.symbol(),
    }
}

/// Whole numbers bind as integers, everything else as floats.
fn number_argument(value: f64) -> Result<Value, CompileError> {
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value) {
        return Ok(Value::from(value as i64));
    }
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| CompileError::InvalidNode(format!("number condition with value {}", value)))
}

fn column(expr: &Expr, path: &[String]) -> Result<String, CompileError> {
    if path.is_empty() {
        return Err(CompileError::InvalidNode(format!(
            "{} with empty field path",
            expr.kind_name()
        )));
    }
    Ok(path.join("."))
}

/// Compiles a filter with the default ([`SqlDialect::Postgres`]) compiler.
pub fn to_sql(filtering: &Filtering) -> Result<(String, Vec<Value>), CompileError> {
    SqlCompiler::default().compile(filtering)
}
