use std::fmt;

use crate::ast::{LogicalOp, NumberOp, StringOp};

/// Abstract Syntax Tree node of a filter expression.
///
/// The set of node kinds is closed: every consumer (evaluator, SQL
/// compiler, renderer) matches exhaustively, so adding a node kind fails to
/// compile until each of them handles it.
///
/// Negation is a flag on the node itself rather than a wrapper node. `not`
/// applies to exactly the factor that follows it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Two sub-expressions joined with `and` / `or`
    ///
    /// # Example
    /// ```text
    /// age > 30 and name == 'Bob'
    /// ```
    Logical(LogicalOperator),

    /// String comparison
    ///
    /// # Example
    /// ```text
    /// city ~ 'Spring.*'
    /// ```
    String(StringCondition),

    /// Numeric comparison
    ///
    /// # Example
    /// ```text
    /// age >= 18
    /// ```
    Number(NumberCondition),

    /// Null test
    ///
    /// # Example
    /// ```text
    /// deleted_at == null
    /// ```
    Null(NullCondition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalOperator {
    pub op: LogicalOp,
    pub is_negative: bool,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringCondition {
    pub field_path: Vec<String>,
    pub value: String,
    pub op: StringOp,
    pub is_negative: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberCondition {
    pub field_path: Vec<String>,
    pub value: f64,
    pub op: NumberOp,
    pub is_negative: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullCondition {
    pub field_path: Vec<String>,
    pub is_negative: bool,
}

impl Expr {
    /// Joins two expressions, folding `left` into the new node.
    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
        Expr::Logical(LogicalOperator {
            op,
            is_negative: false,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Expr::Logical(node) => node.is_negative,
            Expr::String(cond) => cond.is_negative,
            Expr::Number(cond) => cond.is_negative,
            Expr::Null(cond) => cond.is_negative,
        }
    }

    /// Flips the negation flag of this node only; children are untouched.
    pub fn negate(&mut self) {
        let flag = match self {
            Expr::Logical(node) => &mut node.is_negative,
            Expr::String(cond) => &mut cond.is_negative,
            Expr::Number(cond) => &mut cond.is_negative,
            Expr::Null(cond) => &mut cond.is_negative,
        };
        *flag = !*flag;
    }

    /// Field path of a leaf condition, `None` for logical nodes.
    pub fn field_path(&self) -> Option<&[String]> {
        match self {
            Expr::Logical(_) => None,
            Expr::String(cond) => Some(&cond.field_path),
            Expr::Number(cond) => Some(&cond.field_path),
            Expr::Null(cond) => Some(&cond.field_path),
        }
    }

    /// Short human-readable name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Logical(_) => "logical operator",
            Expr::String(_) => "string condition",
            Expr::Number(_) => "number condition",
            Expr::Null(_) => "null condition",
        }
    }
}

// Rendering produces filter text that parses back into an equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Logical(node) => {
                if node.is_negative {
                    write!(f, "not ")?;
                }
                write!(f, "({} {} {})", node.left, node.op.keyword(), node.right)
            }
            Expr::String(cond) => write!(
                f,
                "{} {} {}",
                cond.field_path.join("."),
                cond.op.symbol(cond.is_negative),
                quote(&cond.value)
            ),
            Expr::Number(cond) => {
                let path = cond.field_path.join(".");
                match (cond.op, cond.is_negative) {
                    (NumberOp::Eq, true) => write!(f, "{} != {}", path, cond.value),
                    (op, true) => write!(f, "not {} {} {}", path, op.symbol(), cond.value),
                    (op, false) => write!(f, "{} {} {}", path, op.symbol(), cond.value),
                }
            }
            Expr::Null(cond) => {
                let op = if cond.is_negative { "!=" } else { "==" };
                write!(f, "{} {} null", cond.field_path.join("."), op)
            }
        }
    }
}

fn quote(value: &str) -> String {
    if value.contains('\'') {
        format!("\"{}\"", value)
    } else {
        format!("'{}'", value)
    }
}
