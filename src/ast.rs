//! # Sift Filter Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) of the
//! Sift filter language, a small boolean expression language for selecting
//! records by comparing their fields against literals.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Logical, string and numeric operators
//! - **[expressions]** - Expression nodes (logical operators and conditions)
//! - **[filtering]** - The parsed filter holding an optional root expression
//!
//! ## Quick Start
//!
//! ```text
//! age > 30 and not (city ~ 'Spring.*' or deleted_at != null)
//! ```
//!
//! ## Grammar
//!
//! ```text
//! expr      = term { "or" term } ;
//! term      = factor { "and" factor } ;
//! factor    = [ "not" ] ( "(" expr ")" | condition ) ;
//! condition = field ( eqOp valueLiteral | matchOp string | cmpOp number ) ;
//! eqOp      = "==" | "!=" ;
//! matchOp   = "~" | "!~" ;
//! cmpOp     = ">" | ">=" | "<" | "<=" ;
//! ```
//!
//! ## Core Concepts
//!
//! ### Negation
//!
//! There is no NOT node. `not` flips the `is_negative` flag of the node the
//! following factor produced, and `!=` / `!~` produce an `Eq` / `Match`
//! condition with the flag already set:
//!
//! ```text
//! not (a == 1 and b == 2)   // Logical { op: And, is_negative: true, .. }
//! name != 'x'               // String  { op: Eq,  is_negative: true, .. }
//! ```
//!
//! ### Field Paths
//!
//! Field names may contain dots; each condition stores the name split on
//! `.` as its field path (`parent.child` becomes `["parent", "child"]`).
pub mod expressions;
pub mod filtering;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, LogicalOperator, NullCondition, NumberCondition, StringCondition};
pub use filtering::Filtering;
pub use operators::{LogicalOp, NumberOp, StringOp};
pub use tokens::Token;
