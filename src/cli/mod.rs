//! CLI support for sift-lang
//!
//! Provides programmatic access to the sift CLI commands so they can be
//! embedded in other tools.

mod check;
mod docs;
mod sql;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use sql::{SqlOptions, execute_sql};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("SQL error: {0}")]
    Compile(#[from] crate::CompileError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Input must be a JSON object or an array of objects")]
    InvalidInput,

    #[error("Unknown dialect: '{0}' (expected postgres, mysql, sqlite or ansi)")]
    UnknownDialect(String),

    #[error("Unknown category: '{0}'\nRun 'sift docs' to see available categories.")]
    UnknownCategory(String),
}
