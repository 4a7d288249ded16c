//! Evaluate filters against JSON input

use super::CliError;
use crate::{Evaluator, Lexer, ParseOptions, Parser, filter_records};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter expression
    pub filter: String,
    /// JSON input string: one object, or an array of objects
    pub input: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Accept keyword spellings of comparison operators
    pub keyword_operators: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed; carries the canonical rendering of the filter
    SyntaxValid(String),
    /// A single object was tested
    Matched(bool),
    /// An array was filtered down to its matching elements
    Filtered(Vec<serde_json::Value>),
}

/// Execute a sift check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let parse_options = ParseOptions {
        keyword_operators: options.keyword_operators,
        ..Default::default()
    };
    let filtering = Parser::with_options(Lexer::new(&options.filter), parse_options)?.parse()?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid(filtering.to_string()));
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let input: serde_json::Value = serde_json::from_str(json_str)?;

    match input {
        serde_json::Value::Object(_) => {
            let matched = Evaluator::new().filter(&filtering, &input)?;
            Ok(CheckResult::Matched(matched))
        }
        serde_json::Value::Array(records) => {
            let matched = filter_records(&filtering, &records)?;
            Ok(CheckResult::Filtered(matched.into_iter().cloned().collect()))
        }
        _ => Err(CliError::InvalidInput),
    }
}
