//! Compile filters to SQL

use super::CliError;
use crate::{ParseOptions, SqlCompiler, SqlDialect, parse_with};

/// Options for the sql command
#[derive(Debug, Clone, Default)]
pub struct SqlOptions {
    /// The filter expression
    pub filter: String,
    /// Dialect name (postgres, mysql, sqlite, ansi)
    pub dialect: Option<String>,
    /// Accept keyword spellings of comparison operators
    pub keyword_operators: bool,
}

/// Compile a filter and return `{"sql": ..., "args": [...]}`
pub fn execute_sql(options: &SqlOptions) -> Result<serde_json::Value, CliError> {
    let dialect = match &options.dialect {
        Some(name) => {
            SqlDialect::from_name(name).ok_or_else(|| CliError::UnknownDialect(name.clone()))?
        }
        None => SqlDialect::default(),
    };

    let filtering = parse_with(
        &options.filter,
        ParseOptions {
            keyword_operators: options.keyword_operators,
            ..Default::default()
        },
    )?;
    let (sql, args) = SqlCompiler::new(dialect).compile(&filtering)?;

    Ok(serde_json::json!({ "sql": sql, "args": args }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sql_with_dialect() {
        let opts = SqlOptions {
            filter: "city ~ 'Spring.*'".to_string(),
            dialect: Some("mysql".to_string()),
            ..Default::default()
        };
        let output = execute_sql(&opts).unwrap();
        assert_eq!(output, json!({"sql": "(city REGEXP ?)", "args": ["Spring.*"]}));
    }

    #[test]
    fn test_sql_unknown_dialect() {
        let opts = SqlOptions {
            filter: "a == 1".to_string(),
            dialect: Some("oracle".to_string()),
            ..Default::default()
        };
        assert!(matches!(execute_sql(&opts), Err(CliError::UnknownDialect(d)) if d == "oracle"));
    }
}
