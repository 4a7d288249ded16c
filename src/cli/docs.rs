//! Documentation content for sift CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Types,
    Sql,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "types" | "type" | "records" => Some(Self::Types),
            "sql" => Some(Self::Sql),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SIFT DOCUMENTATION

Sift is a small filter language. A filter compares fields of a record with
literals and combines the comparisons with and / or / not. Filters can be
evaluated against JSON documents or compiled into SQL WHERE fragments.

DOCUMENTATION CATEGORIES

  syntax            Grammar, precedence, literals and field names
  operators         Comparison and logical operators
  types             How field kinds are checked during evaluation
  sql               How filters are compiled to SQL

QUICK REFERENCE

  age > 30                       Numeric comparison
  name == 'Bob'                  String equality
  city ~ 'Spring.*'              Regular expression search
  deleted_at == null             Null test
  a == 1 or b == 2 and c == 3    'and' binds tighter than 'or'
  not (a == 1 and b == 2)        Negate a group

Run 'sift doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Types) => Ok(TYPES_DOC),
        Some(DocCategory::Sql) => Ok(SQL_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Grammar

GRAMMAR
  expr      = term { "or" term } ;
  term      = factor { "and" factor } ;
  factor    = [ "not" ] ( "(" expr ")" | condition ) ;
  condition = field ( eqOp valueLiteral | matchOp string | cmpOp number ) ;
  eqOp      = "==" | "!=" ;
  matchOp   = "~" | "!~" ;
  cmpOp     = ">" | ">=" | "<" | "<=" ;
  valueLiteral = string | number | "null" ;

PRECEDENCE
  not  >  and  >  or, all left-associative.

    a == 1 or b == 2 and c == 3     is    a == 1 or (b == 2 and c == 3)

  'not' applies to the single condition or parenthesized group after it.

  Groups and and/or chains may nest at most 128 levels deep.

FIELDS
  Start with a letter; may contain letters, digits, '.', '-' and '_'.
  Dots address nested fields: address.city

LITERALS
  Strings    'single' or "double" quoted, no escape sequences
  Numbers    digits with at most one decimal point: 42, 3.14
  Null       null

RESERVED WORDS (lowercase only)
  and or not null eq ne gt ge lt le match nomatch

  The keyword operators (eq, ne, ...) are rejected unless
  --keyword-operators is given.

EMPTY FILTER
  An empty filter matches every record and compiles to empty SQL.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON
  ==   equal                  strings, numbers, null
  !=   not equal              strings, numbers, null
  ~    regex search           strings (unanchored: 'ring' matches 'Springfield')
  !~   regex search negated   strings
  >    greater than           numbers
  >=   greater or equal       numbers
  <    less than              numbers
  <=   less or equal          numbers

KEYWORD FORMS (with --keyword-operators)
  eq ne match nomatch gt ge lt le

LOGICAL
  and  both sides must match; the right side is skipped if the left fails
  or   either side must match; the right side is skipped if the left matches
  not  negates the next condition or group
"#;

const TYPES_DOC: &str = r#"TYPES - Evaluation

Each condition requires a field of a fitting kind:

  string conditions   string fields
  number conditions   integer, unsigned or float fields (compared as floats)
  null conditions     nullable fields

Nullable fields holding a value are unwrapped before string and number
conditions look at them. A null or missing field fails with a type
mismatch error.

JSON DOCUMENTS
  Every member of a JSON object is nullable, so '== null' works on any
  member. Nested members are addressed with dotted field names.

    Input:  {"user": {"name": "Alice", "age": 30}, "deleted_at": null}
    Filter: user.age >= 18 and deleted_at == null
    Output: true
"#;

const SQL_DOC: &str = r#"SQL - Compilation

Filters compile to a parenthesized WHERE fragment plus an ordered argument
list. Every literal becomes a '?' placeholder; null tests take no argument.
Whole numbers are passed as integers, other numbers as floats.

    Filter: age > 30 and name != 'Bob'
    SQL:    ((age > ?) AND NOT(name = ?))
    Args:   [30, "Bob"]

    Filter: (a == null) or (b != null)
    SQL:    ((a IS NULL) OR NOT(b IS NULL))
    Args:   []

DIALECTS (--dialect)
  postgres   ~ for regex search (default)
  mysql      REGEXP
  sqlite     REGEXP
  ansi       no regex search; '~' filters are rejected

Field names are emitted unquoted. Only accept field names you trust.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_categories() {
        assert_eq!(get_doc_category("grammar").unwrap(), SYNTAX_DOC);
        assert_eq!(get_doc_category("Syntax").unwrap(), SYNTAX_DOC);
        assert_eq!(get_doc_category("ops").unwrap(), OPERATORS_DOC);
        assert!(matches!(
            get_doc_category("grammer"),
            Err(CliError::UnknownCategory(name)) if name == "grammer"
        ));
    }

    #[test]
    fn test_overview_lists_every_category() {
        let overview = get_docs_overview();
        for name in ["syntax", "operators", "types", "sql"] {
            assert!(DocCategory::from_name(name).is_some());
            assert!(overview.contains(name), "Missing category: {}", name);
        }
    }
}
