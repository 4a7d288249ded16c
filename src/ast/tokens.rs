use std::fmt;

/// A single lexical unit of a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    // Literals
    /// Numeric literal: digits with at most one decimal point
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Number(f64),

    /// String literal enclosed in single or double quotes
    ///
    /// No escape sequences are recognised.
    ///
    /// # Examples
    /// ```text
    /// 'Bob'
    /// "Spring.*"
    /// ```
    String(String),

    /// Field reference
    ///
    /// Starts with a letter, followed by letters, digits, `.`, `-` or `_`.
    /// Dotted names address nested fields.
    ///
    /// # Examples
    /// ```text
    /// age
    /// parent.child
    /// created-at
    /// ```
    Field(String),

    // Logical
    /// Logical AND (`and`)
    And,

    /// Logical OR (`or`)
    Or,

    /// Negation of the following factor (`not`)
    Not,

    // Comparison
    /// `==` or `eq`
    Eq,

    /// `!=` or `ne`
    Ne,

    /// `~` or `match`
    Match,

    /// `!~` or `nomatch`
    NotMatch,

    /// `>` or `gt`
    Gt,

    /// `>=` or `ge`
    Ge,

    /// `<` or `lt`
    Lt,

    /// `<=` or `le`
    Le,

    /// Null literal (`null`)
    Null,

    /// End of input
    Eof,
}

impl Token {
    /// Maps a reserved word to its keyword token.
    ///
    /// Matching is case-sensitive: only the lowercase spelling is reserved.
    pub fn keyword(word: &str) -> Option<Token> {
        let token = match word {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "null" => Token::Null,
            "eq" => Token::Eq,
            "ne" => Token::Ne,
            "gt" => Token::Gt,
            "ge" => Token::Ge,
            "lt" => Token::Lt,
            "le" => Token::Le,
            "match" => Token::Match,
            "nomatch" => Token::NotMatch,
            _ => return None,
        };
        Some(token)
    }

    /// True for the comparison operators that may follow a field.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Eq
                | Token::Ne
                | Token::Match
                | Token::NotMatch
                | Token::Gt
                | Token::Ge
                | Token::Lt
                | Token::Le
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Number(n) => write!(f, "number {}", n),
            Token::String(s) => write!(f, "string {:?}", s),
            Token::Field(name) => write!(f, "field '{}'", name),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
            Token::Not => write!(f, "'not'"),
            Token::Eq => write!(f, "'=='"),
            Token::Ne => write!(f, "'!='"),
            Token::Match => write!(f, "'~'"),
            Token::NotMatch => write!(f, "'!~'"),
            Token::Gt => write!(f, "'>'"),
            Token::Ge => write!(f, "'>='"),
            Token::Lt => write!(f, "'<'"),
            Token::Le => write!(f, "'<='"),
            Token::Null => write!(f, "'null'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
