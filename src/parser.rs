use std::mem;

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{
        Expr, Filtering, LogicalOp, NullCondition, NumberCondition, NumberOp, StringCondition,
        StringOp, Token,
    },
    lexer::{LexError, Lexer},
};

/// Errors raised while parsing a filter string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token the grammar does not allow at this point.
    #[error("unexpected {token} at position {position}")]
    UnexpectedToken { token: Token, position: usize },

    /// Parentheses or `and`/`or` chains nest deeper than
    /// [`ParseOptions::max_depth`].
    #[error("filter nests deeper than {limit} levels at position {position}")]
    TooDeep { limit: usize, position: usize },
}

/// Default for [`ParseOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept the keyword spellings `eq`, `ne`, `gt`, `ge`, `lt`, `le`,
    /// `match` and `nomatch` as comparison operators.
    ///
    /// The words are always reserved by the lexer; when this is off they
    /// are rejected with [`ParseError::UnexpectedToken`].
    pub keyword_operators: bool,

    /// Deepest parenthesis nesting, and deepest tree, the parser accepts.
    ///
    /// Each group and each `and`/`or` folded onto a chain counts as one
    /// level. Anything that walks a parsed tree recurses at most this deep.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            keyword_operators: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recursive-descent parser over a [`Lexer`], holding one token of lookahead.
pub struct Parser {
    lexer: Lexer,
    options: ParseOptions,
    current_token: Token,
    current_position: usize,
    current_is_word: bool,
    nesting: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        Self::with_options(lexer, ParseOptions::default())
    }

    pub fn with_options(mut lexer: Lexer, options: ParseOptions) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            current_position: lexer.token_start(),
            current_is_word: lexer.token_is_word(),
            lexer,
            options,
            current_token,
            nesting: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_start();
        self.current_is_word = self.lexer.token_is_word();
        Ok(())
    }

    fn unexpected<T>(&mut self) -> Result<T, ParseError> {
        Err(ParseError::UnexpectedToken {
            token: mem::replace(&mut self.current_token, Token::Eof),
            position: self.current_position,
        })
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current_token != expected {
            return self.unexpected();
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        self.current_token == *token
    }

    fn too_deep(&self, position: usize) -> ParseError {
        ParseError::TooDeep {
            limit: self.options.max_depth,
            position,
        }
    }

    /// Depth of a logical node over children of depth `children`.
    fn fold_depth(&self, children: usize, position: usize) -> Result<usize, ParseError> {
        let depth = children + 1;
        if depth > self.options.max_depth {
            return Err(self.too_deep(position));
        }
        Ok(depth)
    }

    /// Parses the whole input.
    ///
    /// An input without any tokens yields a [`Filtering`] with no root.
    pub fn parse(&mut self) -> Result<Filtering, ParseError> {
        if self.check(&Token::Eof) {
            return Ok(Filtering::empty());
        }

        let root = self.parse_expression()?;
        self.expect(Token::Eof)?;

        debug!(filter = %root, "parsed filter");
        Ok(Filtering::new(root))
    }

    /// expr := term (OR term)*
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.expression().map(|(expr, _)| expr)
    }

    // The helpers below return each subtree with its depth.

    fn expression(&mut self) -> Result<(Expr, usize), ParseError> {
        let (mut left, mut depth) = self.term()?;

        while self.check(&Token::Or) {
            let position = self.current_position;
            self.advance()?;
            let (right, right_depth) = self.term()?;
            depth = self.fold_depth(depth.max(right_depth), position)?;
            left = Expr::logical(LogicalOp::Or, left, right);
        }
        Ok((left, depth))
    }

    /// term := factor (AND factor)*
    fn term(&mut self) -> Result<(Expr, usize), ParseError> {
        let (mut left, mut depth) = self.factor()?;

        while self.check(&Token::And) {
            let position = self.current_position;
            self.advance()?;
            let (right, right_depth) = self.factor()?;
            depth = self.fold_depth(depth.max(right_depth), position)?;
            left = Expr::logical(LogicalOp::And, left, right);
        }
        Ok((left, depth))
    }

    /// factor := [NOT] (LPAREN expr RPAREN | condition)
    fn factor(&mut self) -> Result<(Expr, usize), ParseError> {
        let negated = self.check(&Token::Not);
        if negated {
            self.advance()?;
        }

        let (mut expr, depth) = if self.check(&Token::LParen) {
            self.nesting += 1;
            if self.nesting > self.options.max_depth {
                return Err(self.too_deep(self.current_position));
            }
            self.advance()?;
            let group = self.expression()?;
            self.expect(Token::RParen)?;
            self.nesting -= 1;
            group
        } else {
            (self.parse_condition()?, 1)
        };

        if negated {
            expr.negate();
        }
        Ok((expr, depth))
    }

    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        let field_path = match &self.current_token {
            Token::Field(name) => name.split('.').map(str::to_string).collect::<Vec<_>>(),
            _ => return self.unexpected(),
        };
        self.advance()?;

        if !self.current_token.is_comparison()
            || (self.current_is_word && !self.options.keyword_operators)
        {
            return self.unexpected();
        }
        let operator = mem::replace(&mut self.current_token, Token::Eof);
        self.advance()?;

        match operator {
            Token::Eq | Token::Ne => {
                let is_negative = operator == Token::Ne;
                match mem::replace(&mut self.current_token, Token::Eof) {
                    Token::String(value) => {
                        self.advance()?;
                        Ok(Expr::String(StringCondition {
                            field_path,
                            value,
                            op: StringOp::Eq,
                            is_negative,
                        }))
                    }
                    Token::Number(value) => {
                        self.advance()?;
                        Ok(Expr::Number(NumberCondition {
                            field_path,
                            value,
                            op: NumberOp::Eq,
                            is_negative,
                        }))
                    }
                    Token::Null => {
                        self.advance()?;
                        Ok(Expr::Null(NullCondition {
                            field_path,
                            is_negative,
                        }))
                    }
                    token => {
                        self.current_token = token;
                        self.unexpected()
                    }
                }
            }
            Token::Match | Token::NotMatch => match &self.current_token {
                Token::String(value) => {
                    let value = value.clone();
                    self.advance()?;
                    Ok(Expr::String(StringCondition {
                        field_path,
                        value,
                        op: StringOp::Match,
                        is_negative: operator == Token::NotMatch,
                    }))
                }
                _ => self.unexpected(),
            },
            _ => match (ordering_op(&operator), &self.current_token) {
                (Some(op), Token::Number(value)) => {
                    let value = *value;
                    self.advance()?;
                    Ok(Expr::Number(NumberCondition {
                        field_path,
                        value,
                        op,
                        is_negative: false,
                    }))
                }
                _ => self.unexpected(),
            },
        }
    }
}

fn ordering_op(token: &Token) -> Option<NumberOp> {
    match token {
        Token::Gt => Some(NumberOp::Gt),
        Token::Ge => Some(NumberOp::Ge),
        Token::Lt => Some(NumberOp::Lt),
        Token::Le => Some(NumberOp::Le),
        _ => None,
    }
}

/// Parses a filter string with the default [`ParseOptions`].
///
/// # Examples
///
/// ```
/// use sift_lang::parse;
///
/// let filtering = parse("age > 30 and name == 'Bob'").unwrap();
/// assert_eq!(filtering.to_string(), "(age > 30 and name == 'Bob')");
///
/// assert!(parse("").unwrap().root.is_none());
/// ```
pub fn parse(text: &str) -> Result<Filtering, ParseError> {
    parse_with(text, ParseOptions::default())
}

pub fn parse_with(text: &str, options: ParseOptions) -> Result<Filtering, ParseError> {
    Parser::with_options(Lexer::new(text), options)?.parse()
}
