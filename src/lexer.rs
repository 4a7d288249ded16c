use thiserror::Error;

use crate::ast::Token;

/// Errors raised while tokenizing a filter string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that cannot start or continue a token.
    ///
    /// `symbol` is `None` when the input ended where a character was
    /// required, e.g. inside an unterminated string.
    #[error("unexpected {} at position {position}", describe_symbol(.symbol))]
    UnexpectedSymbol {
        symbol: Option<char>,
        position: usize,
    },

    /// A run of digits and dots that is not a valid number.
    #[error("malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },
}

fn describe_symbol(symbol: &Option<char>) -> String {
    match symbol {
        Some(ch) => format!("symbol '{}'", ch),
        None => "end of input".to_string(),
    }
}

/// Converts filter text into tokens, one call at a time.
///
/// Positions are zero-based character offsets.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Position of the first character of the most recently returned token.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// True when the most recently returned token was spelled as a word
    /// (a keyword or field) rather than a symbol.
    pub fn token_is_word(&self) -> bool {
        self.input
            .get(self.token_start)
            .is_some_and(|c| c.is_alphabetic())
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '.' || ch == '-' || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(result);
            }
            result.push(ch);
        }

        Err(LexError::UnexpectedSymbol {
            symbol: None,
            position: self.position,
        })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || ch == '.' {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if number.matches('.').count() > 1 {
            return Err(LexError::MalformedNumber {
                literal: number,
                position: start,
            });
        }

        number
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| LexError::MalformedNumber {
                literal: number,
                position: start,
            })
    }

    /// Consumes a two-character operator whose first character is `first`.
    fn read_pair(&mut self, first: char, pairs: &[(char, Token)]) -> Result<Token, LexError> {
        let second = self.peek_char(1);
        for (ch, token) in pairs {
            if second == Some(*ch) {
                self.advance();
                self.advance();
                return Ok(token.clone());
            }
        }
        Err(LexError::UnexpectedSymbol {
            symbol: Some(first),
            position: self.position,
        })
    }

    /// Returns the next token, or [`Token::Eof`] once the input is exhausted.
    ///
    /// Calling again after end of input keeps returning [`Token::Eof`].
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some('~') => {
                self.advance();
                Ok(Token::Match)
            }
            Some('=') => self.read_pair('=', &[('=', Token::Eq)]),
            Some('!') => self.read_pair('!', &[('=', Token::Ne), ('~', Token::NotMatch)]),
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::Ge)
                } else {
                    self.advance();
                    Ok(Token::Gt)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::Le)
                } else {
                    self.advance();
                    Ok(Token::Lt)
                }
            }
            Some('"') => self.read_string('"').map(Token::String),
            Some('\'') => self.read_string('\'').map(Token::String),
            Some(ch) if ch.is_alphabetic() => {
                let ident = self.read_identifier();
                Ok(Token::keyword(&ident).unwrap_or(Token::Field(ident)))
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(LexError::UnexpectedSymbol {
                symbol: Some(ch),
                position: self.position,
            }),
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or not null eq ne gt ge lt le match nomatch");
    assert_eq!(lexer.next_token(), Ok(Token::And));
    assert_eq!(lexer.next_token(), Ok(Token::Or));
    assert_eq!(lexer.next_token(), Ok(Token::Not));
    assert_eq!(lexer.next_token(), Ok(Token::Null));
    assert_eq!(lexer.next_token(), Ok(Token::Eq));
    assert_eq!(lexer.next_token(), Ok(Token::Ne));
    assert_eq!(lexer.next_token(), Ok(Token::Gt));
    assert_eq!(lexer.next_token(), Ok(Token::Ge));
    assert_eq!(lexer.next_token(), Ok(Token::Lt));
    assert_eq!(lexer.next_token(), Ok(Token::Le));
    assert_eq!(lexer.next_token(), Ok(Token::Match));
    assert_eq!(lexer.next_token(), Ok(Token::NotMatch));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_condition() {
    let mut lexer = Lexer::new("(age >= 18)");
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Field("age".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Ge));
    assert_eq!(lexer.token_start(), 5);
    assert_eq!(lexer.next_token(), Ok(Token::Number(18.0)));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}
