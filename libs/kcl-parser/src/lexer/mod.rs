//! # KCL Lexer
//!
//! Tokenizes KCL source code. Unlike a compiler lexer, whitespace and
//! comments are emitted as tokens so that concatenating every token's text
//! reproduces the source exactly.
//!
//! ## Example
//!
//! ```rust
//! use kcl_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("lineTo(1, 2)").tokenize().unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind, DELIMITERS, KEYWORDS, OPERATORS};

use crate::error::LexError;
use kcl_ast::Span;

// =============================================================================
// LEXER
// =============================================================================

/// KCL lexer. Converts source text into a stream of tokens.
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source. No end-of-input token is appended.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while !self.cursor.at_end() {
            self.scan_token()?;
        }
        Ok(self.tokens)
    }

    /// Scan a single token.
    fn scan_token(&mut self) -> Result<(), LexError> {
        let start = self.cursor.pos();
        let c = match self.cursor.first() {
            Some(c) => c,
            None => return Ok(()),
        };

        let kind = match c {
            c if c.is_whitespace() => {
                self.cursor.eat_while(char::is_whitespace);
                TokenKind::Whitespace
            }
            '/' if self.cursor.second() == Some('/') => {
                self.cursor.eat_while(|c| c != '\n');
                TokenKind::Comment
            }
            '/' if self.cursor.second() == Some('*') => {
                self.scan_block_comment(start)?;
                TokenKind::Comment
            }
            '"' | '\'' => {
                self.scan_string(start, c)?;
                TokenKind::String
            }
            '0'..='9' => {
                self.scan_number();
                TokenKind::Number
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                self.cursor
                    .eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
                if KEYWORDS.contains(&self.cursor.text_since(start)) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                }
            }
            c if DELIMITERS.contains(&c) => {
                self.cursor.bump();
                TokenKind::Delimiter
            }
            _ if OPERATORS.iter().any(|op| self.cursor.eat_prefix(op)) => TokenKind::Operator,
            _ => {
                return Err(LexError::UnexpectedCharacter {
                    character: c,
                    offset: start,
                })
            }
        };

        let end = self.cursor.pos();
        let text = self.cursor.text_since(start);
        self.tokens.push(Token::new(kind, Span::new(start, end), text));
        Ok(())
    }

    /// Scan `/* ... */`; the cursor sits on the opening `/`.
    fn scan_block_comment(&mut self, start: usize) -> Result<(), LexError> {
        self.cursor.eat_prefix("/*");
        while !self.cursor.at_end() {
            if self.cursor.eat_prefix("*/") {
                return Ok(());
            }
            self.cursor.bump();
        }
        Err(LexError::UnterminatedComment { offset: start })
    }

    /// Scan a quoted string up to the matching quote character.
    fn scan_string(&mut self, start: usize, quote: char) -> Result<(), LexError> {
        self.cursor.bump();
        while let Some(c) = self.cursor.bump() {
            if c == quote {
                return Ok(());
            }
        }
        Err(LexError::UnterminatedString { offset: start })
    }

    /// Scan digits with an optional fractional part. A `.` is only part of
    /// the number when a digit follows it.
    fn scan_number(&mut self) {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let fraction = self.cursor.second().is_some_and(|c| c.is_ascii_digit());
        if self.cursor.first() == Some('.') && fraction {
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }
    }
}

/// Tokenize `source`.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Index of the first non-trivia token at or after `from`.
pub fn next_significant(tokens: &[Token], from: usize) -> Option<usize> {
    (from..tokens.len()).find(|&i| !tokens[i].is_trivia())
}

// =============================================================================
// TESTS
// =============================================================================
