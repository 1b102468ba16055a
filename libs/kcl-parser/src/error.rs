//! # Syntax Errors
//!
//! Error types for the KCL lexer, delimiter matcher and parser.
//!
//! ## Example
//!
//! ```rust
//! use kcl_parser::error::{ParseError, ParseErrorKind};
//! use kcl_ast::Span;
//!
//! let error = ParseError::unexpected_token(")", "an expression", Span::new(5, 6));
//! assert!(error.to_string().contains("unexpected token ')'"));
//! ```

use kcl_ast::Span;
use thiserror::Error;

// =============================================================================
// LEX ERROR
// =============================================================================

/// Failure to split source text into tokens. Offsets are byte positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unexpected character '{character}' at byte {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    #[error("unterminated block comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },
}

impl LexError {
    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedString { offset }
            | LexError::UnexpectedCharacter { offset, .. }
            | LexError::UnterminatedComment { offset } => *offset,
        }
    }

    /// Span covering the offending character.
    pub fn span(&self) -> Span {
        let len = match self {
            LexError::UnexpectedCharacter { character, .. } => character.len_utf8(),
            _ => 1,
        };
        Span::new(self.offset(), self.offset() + len)
    }
}

// =============================================================================
// DELIMITER ERROR
// =============================================================================

/// Delimiter matcher failures.
///
/// `NotAnOpener` is a caller bug; the parser only ever asks about openers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DelimiterError {
    #[error("token {index} is not an opening delimiter")]
    NotAnOpener { index: usize },

    #[error("delimiter at token {index} is never closed")]
    Unclosed { index: usize },
}

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {}", .span.start())]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of error.
    pub span: Span,
}

impl ParseError {
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn unexpected_token(found: &str, expected: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            span,
        )
    }

    pub fn unexpected_end(expected: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEnd {
                expected: expected.to_string(),
            },
            span,
        )
    }

    pub fn malformed_declaration(message: impl Into<String>, span: Span) -> Self {
        Self::new(
            ParseErrorKind::MalformedDeclaration {
                message: message.into(),
            },
            span,
        )
    }
}

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("unclosed delimiter '{opener}'")]
    UnclosedDelimiter { opener: String },

    #[error("mismatched delimiters '{opener}' and '{closer}'")]
    MismatchedDelimiter { opener: String, closer: String },

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    #[error("'%' is only allowed as a call argument inside a pipe")]
    MisplacedSubstitution,

    #[error("malformed declaration: {message}")]
    MalformedDeclaration { message: String },

    #[error("'return' outside of a function body")]
    ReturnOutsideFunction,
}

// =============================================================================
// SYNTAX ERROR
// =============================================================================

/// Either stage of `source -> Program` failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(e) => e.span(),
            SyntaxError::Parse(e) => e.span,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
