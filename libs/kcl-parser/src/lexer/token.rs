//! # Tokens
//!
//! Token types for the KCL lexer. Trivia (whitespace and comments) are
//! real tokens here: editor offsets and token indices both count them.
//!
//! ## Example
//!
//! ```rust
//! use kcl_parser::lexer::{Token, TokenKind};
//! use kcl_ast::Span;
//!
//! let token = Token::new(TokenKind::Number, Span::new(0, 2), "10");
//! assert_eq!(token.kind, TokenKind::Number);
//! ```

use kcl_ast::Span;
use serde::{Deserialize, Serialize};

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token type.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Exact source text, quotes included for strings.
    pub value: String,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn is_delimiter(&self, text: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.value == text
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == text
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == text
    }

    pub fn is_opener(&self) -> bool {
        self.kind == TokenKind::Delimiter && matches!(self.value.as_str(), "(" | "{" | "[")
    }

    pub fn is_closer(&self) -> bool {
        self.kind == TokenKind::Delimiter && matches!(self.value.as_str(), ")" | "}" | "]")
    }

    /// Tokens that can stand alone as a complete operand.
    pub fn is_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number | TokenKind::String | TokenKind::Identifier
        )
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// `12`, `3.5`
    Number,
    /// `"abc"` or `'abc'`, quotes kept in the value
    String,
    Identifier,
    /// One of [`KEYWORDS`]
    Keyword,
    /// One of [`OPERATORS`]
    Operator,
    /// `( ) { } [ ] , :`
    Delimiter,
    /// A maximal run of whitespace
    Whitespace,
    /// `// line` or `/* block */`
    Comment,
}

impl TokenKind {
    /// Human-readable name for error messages.
    pub const fn display(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
        }
    }
}

/// Reserved words.
pub const KEYWORDS: &[&str] = &["const", "fn", "sketch", "path", "return"];

/// Operator spellings, longest first so multi-character forms win.
pub const OPERATORS: &[&str] = &[
    "|>", "=>", "==", "!=", "<=", ">=", "+", "-", "*", "/", "<", ">", "=", "%",
];

pub const DELIMITERS: &[char] = &['(', ')', '{', '}', '[', ']', ',', ':'];

// =============================================================================
// TESTS
// =============================================================================
