//! # KCL Parser (Pure Rust)
//!
//! Lexer, delimiter matcher, pipe-scope resolver and parser for KCL
//! source code.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Program (kcl-ast)
//!                         │
//!                         ├── delimiter matcher
//!                         └── pipe-scope resolver
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kcl_parser::parse;
//!
//! let program = parse("const x = 5 + 6").unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! kcl-parser → kcl-ast → kcl-sketch
//! ```

pub mod delimiter;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pipe_scope;

// Re-export public API
pub use delimiter::{closes_same_kind, find_closing_delimiter};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{DelimiterError, LexError, ParseError, ParseErrorKind, SyntaxError};
pub use lexer::{lex, Token, TokenKind};
pub use pipe_scope::{has_pipe_operator, PipeMatch};

use kcl_ast::Program;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse an already-lexed token stream.
///
/// ## Example
///
/// ```rust
/// use kcl_parser::{lex, parse_tokens};
///
/// let tokens = lex("5 +6").unwrap();
/// let program = parse_tokens(&tokens).unwrap();
/// assert_eq!(program.span.end(), 4);
/// ```
pub fn parse_tokens(tokens: &[Token]) -> Result<Program, ParseError> {
    parser::Parser::new(tokens).parse()
}

/// Lex and parse KCL source into a [`Program`].
///
/// ## Error Handling
///
/// The first lex or parse error aborts; there is no partial program.
///
/// ```rust
/// let err = kcl_parser::parse("const = 5").unwrap_err();
/// println!("{err}");
/// ```
pub fn parse(source: &str) -> Result<Program, SyntaxError> {
    let tokens = lex(source)?;
    Ok(parse_tokens(&tokens)?)
}
