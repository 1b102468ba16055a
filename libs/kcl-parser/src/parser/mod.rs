//! # KCL Parser
//!
//! Recursive descent parser producing a span-annotated [`Program`].
//! Trivia tokens are skipped but still count in token indices, which is
//! what the pipe-scope resolver and delimiter matcher work in.
//!
//! ## Module Structure
//!
//! - `statements` - statement dispatch, blocks, `return`
//! - `declarations` - `const`, `fn`, `sketch`, `path`
//! - `expressions` - expression entry point and pipe chains
//! - `operators` - binary operators by precedence climbing
//! - `primaries` - literals, identifiers, calls, `%`, parenthesized forms
//! - `collections` - arrays and objects
//!
//! ## Example
//!
//! ```rust
//! use kcl_parser::{lex, parser::Parser};
//!
//! let tokens = lex("const x = 1").unwrap();
//! let program = Parser::new(&tokens).parse().unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

mod collections;
mod declarations;
mod expressions;
mod operators;
mod primaries;
mod statements;

use kcl_ast::{Program, Span};
use log::debug;

use crate::delimiter::{closes_same_kind, find_closing_delimiter};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::Token;

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser over a borrowed token stream.
pub struct Parser<'t> {
    /// Token stream, trivia included.
    tokens: &'t [Token],
    /// Index of the next significant token (or `tokens.len()`).
    current: usize,
    /// Index of the last consumed token.
    last: Option<usize>,
    /// Function bodies currently open; `return` needs at least one.
    function_depth: usize,
    /// Argument lists currently open; `%` needs at least one.
    argument_depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let mut parser = Self {
            tokens,
            current: 0,
            last: None,
            function_depth: 0,
            argument_depth: 0,
        };
        parser.skip_trivia();
        parser
    }

    /// Parse the whole token stream. The first error aborts the parse.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while !self.is_at_end() {
            let statement = self.parse_statement()?;
            debug!(
                "parsed statement {} at {:?}",
                body.len(),
                statement.span()
            );
            body.push(statement);
        }
        let end = self.tokens.last().map_or(0, |t| t.span.end());
        Ok(Program::new(body, Span::new(0, end)))
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    fn skip_trivia(&mut self) {
        while self.tokens.get(self.current).map_or(false, Token::is_trivia) {
            self.current += 1;
        }
    }

    /// Current significant token.
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.current)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Consume the current token and move to the next significant one.
    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.current)?;
        self.last = Some(self.current);
        self.current += 1;
        self.skip_trivia();
        Some(token)
    }

    fn at_delimiter(&self, text: &str) -> bool {
        self.peek().map_or(false, |t| t.is_delimiter(text))
    }

    fn at_operator(&self, text: &str) -> bool {
        self.peek().map_or(false, |t| t.is_operator(text))
    }

    /// Consume a delimiter if present.
    fn eat_delimiter(&mut self, text: &str) -> bool {
        if self.at_delimiter(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_delimiter(&mut self, text: &str) -> Result<&'t Token, ParseError> {
        if self.at_delimiter(text) {
            self.advance().ok_or_else(|| self.error_here(text))
        } else {
            Err(self.error_here(&format!("'{text}'")))
        }
    }

    fn expect_operator(&mut self, text: &str) -> Result<&'t Token, ParseError> {
        if self.at_operator(text) {
            self.advance().ok_or_else(|| self.error_here(text))
        } else {
            Err(self.error_here(&format!("'{text}'")))
        }
    }

    // =========================================================================
    // ERRORS & SPANS
    // =========================================================================

    /// Zero-width span at the end of input.
    fn end_span(&self) -> Span {
        let end = self.tokens.last().map_or(0, |t| t.span.end());
        Span::new(end, end)
    }

    /// Start offset of the current token, recorded before parsing a node.
    fn start_offset(&self) -> usize {
        self.peek().map_or_else(|| self.end_span().start(), |t| t.span.start())
    }

    /// Span from `start` to the end of the last consumed token, so grouping
    /// parentheses belong to the node that consumed them.
    fn span_from(&self, start: usize) -> Span {
        let end = self.last.map_or(start, |i| self.tokens[i].span.end());
        Span::new(start, end.max(start))
    }

    /// Error for whatever sits at the current position.
    fn error_here(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::unexpected_token(&token.value, expected, token.span),
            None => ParseError::unexpected_end(expected, self.end_span()),
        }
    }

    /// Validate the group opened at `open` and return its closer's index.
    fn group_close(&self, open: usize) -> Result<usize, ParseError> {
        let opener = &self.tokens[open];
        let close = find_closing_delimiter(self.tokens, open).map_err(|_| {
            ParseError::new(
                ParseErrorKind::UnclosedDelimiter {
                    opener: opener.value.clone(),
                },
                opener.span,
            )
        })?;
        if !closes_same_kind(self.tokens, open, close) {
            return Err(ParseError::new(
                ParseErrorKind::MismatchedDelimiter {
                    opener: opener.value.clone(),
                    closer: self.tokens[close].value.clone(),
                },
                self.tokens[close].span,
            ));
        }
        Ok(close)
    }

    /// Run `f` inside a block body. Argument context never leaks into a
    /// body, and only function bodies permit `return`.
    fn in_body<T>(
        &mut self,
        is_function: bool,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = (self.function_depth, self.argument_depth);
        self.function_depth = if is_function { self.function_depth + 1 } else { 0 };
        self.argument_depth = 0;
        let result = f(self);
        (self.function_depth, self.argument_depth) = saved;
        result
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex;

    fn parse(source: &str) -> Result<Program, ParseError> {
        let tokens = lex(source).expect("lexes");
        Parser::new(&tokens).parse()
    }

    #[test]
    fn test_parse_empty() {
        let program = parse("").unwrap();
        assert!(program.body.is_empty());
        assert_eq!(program.span, Span::new(0, 0));
    }

    #[test]
    fn test_parse_trivia_only() {
        let program = parse("  // nothing\n").unwrap();
        assert!(program.body.is_empty());
        assert_eq!(program.span, Span::new(0, 13));
    }

    #[test]
    fn test_parse_multiple_statements() {
        let program = parse("a\nb(1)\n[1, 2]").unwrap();
        assert_eq!(program.body.len(), 3);
    }

    #[test]
    fn test_unclosed_delimiter() {
        let err = parse("f(1, 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedDelimiter { opener: "(".into() });
        assert_eq!(err.span, Span::new(1, 2));
    }

    #[test]
    fn test_mismatched_delimiter() {
        let err = parse("f(1, 2]").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MismatchedDelimiter { opener: "(".into(), closer: "]".into() }
        );
        assert_eq!(err.span, Span::new(6, 7));
    }

    #[test]
    fn test_unexpected_end() {
        let err = parse("const x =").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEnd { .. }));
        assert_eq!(err.span, Span::new(9, 9));
    }
}
