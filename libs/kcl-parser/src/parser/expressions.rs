//! # Expression Parsing
//!
//! Entry point for expressions. A full expression is a binary expression
//! optionally continued by `|>` stages:
//!
//! ```text
//! expression = binary ("|>" binary)*
//! ```
//!
//! Whether a `|>` continues the expression is decided by the pipe-scope
//! resolver, the same one the editor uses.

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use kcl_ast::{Expr, PipeExpression, Precedence};
use log::trace;
use stacker::maybe_grow;

use super::Parser;
use crate::error::ParseError;
use crate::pipe_scope::has_pipe_operator;

impl<'t> Parser<'t> {
    /// Parse an expression, pipes included.
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let start = self.start_offset();
            let first = self.parse_precedence(Precedence::Comparison)?;
            let from = self.last.unwrap_or(0);
            self.parse_pipe_tail(first, start, from)
        })
    }

    /// Collect pipe stages after `first`, which began at byte `start`.
    /// `from` is the token index the resolver starts at: the last token of
    /// `first`, or a sketch's `{`.
    pub(super) fn parse_pipe_tail(
        &mut self,
        first: Expr,
        start: usize,
        from: usize,
    ) -> Result<Expr, ParseError> {
        let mut stages = Vec::new();
        let mut from = from;
        while let Some(found) = has_pipe_operator(self.tokens, from) {
            // a pipe further ahead belongs to a later statement
            if found.index != self.current {
                break;
            }
            trace!("pipe stage {} at token {}", stages.len() + 1, found.index);
            self.advance();
            stages.push(self.parse_precedence(Precedence::Comparison)?);
            from = self.last.unwrap_or(found.index);
        }

        if stages.is_empty() {
            return Ok(first);
        }
        let span = self.span_from(start);
        let mut body = Vec::with_capacity(stages.len() + 1);
        body.push(first);
        body.extend(stages);
        Ok(Expr::PipeExpression(PipeExpression { body, span }))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::lex;
    use crate::parser::Parser;
    use kcl_ast::{Expr, Span, Statement};

    fn parse_expr(source: &str) -> Expr {
        let full = format!("const x = {source}");
        let tokens = lex(&full).unwrap();
        let program = Parser::new(&tokens).parse().unwrap();
        match program.body.into_iter().next() {
            Some(Statement::VariableDeclaration(mut d)) => d.declarations.remove(0).init,
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_pipe_chain() {
        let expr = parse_expr("5 + 6 |> myFunc(45, %) |> other(%)");
        let Expr::PipeExpression(pipe) = expr else {
            panic!("Expected pipe");
        };
        assert_eq!(pipe.body.len(), 3);
        assert!(matches!(pipe.body[0], Expr::BinaryExpression(_)));
        // from first stage start to last stage end
        assert_eq!(pipe.span, Span::new(10, 44));
    }

    #[test]
    fn test_no_pipe_yields_bare_expression() {
        assert!(matches!(parse_expr("f(1)"), Expr::CallExpression(_)));
    }

    #[test]
    fn test_pipe_on_next_line_continues() {
        let expr = parse_expr("start()\n  |> lineTo(1, %)");
        assert!(matches!(expr, Expr::PipeExpression(_)));
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let depth = 2000;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(matches!(parse_expr(&source), Expr::Literal(_)));
    }
}
