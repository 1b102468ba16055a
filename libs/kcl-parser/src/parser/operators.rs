//! # Operator Parsing
//!
//! Parses binary operators using precedence climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | == != < > <= >= | Left |
//! | 2 | + - | Left |
//! | 3 | * / | Left |
//!
//! There are no unary operators; `-` directly before a number is folded
//! into the literal by the primary parser.

use kcl_ast::{BinaryExpression, BinaryOperator, Expr, Precedence};

use super::Parser;
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'t> Parser<'t> {
    /// Parse expression with minimum precedence.
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> Result<Expr, ParseError> {
        let start = self.start_offset();
        let mut left = self.parse_primary()?;

        while let Some(operator) = self.peek_binary_operator() {
            let prec = operator.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_precedence(prec.next())?;
            left = Expr::BinaryExpression(BinaryExpression {
                span: self.span_from(start),
                left: Box::new(left),
                operator,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    /// Binary operator at the current position, if any.
    fn peek_binary_operator(&self) -> Option<BinaryOperator> {
        self.peek()
            .filter(|t| t.kind == TokenKind::Operator)
            .and_then(|t| BinaryOperator::from_symbol(&t.value))
    }
}

// =============================================================================
// TESTS
// =============================================================================
