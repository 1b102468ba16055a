//! # Statement Parsing
//!
//! ```text
//! statement = declaration
//!           | "return" expression
//!           | expression
//! block     = "{" statement* "}"
//! ```

use kcl_ast::{
    BlockStatement, DeclarationKind, ExpressionStatement, ReturnStatement, Statement,
};

use super::Parser;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;

impl<'t> Parser<'t> {
    /// Parse one statement starting at the current token.
    pub(super) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.peek().ok_or_else(|| self.error_here("a statement"))?;
        if token.kind == TokenKind::Keyword {
            if let Some(kind) = DeclarationKind::from_keyword(&token.value) {
                return self.parse_declaration(kind);
            }
            if token.value == "return" {
                return self.parse_return();
            }
        }
        self.parse_expression_statement()
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.start_offset();
        let expression = self.parse_expression()?;
        Ok(Statement::ExpressionStatement(ExpressionStatement {
            span: self.span_from(start),
            expression,
        }))
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance().ok_or_else(|| self.error_here("'return'"))?;
        if self.function_depth == 0 {
            return Err(ParseError::new(
                ParseErrorKind::ReturnOutsideFunction,
                keyword.span,
            ));
        }
        let argument = self.parse_expression()?;
        Ok(Statement::ReturnStatement(ReturnStatement {
            span: self.span_from(keyword.span.start()),
            argument,
        }))
    }

    /// Parse `{ statement* }` at the current `{`.
    pub(super) fn parse_block(&mut self) -> Result<BlockStatement, ParseError> {
        if !self.at_delimiter("{") {
            return Err(self.error_here("'{'"));
        }
        let close = self.group_close(self.current)?;
        let open = self.expect_delimiter("{")?;

        let mut body = Vec::new();
        while self.current < close {
            body.push(self.parse_statement()?);
        }
        let end = self.expect_delimiter("}")?;

        Ok(BlockStatement {
            body,
            span: open.span.merge(&end.span),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
