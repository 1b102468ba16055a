//! # Declaration Parsing
//!
//! ```text
//! declaration = ("const" | "path") identifier "=" expression
//!             | "fn" identifier "=" function
//!             | "sketch" identifier "="? block ("|>" stage)*
//! ```

use kcl_ast::{
    DeclarationKind, Expr, Identifier, SketchExpression, Statement, VariableDeclaration,
    VariableDeclarator,
};

use super::Parser;
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'t> Parser<'t> {
    /// Parse a declaration; the current token is its keyword.
    pub(super) fn parse_declaration(&mut self, kind: DeclarationKind) -> Result<Statement, ParseError> {
        let keyword = self
            .advance()
            .ok_or_else(|| self.error_here(kind.keyword()))?;

        let id = match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Identifier {
                    name: token.value.clone(),
                    span: token.span,
                }
            }
            Some(token) => {
                return Err(ParseError::malformed_declaration(
                    format!("expected a name after '{}', found '{}'", kind.keyword(), token.value),
                    token.span,
                ))
            }
            None => {
                return Err(ParseError::malformed_declaration(
                    format!("expected a name after '{}'", kind.keyword()),
                    self.end_span(),
                ))
            }
        };

        let init = match kind {
            DeclarationKind::Sketch => self.parse_sketch_init(&id)?,
            DeclarationKind::Fn => self.parse_function_init(&id)?,
            DeclarationKind::Const | DeclarationKind::Path => {
                self.expect_assignment(kind, &id)?;
                self.parse_expression()?
            }
        };

        let declarator = VariableDeclarator {
            span: self.span_from(id.span.start()),
            id,
            init,
        };
        Ok(Statement::VariableDeclaration(VariableDeclaration {
            kind,
            span: self.span_from(keyword.span.start()),
            declarations: vec![declarator],
        }))
    }

    fn expect_assignment(&mut self, kind: DeclarationKind, id: &Identifier) -> Result<(), ParseError> {
        if self.at_operator("=") {
            self.advance();
            Ok(())
        } else {
            let span = self.peek().map_or_else(|| self.end_span(), |t| t.span);
            Err(ParseError::malformed_declaration(
                format!("expected '=' after {} '{}'", kind.keyword(), id.name),
                span,
            ))
        }
    }

    /// `sketch name { ... }`, `=` optional, followed by any pipe stages.
    fn parse_sketch_init(&mut self, id: &Identifier) -> Result<Expr, ParseError> {
        if self.at_operator("=") {
            self.advance();
        }
        if !self.at_delimiter("{") {
            let span = self.peek().map_or_else(|| self.end_span(), |t| t.span);
            return Err(ParseError::malformed_declaration(
                format!("sketch '{}' needs a '{{ ... }}' body", id.name),
                span,
            ));
        }
        let open = self.current;
        let start = self.start_offset();
        let body = self.in_body(false, |p| p.parse_block())?;
        let sketch = Expr::SketchExpression(SketchExpression {
            span: body.span,
            body,
        });
        self.parse_pipe_tail(sketch, start, open)
    }

    /// `fn name = (params) => { ... }`.
    fn parse_function_init(&mut self, id: &Identifier) -> Result<Expr, ParseError> {
        self.expect_assignment(DeclarationKind::Fn, id)?;
        let start = self.start_offset();
        match self.parse_expression()? {
            init @ Expr::FunctionExpression(_) => Ok(init),
            other => Err(ParseError::malformed_declaration(
                format!(
                    "fn '{}' must be initialized with a function, found {}",
                    id.name,
                    other.type_name()
                ),
                self.span_from(start),
            )),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
