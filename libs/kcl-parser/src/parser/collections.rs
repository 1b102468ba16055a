//! # Collection Parsing
//!
//! ```text
//! array  = "[" (expression ("," expression)* ","?)? "]"
//! object = "{" (identifier ":" expression ("," identifier ":" expression)* ","?)? "}"
//! ```

use kcl_ast::{ArrayExpression, Expr, Identifier, ObjectExpression, ObjectProperty};

use super::Parser;
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'t> Parser<'t> {
    pub(super) fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let close = self.group_close(self.current)?;
        let open = self.expect_delimiter("[")?;
        let elements = self.parse_comma_separated(close, |p| p.parse_expression())?;
        let end = self.expect_delimiter("]")?;
        Ok(Expr::ArrayExpression(ArrayExpression {
            elements,
            span: open.span.merge(&end.span),
        }))
    }

    pub(super) fn parse_object(&mut self) -> Result<Expr, ParseError> {
        let close = self.group_close(self.current)?;
        let open = self.expect_delimiter("{")?;
        let properties = self.parse_comma_separated(close, |p| p.parse_property())?;
        let end = self.expect_delimiter("}")?;
        Ok(Expr::ObjectExpression(ObjectExpression {
            properties,
            span: open.span.merge(&end.span),
        }))
    }

    fn parse_property(&mut self) -> Result<ObjectProperty, ParseError> {
        let key = match self.peek() {
            Some(t) if t.kind == TokenKind::Identifier => {
                self.advance();
                Identifier {
                    name: t.value.clone(),
                    span: t.span,
                }
            }
            _ => return Err(self.error_here("a property name")),
        };
        self.expect_delimiter(":")?;
        let value = self.parse_expression()?;
        Ok(ObjectProperty {
            span: self.span_from(key.span.start()),
            key,
            value,
        })
    }

    /// Items separated by commas, stopping at the group closer at `close`.
    /// The closer itself is left for the caller.
    pub(super) fn parse_comma_separated<T>(
        &mut self,
        close: usize,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        while self.current < close {
            items.push(item(self)?);
            if !self.eat_delimiter(",") {
                break;
            }
        }
        Ok(items)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::ParseErrorKind;
    use crate::lex;
    use crate::parser::Parser;
    use kcl_ast::{Expr, Span, Statement};

    fn parse_expr(source: &str) -> Expr {
        let tokens = lex(source).unwrap();
        let program = Parser::new(&tokens).parse().unwrap();
        match program.body.into_iter().next() {
            Some(Statement::ExpressionStatement(s)) => s.expression,
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_array_with_trailing_comma() {
        let Expr::ArrayExpression(a) = parse_expr("[1, 2,]") else {
            panic!("Expected array");
        };
        assert_eq!(a.elements.len(), 2);
        assert_eq!(a.span, Span::new(0, 7));
    }

    #[test]
    fn test_empty_collections() {
        assert!(matches!(parse_expr("[]"), Expr::ArrayExpression(a) if a.elements.is_empty()));
        assert!(matches!(parse_expr("{}"), Expr::ObjectExpression(o) if o.properties.is_empty()));
    }

    #[test]
    fn test_tagged_point_object() {
        let Expr::ObjectExpression(o) = parse_expr("{ to: [1, 2], tag: 'seg01' }") else {
            panic!("Expected object");
        };
        assert_eq!(o.properties.len(), 2);
        assert_eq!(o.get("tag").and_then(Expr::as_str), Some("seg01"));
        assert!(matches!(o.get("to"), Some(Expr::ArrayExpression(_))));
    }

    #[test]
    fn test_missing_separator() {
        let tokens = lex("[1 2]").unwrap();
        let err = Parser::new(&tokens).parse().unwrap_err();
        match err.kind {
            ParseErrorKind::UnexpectedToken { found, expected } => {
                assert_eq!(found, "2");
                assert_eq!(expected, "']'");
            }
            other => panic!("Expected unexpected token, got {:?}", other),
        }
    }

    #[test]
    fn test_object_needs_colon() {
        let tokens = lex("{ to [1, 2] }").unwrap();
        let err = Parser::new(&tokens).parse().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
    }
}
