//! # Primary Expressions
//!
//! ```text
//! primary = number | "-" number | string
//!         | identifier | identifier "(" arguments ")"
//!         | "%"
//!         | "(" expression ")"
//!         | "(" params ")" "=>" block
//!         | array | object
//! ```

use kcl_ast::{
    CallExpression, Expr, FunctionExpression, Identifier, Literal, LiteralValue, PipeSubstitution,
};

use super::Parser;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{next_significant, Token, TokenKind};

impl<'t> Parser<'t> {
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().ok_or_else(|| self.error_here("an expression"))?;
        match token.kind {
            TokenKind::Number => {
                self.advance();
                number_literal(token, None)
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Literal(string_literal(token)))
            }
            TokenKind::Identifier => self.parse_identifier_or_call(),
            TokenKind::Operator if token.value == "-" => self.parse_negative_number(),
            TokenKind::Operator if token.value == "%" => {
                if self.argument_depth == 0 {
                    return Err(ParseError::new(ParseErrorKind::MisplacedSubstitution, token.span));
                }
                self.advance();
                Ok(Expr::PipeSubstitution(PipeSubstitution { span: token.span }))
            }
            TokenKind::Delimiter if token.value == "(" => self.parse_parenthesized(),
            TokenKind::Delimiter if token.value == "[" => self.parse_array(),
            TokenKind::Delimiter if token.value == "{" => self.parse_object(),
            _ => Err(self.error_here("an expression")),
        }
    }

    /// `-` glued to a number becomes one negative literal.
    fn parse_negative_number(&mut self) -> Result<Expr, ParseError> {
        let tokens = self.tokens;
        let minus = &tokens[self.current];
        match tokens.get(self.current + 1) {
            Some(number)
                if number.kind == TokenKind::Number && number.span.start() == minus.span.end() =>
            {
                self.advance();
                self.advance();
                number_literal(number, Some(minus))
            }
            _ => Err(self.error_here("an expression")),
        }
    }

    fn parse_identifier_or_call(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance().ok_or_else(|| self.error_here("an identifier"))?;
        let callee = Identifier {
            name: token.value.clone(),
            span: token.span,
        };
        if !self.at_delimiter("(") {
            return Ok(Expr::Identifier(callee));
        }

        let close = self.group_close(self.current)?;
        self.advance();
        self.argument_depth += 1;
        let arguments = self.parse_comma_separated(close, |p| p.parse_expression());
        self.argument_depth -= 1;
        let arguments = arguments?;
        let end = self.expect_delimiter(")")?;

        Ok(Expr::CallExpression(CallExpression {
            span: callee.span.merge(&end.span),
            callee,
            arguments,
            optional: false,
        }))
    }

    /// `( expression )`, or an arrow function when `=>` follows the `)`.
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        let open = self.current;
        let close = self.group_close(open)?;
        let is_function = next_significant(self.tokens, close + 1)
            .map_or(false, |i| self.tokens[i].is_operator("=>"));

        if is_function {
            return self.parse_function(close);
        }

        self.advance();
        let inner = self.parse_expression()?;
        self.expect_delimiter(")")?;
        Ok(inner)
    }

    fn parse_function(&mut self, close: usize) -> Result<Expr, ParseError> {
        let open = self.expect_delimiter("(")?;
        let params = self.parse_comma_separated(close, |p| match p.peek() {
            Some(t) if t.kind == TokenKind::Identifier => {
                p.advance();
                Ok(Identifier {
                    name: t.value.clone(),
                    span: t.span,
                })
            }
            _ => Err(p.error_here("a parameter name")),
        })?;
        self.expect_delimiter(")")?;
        self.expect_operator("=>")?;
        let body = self.in_body(true, |p| p.parse_block())?;

        Ok(Expr::FunctionExpression(FunctionExpression {
            span: open.span.merge(&body.span),
            params,
            body,
        }))
    }
}

fn number_literal(token: &Token, minus: Option<&Token>) -> Result<Expr, ParseError> {
    let (raw, span) = match minus {
        Some(m) => (format!("-{}", token.value), m.span.merge(&token.span)),
        None => (token.value.clone(), token.span),
    };
    let value = raw.parse::<f64>().map_err(|_| {
        ParseError::new(ParseErrorKind::InvalidNumber { text: raw.clone() }, span)
    })?;
    Ok(Expr::Literal(Literal {
        value: LiteralValue::Number(value),
        raw,
        span,
    }))
}

/// Strip the surrounding quotes; the lexer guarantees both are present.
fn string_literal(token: &Token) -> Literal {
    let text = &token.value;
    let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
    Literal {
        value: LiteralValue::String(inner.to_string()),
        raw: text.clone(),
        span: token.span,
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
    use kcl_ast::{Expr, LiteralValue, Span, Statement};

    fn parse_expr(source: &str) -> Expr {
        let tokens = lex(source).unwrap();
        let program = Parser::new(&tokens).parse().unwrap();
        match program.body.into_iter().next() {
            Some(Statement::ExpressionStatement(s)) => s.expression,
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_literal_folds() {
        let Expr::ArrayExpression(array) = parse_expr("[-1.5, 2]") else {
            panic!("Expected array");
        };
        let Expr::Literal(lit) = &array.elements[0] else {
            panic!("Expected literal");
        };
        assert_eq!(lit.raw, "-1.5");
        assert_eq!(lit.value, LiteralValue::Number(-1.5));
        assert_eq!(lit.span, Span::new(1, 5));
    }

    #[test]
    fn test_detached_minus_is_rejected() {
        let tokens = lex("[- 1]").unwrap();
        let err = Parser::new(&tokens).parse().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    fn test_call_with_string_argument() {
        let Expr::CallExpression(call) = parse_expr("log(5, \"hello\", aIdentifier)") else {
            panic!("Expected call");
        };
        assert_eq!(call.span, Span::new(0, 28));
        assert!(!call.optional);
        let Expr::Literal(hello) = &call.arguments[1] else {
            panic!("Expected literal");
        };
        assert_eq!(hello.value, LiteralValue::String("hello".into()));
        assert_eq!(hello.raw, "\"hello\"");
        assert_eq!(hello.span, Span::new(7, 14));
        assert!(matches!(call.arguments[2], Expr::Identifier(_)));
    }

    #[test]
    fn test_substitution_outside_arguments() {
        let tokens = lex("const a = %").unwrap();
        let err = Parser::new(&tokens).parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MisplacedSubstitution);
        assert_eq!(err.span, Span::new(10, 11));
    }

    #[test]
    fn test_substitution_inside_nested_array_argument() {
        let Expr::CallExpression(call) = parse_expr("lineTo([%, 1])") else {
            panic!("Expected call");
        };
        assert!(matches!(call.arguments[0], Expr::ArrayExpression(_)));
    }

    #[test]
    fn test_parenthesized_expression_keeps_inner_node() {
        let expr = parse_expr("(1 + 2) * 3");
        let Expr::BinaryExpression(b) = expr else {
            panic!("Expected binary");
        };
        assert!(matches!(*b.left, Expr::BinaryExpression(_)));
    }

    #[test]
    fn test_arrow_function_params() {
        let Expr::FunctionExpression(f) = parse_expr("(a, b) => {\n  return a + b\n}") else {
            panic!("Expected function");
        };
        let names: Vec<_> = f.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(f.body.body.len(), 1);
    }

    #[test]
    fn test_keyword_is_not_an_expression() {
        let tokens = lex("f(const)").unwrap();
        let err = Parser::new(&tokens).parse().unwrap_err();
        match err.kind {
            ParseErrorKind::UnexpectedToken { found, .. } => assert_eq!(found, "const"),
            other => panic!("Expected unexpected token, got {:?}", other),
        }
    }
}
