//! # Pipe Scope Resolution
//!
//! Decides whether the expression around a token continues with a `|>`
//! that belongs to it. Used by the parser after every complete expression
//! and by the editor to tell which pipe a cursor position feeds into.
//!
//! Bracketed groups are opaque: a pipe nested inside `( )`, `[ ]` or `{ }`
//! never belongs to the enclosing expression.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::delimiter::find_closing_delimiter;
use crate::lexer::{next_significant, Token, TokenKind};

/// A located pipe operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeMatch {
    /// Index of the `|>` token.
    pub index: usize,
    pub token: Token,
}

/// Finds the `|>` continuing the expression at `from_index`, if any.
///
/// - At an opener the whole group is skipped and the pipe must follow it.
/// - At a callee the argument list is skipped likewise.
/// - Anywhere else tokens are scanned forward until a pipe, or until
///   something that ends the expression: a statement keyword, an
///   unmatched closer, a `,` or `:`, the end of input, or an operand that
///   directly follows another operand.
pub fn has_pipe_operator(tokens: &[Token], from_index: usize) -> Option<PipeMatch> {
    let start = tokens.get(from_index)?;

    if start.is_opener() {
        let close = find_closing_delimiter(tokens, from_index).ok()?;
        trace!("pipe scope: group {from_index}..={close} is opaque");
        return pipe_at(tokens, next_significant(tokens, close + 1)?);
    }

    if start.kind == TokenKind::Identifier {
        if let Some(open) = next_significant(tokens, from_index + 1) {
            if tokens[open].is_delimiter("(") {
                let close = find_closing_delimiter(tokens, open).ok()?;
                trace!("pipe scope: call at {from_index} ends at {close}");
                return pipe_at(tokens, next_significant(tokens, close + 1)?);
            }
        }
    }

    scan(tokens, from_index + 1, start.is_operand() || start.is_closer())
}

fn pipe_at(tokens: &[Token], index: usize) -> Option<PipeMatch> {
    let token = tokens.get(index)?;
    token.is_operator("|>").then(|| PipeMatch {
        index,
        token: token.clone(),
    })
}

fn scan(tokens: &[Token], mut index: usize, mut after_operand: bool) -> Option<PipeMatch> {
    while let Some(i) = next_significant(tokens, index) {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Operator if token.value == "|>" => {
                trace!("pipe scope: found pipe at {i}");
                return pipe_at(tokens, i);
            }
            TokenKind::Operator => {
                after_operand = false;
                index = i + 1;
            }
            TokenKind::Keyword => {
                trace!("pipe scope: statement keyword at {i}");
                return None;
            }
            TokenKind::Delimiter if token.is_opener() => {
                let close = find_closing_delimiter(tokens, i).ok()?;
                after_operand = true;
                index = close + 1;
            }
            TokenKind::Delimiter => {
                trace!("pipe scope: '{}' at {i} ends the expression", token.value);
                return None;
            }
            _ => {
                if after_operand {
                    trace!("pipe scope: new statement at {i}");
                    return None;
                }
                after_operand = true;
                index = i + 1;
            }
        }
    }
    None
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex;
    use kcl_ast::Span;

    #[test]
    fn test_pipe_after_sketch_block() {
        let code = "sketch mySketch {\n  lineTo(2, 3)\n} |> rx(45, %)\n";
        let tokens = lex(code).unwrap();
        let found = has_pipe_operator(&tokens, 0).expect("pipe");
        assert_eq!(found.index, 16);
        assert_eq!(found.token.span, Span::new(35, 37));
        assert_eq!(found.token.kind, TokenKind::Operator);
        assert_eq!(&code[35..37], "|>");
    }

    #[test]
    fn test_matches_first_pipe() {
        let code = "sketch mySketch {\n  lineTo(2, 3)\n} |> rx(45, %) |> rx(45, %)\n";
        let tokens = lex(code).unwrap();
        assert_eq!(has_pipe_operator(&tokens, 0).map(|m| m.index), Some(16));
    }

    #[test]
    fn test_new_declaration_ends_scope() {
        let code = "sketch mySketch {\n  lineTo(2, 3)\n}\nconst yo = myFunc(9)\n  |> rx(45, %)\n";
        let tokens = lex(code).unwrap();
        assert_eq!(has_pipe_operator(&tokens, 0), None);
    }

    #[test]
    fn test_binary_expression_then_pipe() {
        let code = "const myVar2 = 5 + 1 |> myFn(%)";
        let tokens = lex(code).unwrap();
        let found = has_pipe_operator(&tokens, 1).expect("pipe");
        assert_eq!(found.index, 12);
        assert_eq!(found.token.span, Span::new(21, 23));
    }

    #[test]
    fn test_call_inside_nested_declaration_and_sketch_brace() {
        let code = [
            "sketch mySk1 {",
            "  lineTo(1,1)",
            "  path myPath = lineTo(0, 1)",
            "  lineTo(1,1)",
            "} |> rx(90, %)",
            "show(mySk1)",
        ]
        .join("\n");
        let tokens = lex(&code).unwrap();
        let my_path = tokens.iter().position(|t| t.value == "myPath").unwrap();
        let line_to = tokens
            .iter()
            .enumerate()
            .position(|(i, t)| t.value == "lineTo" && i > my_path)
            .unwrap();
        assert_eq!(has_pipe_operator(&tokens, line_to), None);

        let brace = tokens.iter().position(|t| t.value == "{").unwrap();
        let found = has_pipe_operator(&tokens, brace).expect("pipe");
        assert_eq!(found.index, 36);
        assert_eq!(found.token.span, Span::new(74, 76));
    }

    #[test]
    fn test_argument_separator_ends_scope() {
        let tokens = lex("f(a, b |> g(%))").unwrap();
        // from `a`
        assert_eq!(has_pipe_operator(&tokens, 2), None);
        // from `b`
        assert!(has_pipe_operator(&tokens, 5).is_some());
    }

    #[test]
    fn test_out_of_range_start() {
        let tokens = lex("a |> b(%)").unwrap();
        assert_eq!(has_pipe_operator(&tokens, 42), None);
    }
}
