//! # Delimiter Matching
//!
//! Finds the closer that balances an opening `(`, `{` or `[`.
//!
//! Matching counts depth across all three kinds together; it does not
//! check that a `(` is closed by a `)`. [`closes_same_kind`] is the
//! separate check the parser uses to report such mismatches.
//!
//! ## Example
//!
//! ```rust
//! use kcl_parser::{lex, find_closing_delimiter};
//!
//! let tokens = lex("( hey )").unwrap();
//! assert_eq!(find_closing_delimiter(&tokens, 0), Ok(4));
//! ```

use crate::error::DelimiterError;
use crate::lexer::Token;

/// Index of the token that brings nesting depth back to zero.
///
/// ## Parameters
///
/// - `tokens`: Full token stream, trivia included
/// - `open_index`: Index of an opening delimiter
pub fn find_closing_delimiter(tokens: &[Token], open_index: usize) -> Result<usize, DelimiterError> {
    match tokens.get(open_index) {
        Some(token) if token.is_opener() => {}
        _ => return Err(DelimiterError::NotAnOpener { index: open_index }),
    }

    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open_index) {
        if token.is_opener() {
            depth += 1;
        } else if token.is_closer() {
            depth -= 1;
            if depth == 0 {
                return Ok(index);
            }
        }
    }
    Err(DelimiterError::Unclosed { index: open_index })
}

/// Whether the closer at `close` is the counterpart of the opener at `open`.
pub fn closes_same_kind(tokens: &[Token], open: usize, close: usize) -> bool {
    let pair = (
        tokens.get(open).map(|t| t.value.as_str()),
        tokens.get(close).map(|t| t.value.as_str()),
    );
    matches!(
        pair,
        (Some("("), Some(")")) | (Some("{"), Some("}")) | (Some("["), Some("]"))
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex;

    #[test]
    fn test_simple_parens() {
        let tokens = lex("( hey )").unwrap();
        assert_eq!(find_closing_delimiter(&tokens, 0), Ok(4));
    }

    #[test]
    fn test_nested_parens() {
        let code = "(indexForBracketToRightOfThisIsTwo(shouldBeFour)AndNotThisSix)";
        let tokens = lex(code).unwrap();
        assert_eq!(find_closing_delimiter(&tokens, 2), Ok(4));
        assert_eq!(find_closing_delimiter(&tokens, 0), Ok(6));
    }

    #[test]
    fn test_mixed_kinds_count_depth_only() {
        let code = "{a{b{c(}d]}eathou athoeu tah u} thatOneToTheLeftIsLast }";
        let tokens = lex(code).unwrap();
        assert_eq!(find_closing_delimiter(&tokens, 0), Ok(18));
        assert!(!closes_same_kind(&tokens, 6, 7));
        assert!(closes_same_kind(&tokens, 0, 18));
    }

    #[test]
    fn test_not_an_opener() {
        let tokens = lex("{a{b{c(}d]}eathou").unwrap();
        assert_eq!(
            find_closing_delimiter(&tokens, 1),
            Err(DelimiterError::NotAnOpener { index: 1 })
        );
        assert_eq!(
            find_closing_delimiter(&tokens, 99),
            Err(DelimiterError::NotAnOpener { index: 99 })
        );
    }

    #[test]
    fn test_unclosed() {
        let tokens = lex("f(1, [2, 3]").unwrap();
        assert_eq!(
            find_closing_delimiter(&tokens, 1),
            Err(DelimiterError::Unclosed { index: 1 })
        );
    }
}
