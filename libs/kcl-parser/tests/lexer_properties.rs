//! # Lexer Properties
//!
//! Tokens partition the source: every byte belongs to exactly one token,
//! in order, so offsets computed from tokens are offsets into the text.

use quickcheck::{QuickCheck, TestResult};
use kcl_parser::{lex, TokenKind};

const FRAGMENTS: &[&str] = &[
    "const", "sketch", "path", "fn", "return", " ", "\n", "\t", "x", "lineTo", "_a1", "12",
    "3.5", "(", ")", "{", "}", "[", "]", ",", ":", "|>", "=>", "==", "!=", "<=", ">=", "<", ">",
    "=", "+", "-", "*", "%", "'s'", "\"t\"", "// note\n", "/* block */",
];

fn build(choices: &[u8]) -> String {
    choices
        .iter()
        .map(|c| FRAGMENTS[*c as usize % FRAGMENTS.len()])
        .collect()
}

#[test]
fn test_prop_tokens_reconstruct_source() {
    fn prop(choices: Vec<u8>) -> TestResult {
        let source = build(&choices);
        let tokens = match lex(&source) {
            Ok(tokens) => tokens,
            Err(_) => return TestResult::discard(),
        };
        let mut offset = 0;
        for token in &tokens {
            if token.span.start() != offset || token.span.end() <= token.span.start() {
                return TestResult::failed();
            }
            if &source[token.span.start()..token.span.end()] != token.value {
                return TestResult::failed();
            }
            offset = token.span.end();
        }
        TestResult::from_bool(offset == source.len())
    }
    QuickCheck::new().tests(200).max_tests(2000).quickcheck(prop as fn(Vec<u8>) -> TestResult);
}

/// Source text with whitespace and comments removed, computed from the
/// fragments rather than from the lexer.
fn without_trivia(choices: &[u8]) -> String {
    choices
        .iter()
        .map(|c| FRAGMENTS[*c as usize % FRAGMENTS.len()])
        .filter(|f| !f.trim().is_empty() && !f.starts_with("//") && !f.starts_with("/*"))
        .collect()
}

#[test]
fn test_prop_significant_tokens_drop_only_trivia() {
    fn prop(choices: Vec<u8>) -> TestResult {
        let source = build(&choices);
        let Ok(tokens) = lex(&source) else {
            return TestResult::discard();
        };
        let significant: String = tokens
            .iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.value.as_str())
            .collect();
        let trivia_ok = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Whitespace)
            .all(|t| t.value.chars().all(char::is_whitespace));
        TestResult::from_bool(trivia_ok && significant == without_trivia(&choices))
    }
    QuickCheck::new().tests(200).quickcheck(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn test_significant_text_of_commented_source() {
    let source = "const a = 1 // one
/* two */ lineTo([a, 2], %)";
    let significant: String = lex(source)
        .unwrap()
        .iter()
        .filter(|t| !t.is_trivia())
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(significant, "consta=1lineTo([a,2],%)");
}

#[test]
fn test_fragments_alone_always_lex() {
    for fragment in FRAGMENTS {
        assert!(lex(fragment).is_ok(), "{fragment:?} failed to lex");
    }
}
