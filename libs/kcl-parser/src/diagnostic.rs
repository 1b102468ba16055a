use kcl_ast::Span;
use serde::{Deserialize, Serialize};

use crate::error::{LexError, ParseErrorKind, SyntaxError};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message with severity and location, ready for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            span,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    /// 1-based line and column (in characters) where the span starts.
    ///
    /// An offset past the end of `source` is clamped to the end.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let mut offset = self.span.start().min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (line, before[line_start..].chars().count() + 1)
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(error: &SyntaxError) -> Self {
        let (message, hint) = match error {
            SyntaxError::Lex(e) => (e.to_string(), lex_hint(e)),
            SyntaxError::Parse(e) => (e.kind.to_string(), parse_hint(&e.kind)),
        };
        let diagnostic = Diagnostic::error(message, error.span());
        match hint {
            Some(hint) => diagnostic.with_hint(hint),
            None => diagnostic,
        }
    }
}

fn lex_hint(error: &LexError) -> Option<&'static str> {
    match error {
        LexError::UnterminatedString { .. } => Some("close the string with the same quote it opens with"),
        LexError::UnterminatedComment { .. } => Some("block comments end with */"),
        LexError::UnexpectedCharacter { .. } => None,
    }
}

fn parse_hint(kind: &ParseErrorKind) -> Option<&'static str> {
    match kind {
        ParseErrorKind::MisplacedSubstitution => {
            Some("use % as a call argument in a stage after |>")
        }
        ParseErrorKind::ReturnOutsideFunction => Some("return is only valid inside fn bodies"),
        ParseErrorKind::MismatchedDelimiter { .. } | ParseErrorKind::UnclosedDelimiter { .. } => {
            Some("check that every (, [ and { has a matching closer")
        }
        _ => None,
    }
}
