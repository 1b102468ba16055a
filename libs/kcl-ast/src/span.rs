//! # Source Span
//!
//! Byte range `[start, end)` of the source text a node was parsed from.
//! Serialized flat as `start`/`end` on the owning node, which is the shape
//! the editor highlights from.
//!
//! ```rust
//! use kcl_ast::Span;
//!
//! // "lineTo" in "lineTo(1, 2)"
//! let callee = Span::new(0, 6);
//! assert_eq!(callee.slice("lineTo(1, 2)"), Some("lineTo"));
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Nodes synthesized by AST rewrites carry `Span::default()` until the
/// program is printed and parsed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Zero-width spans, including every synthesized node's.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both.
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Whether the byte at `offset` lies inside; `end` is exclusive.
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        (self.start..self.end).contains(&offset)
    }

    /// Whether `other` lies entirely inside this span. Equal spans enclose
    /// each other.
    #[inline]
    pub fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The covered text, or `None` when out of bounds or off a char boundary.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_span_is_empty() {
        assert!(Span::new(10, 5).is_empty());
        assert_eq!(Span::new(10, 5).len(), 0);
        assert!(Span::default().is_empty());
    }

    #[test]
    fn test_merge_covers_gap() {
        let callee = Span::new(52, 57);
        let closer = Span::new(62, 63);
        assert_eq!(callee.merge(&closer), Span::new(52, 63));
        assert_eq!(closer.merge(&callee), Span::new(52, 63));
    }

    #[test]
    fn test_contains_excludes_end() {
        let span = Span::new(5, 10);
        assert!(span.contains(5));
        assert!(!span.contains(10));
    }

    #[test]
    fn test_encloses() {
        let declaration = Span::new(0, 36);
        assert!(declaration.encloses(&Span::new(14, 36)));
        assert!(declaration.encloses(&declaration));
        assert!(!declaration.encloses(&Span::new(30, 37)));
    }

    #[test]
    fn test_slice_and_range() {
        let source = "const a = 1";
        assert_eq!(Span::new(6, 7).slice(source), Some("a"));
        assert_eq!(Span::new(6, 70).slice(source), None);
        assert_eq!(Range::from(Span::new(6, 7)), 6..7);
    }
}
