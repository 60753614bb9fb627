use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into a markup or plain-text string.
///
/// Parsed nodes store spans rather than copied text, enabling lossless
/// round-trip: slicing the source with any span reproduces the exact bytes.
/// Spans produced by this crate always sit on UTF-8 char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Slices `src` with this span.
    ///
    /// # Panics
    /// Panics if the span is out of bounds or not on char boundaries.
    pub fn slice(self, src: &str) -> &str {
        &src[self.start..self.end]
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_saturates_on_inverted_span() {
        assert_eq!(Span::new(5, 2).len(), 0);
        assert!(Span::new(5, 2).is_empty());
    }

    #[test]
    fn contains_is_inclusive_of_edges() {
        let outer = Span::new(2, 10);
        assert!(outer.contains(Span::new(2, 10)));
        assert!(outer.contains(Span::new(4, 6)));
        assert!(!outer.contains(Span::new(1, 6)));
        assert!(!outer.contains(Span::new(4, 11)));
    }

    #[test]
    fn slice_returns_exact_bytes() {
        let src = "The [[Sun]] is";
        assert_eq!(Span::new(4, 11).slice(src), "[[Sun]]");
    }
}
