//! Byte-offset ranges into the parsed source.

#[cfg(test)]
#[path = "./span_tests.rs"]
mod tests;

/// A byte-offset range within a TOML document.
///
/// Every [`Error`](crate::Error) produced by the parser carries the span of
/// the offending input. Convertible to and from
/// [`Range<usize>`](std::ops::Range).
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new [`Span`] from start and end byte offsets.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered by the span.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the slice of `source` covered by this span, clamped to the
    /// bounds of `source`.
    pub fn slice<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        let end = self.end.min(source.len());
        let start = self.start.min(end);
        &source[start..end]
    }
}

impl From<Span> for (usize, usize) {
    fn from(s: Span) -> (usize, usize) {
        (s.start, s.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(s: std::ops::Range<usize>) -> Self {
        Self::new(s.start, s.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}
