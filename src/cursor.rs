//! Byte cursor with line and column tracking.

#[cfg(test)]
#[path = "./cursor_tests.rs"]
mod tests;

/// A snapshot of the cursor location, used to anchor diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in bytes.
    pub column: usize,
}

/// Forward-only reader over an immutable byte buffer.
///
/// Lines and columns are maintained incrementally: consuming `\n` moves to
/// column 1 of the next line, any other byte moves one column right.
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Cursor {
            bytes,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The whole input.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Current byte, or `None` once the input is exhausted.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    /// Byte `n` positions ahead of the current one.
    #[inline]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.offset + n).copied()
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.offset.min(self.bytes.len())..]
    }

    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consumes one byte. Does nothing at end of input.
    #[inline]
    pub fn advance(&mut self) {
        let Some(b) = self.peek() else {
            return;
        };
        self.offset += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Consumes `b` if it is the current byte.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `prefix` if the remaining input starts with it.
    pub fn eat_slice(&mut self, prefix: &[u8]) -> bool {
        if self.starts_with(prefix) {
            self.advance_n(prefix.len());
            true
        } else {
            false
        }
    }

    /// Consumes a `\n` or `\r\n` line ending.
    pub fn eat_newline(&mut self) -> bool {
        match self.peek() {
            Some(b'\n') => {
                self.advance();
                true
            }
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => {
                self.advance_n(2);
                true
            }
            _ => false,
        }
    }

    /// Consumes spaces and tabs.
    pub fn eat_whitespace(&mut self) {
        while let Some(b' ' | b'\t') = self.peek() {
            self.advance();
        }
    }

    /// Consumes bytes up to, but not including, the next `\n`.
    pub fn skip_to_line_end(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.advance();
        }
    }
}
