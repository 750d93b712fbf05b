//! Document grammar: the driver, key-value lines, table headers, and the
//! recursive value, array and inline-table parsers.
//!
//! The lexical scanners live in `string.rs` and `number.rs` as further
//! `impl Parser` blocks.

use crate::cursor::{Cursor, Position};
use crate::string::char_at;
use crate::{Array, Error, ErrorKind, Span, Table, Value, path};

/// Arrays and inline tables nested deeper than this are rejected.
pub(crate) const MAX_RECURSION_DEPTH: u16 = 256;

/// Zero-sized failure marker. When a method returns `Err(ParseError)` the
/// error details have already been recorded on the [`Parser`].
#[derive(Copy, Clone, Debug)]
pub(crate) struct ParseError;

struct Failure {
    kind: ErrorKind,
    span: Span,
    line: usize,
    column: usize,
}

pub(crate) struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    failure: Option<Failure>,
    depth: u16,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Parser {
            cursor: Cursor::new(bytes),
            failure: None,
            depth: 0,
        }
    }

    // -- error helpers ------------------------------------------------------

    #[cold]
    pub(crate) fn set_error(&mut self, at: Position, end: Option<usize>, kind: ErrorKind) -> ParseError {
        let len = self.cursor.bytes().len();
        let start = at.offset.min(len);
        let end = end.unwrap_or(start + 1).clamp(start, len);
        self.failure = Some(Failure {
            kind,
            span: Span::new(start, end),
            line: at.line,
            column: at.column,
        });
        ParseError
    }

    /// Records an error anchored at the cursor.
    pub(crate) fn error_here(&mut self, kind: ErrorKind) -> ParseError {
        let at = self.cursor.position();
        self.set_error(at, None, kind)
    }

    /// Records an "expected X, found Y" error describing the token at the
    /// cursor.
    pub(crate) fn wanted(&mut self, expected: &'static str) -> ParseError {
        let at = self.cursor.position();
        let (found, end) = self.scan_token_desc_and_end();
        self.set_error(at, Some(end), ErrorKind::Wanted { expected, found })
    }

    fn unexpected_char(&mut self) -> ParseError {
        let c = char_at(self.cursor.rest());
        self.error_here(ErrorKind::Unexpected(c))
    }

    fn take_error(&mut self) -> Error {
        match self.failure.take() {
            Some(failure) => Error {
                kind: failure.kind,
                span: failure.span,
                line_info: Some((failure.line, failure.column)),
                source_name: None,
            },
            None => Error::custom("parse failed without recording an error", Span::default()),
        }
    }

    /// Describes the token at the cursor and where it ends.
    fn scan_token_desc_and_end(&self) -> (&'static str, usize) {
        let bytes = self.cursor.bytes();
        let offset = self.cursor.offset();
        let Some(b) = self.cursor.peek() else {
            return ("eof", bytes.len());
        };
        let run_end = |pred: fn(u8) -> bool| {
            let mut end = offset + 1;
            while end < bytes.len() && pred(bytes[end]) {
                end += 1;
            }
            end
        };
        match b {
            b'\n' | b'\r' => ("a newline", offset + 1),
            b' ' | b'\t' => ("whitespace", run_end(|b| b == b' ' || b == b'\t')),
            b'#' => ("a comment", offset + 1),
            b'=' => ("an equals", offset + 1),
            b'.' => ("a period", offset + 1),
            b',' => ("a comma", offset + 1),
            b':' => ("a colon", offset + 1),
            b'+' => ("a plus", offset + 1),
            b'{' => ("a left brace", offset + 1),
            b'}' => ("a right brace", offset + 1),
            b'[' => ("a left bracket", offset + 1),
            b']' => ("a right bracket", offset + 1),
            b'\'' | b'"' => ("a string", offset + 1),
            b if is_keylike_byte(b) => ("an identifier", run_end(is_keylike_byte)),
            _ => ("a character", offset + 1),
        }
    }

    // -- trivia -------------------------------------------------------------

    /// Skips spaces, tabs, line endings and comments.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_whitespace();
            if self.cursor.eat_newline() {
                continue;
            }
            if self.cursor.peek() == Some(b'#') {
                self.cursor.skip_to_line_end();
                continue;
            }
            return;
        }
    }

    /// Consumes the rest of a key-value line: spaces, tabs, an optional
    /// comment, an optional `\r`, then a `\n` or the end of input.
    fn line_end(&mut self) -> Result<(), ParseError> {
        self.cursor.eat_whitespace();
        if self.cursor.peek() == Some(b'#') {
            self.cursor.skip_to_line_end();
        }
        self.cursor.eat(b'\r');
        if self.cursor.at_end() || self.cursor.eat(b'\n') {
            Ok(())
        } else {
            Err(self.wanted("newline"))
        }
    }

    /// Like [`Self::line_end`] but also tolerates stray carriage returns
    /// between the closing bracket and the comment.
    fn header_end(&mut self) -> Result<(), ParseError> {
        while let Some(b' ' | b'\t' | b'\r') = self.cursor.peek() {
            self.cursor.advance();
        }
        if self.cursor.peek() == Some(b'#') {
            self.cursor.skip_to_line_end();
        }
        if self.cursor.at_end() || self.cursor.eat(b'\n') {
            Ok(())
        } else {
            Err(self.wanted("newline"))
        }
    }

    // -- document -----------------------------------------------------------

    fn document(&mut self, root: &mut Table) -> Result<(), ParseError> {
        self.cursor.eat_slice(b"\xEF\xBB\xBF");
        loop {
            self.skip_trivia();
            match self.cursor.peek() {
                None => return Ok(()),
                Some(b'[') => self.table_section(root)?,
                Some(b) if is_keylike_byte(b) || b == b'"' || b == b'\'' => {
                    self.key_values(root)?
                }
                Some(_) => return Err(self.unexpected_char()),
            }
        }
    }

    /// Parses `key = value` lines into `table` until something other than a
    /// key starts a line.
    fn key_values(&mut self, table: &mut Table) -> Result<(), ParseError> {
        loop {
            self.skip_trivia();
            match self.cursor.peek() {
                Some(b) if is_keylike_byte(b) || b == b'"' || b == b'\'' => {}
                _ => return Ok(()),
            }
            self.key_value(table)?;
            self.line_end()?;
        }
    }

    fn key_value(&mut self, table: &mut Table) -> Result<(), ParseError> {
        let key_at = self.cursor.position();
        let keys = self.read_dotted_key()?;
        if self.cursor.at_end() {
            return Err(self.error_here(ErrorKind::UnterminatedKeyValue));
        }
        if !self.cursor.eat(b'=') {
            return Err(self.wanted("an equals"));
        }
        self.cursor.eat_whitespace();
        let value = self.value()?;
        match path::insert_dotted(table, keys, value) {
            Ok(()) => Ok(()),
            Err(kind) => Err(self.set_error(key_at, None, kind)),
        }
    }

    fn table_section(&mut self, root: &mut Table) -> Result<(), ParseError> {
        let header_at = self.cursor.position();
        self.cursor.advance();
        let is_array = self.cursor.eat(b'[');

        self.cursor.eat_whitespace();
        let keys = if self.cursor.peek() == Some(b']') {
            Vec::new()
        } else {
            self.read_dotted_key()?
        };

        if is_array {
            if !self.cursor.eat_slice(b"]]") {
                return Err(self.wanted("`]]`"));
            }
        } else if !self.cursor.eat(b']') {
            return Err(self.wanted("a right bracket"));
        }
        let header_span_end = self.cursor.offset();
        self.header_end()?;

        let resolved = if is_array {
            path::resolve_array_table(root, &keys)
        } else {
            path::resolve_table(root, &keys)
        };
        match resolved {
            Ok(table) => self.key_values(table),
            Err(kind) => Err(self.set_error(header_at, Some(header_span_end), kind)),
        }
    }

    // -- values -------------------------------------------------------------

    pub(crate) fn value(&mut self) -> Result<Value, ParseError> {
        match self.cursor.peek() {
            None => Err(self.wanted("a value")),
            Some(b'"' | b'\'') => Ok(Value::String(self.read_string()?)),
            Some(b'0'..=b'9' | b'+' | b'-' | b'.' | b'n' | b'i') => self.read_number(),
            Some(b't' | b'f') => self.read_bool(),
            Some(b'[') => {
                self.enter()?;
                let array = self.array();
                self.depth -= 1;
                Ok(Value::Array(array?))
            }
            Some(b'{') => {
                self.enter()?;
                let table = self.inline_table();
                self.depth -= 1;
                Ok(Value::Table(table?))
            }
            Some(_) => Err(self.unexpected_char()),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(self.error_here(ErrorKind::OutOfRange("max recursion depth")));
        }
        self.depth += 1;
        Ok(())
    }

    fn array(&mut self) -> Result<Array, ParseError> {
        self.cursor.advance();
        let mut array = Array::new();
        loop {
            self.skip_trivia();
            match self.cursor.peek() {
                None => return Err(self.error_here(ErrorKind::UnterminatedArray)),
                Some(b']') => {
                    self.cursor.advance();
                    return Ok(array);
                }
                Some(_) => {}
            }
            array.push(self.value()?);
            self.skip_trivia();
            match self.cursor.peek() {
                None => return Err(self.error_here(ErrorKind::UnterminatedArray)),
                Some(b',') => self.cursor.advance(),
                Some(b']') => {
                    self.cursor.advance();
                    return Ok(array);
                }
                Some(_) => return Err(self.wanted("a comma or `]`")),
            }
        }
    }

    fn inline_table(&mut self) -> Result<Table, ParseError> {
        self.cursor.advance();
        let mut table = Table::new();
        self.cursor.eat_whitespace();
        if self.cursor.eat(b'}') {
            return Ok(table);
        }
        loop {
            let key_at = self.cursor.position();
            let keys = self.read_dotted_key()?;
            if !self.cursor.eat(b'=') {
                return Err(self.wanted("an equals"));
            }
            self.cursor.eat_whitespace();
            let value = self.value()?;
            if let Err(kind) = path::insert_dotted(&mut table, keys, value) {
                return Err(self.set_error(key_at, None, kind));
            }
            self.cursor.eat_whitespace();
            if self.cursor.eat(b'}') {
                return Ok(table);
            }
            if !self.cursor.eat(b',') {
                return Err(self.wanted("a comma or `}`"));
            }
            self.cursor.eat_whitespace();
            if self.cursor.eat(b'}') {
                return Ok(table);
            }
        }
    }
}

/// Parses a complete document held in `input`.
pub(crate) fn parse_document(input: &[u8], source_name: &str) -> Result<Table, Error> {
    let mut root = Table::new();
    let mut parser = Parser::new(input);
    match parser.document(&mut root) {
        Ok(()) => Ok(root),
        Err(ParseError) => Err(parser.take_error().with_source(source_name)),
    }
}

#[inline]
pub(crate) fn is_keylike_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;
