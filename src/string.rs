//! String and key scanners.

use crate::ErrorKind;
use crate::parser::{ParseError, Parser, is_keylike_byte};
use crate::str::Str;

/// Decodes the character starting at `bytes`, for error messages.
pub(crate) fn char_at(bytes: &[u8]) -> char {
    bytes
        .utf8_chunks()
        .next()
        .and_then(|chunk| chunk.valid().chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Encodes `value` with the 1 to 6 byte UTF-8 scheme of RFC 2279, which extends
/// the standard encoding past `U+10FFFF` up to `0x7FFF_FFFF`.
pub(crate) fn encode_scalar(value: u32, buf: &mut [u8; 6]) -> &[u8] {
    let (len, lead) = match value {
        0..0x80 => {
            buf[0] = value as u8;
            return &buf[..1];
        }
        0x80..0x800 => (2, 0xC0),
        0x800..0x1_0000 => (3, 0xE0),
        0x1_0000..0x20_0000 => (4, 0xF0),
        0x20_0000..0x400_0000 => (5, 0xF8),
        _ => (6, 0xFC),
    };
    let mut rest = value;
    for slot in buf[1..len].iter_mut().rev() {
        *slot = 0x80 | (rest & 0x3F) as u8;
        rest >>= 6;
    }
    buf[0] = lead | rest as u8;
    &buf[..len]
}

fn is_invalid_scalar(value: u32) -> bool {
    matches!(value, 0xD800..=0xDFFF | 0xFFFE..=0xFFFF) || value > 0x7FFF_FFFF
}

impl<'a> Parser<'a> {
    /// Appends `bytes` to `out`, reporting allocation failure as an error.
    pub(crate) fn store(&mut self, out: &mut Str, bytes: &[u8]) -> Result<(), ParseError> {
        match out.try_extend_from_slice(bytes) {
            Ok(()) => Ok(()),
            Err(_) => Err(self.error_here(ErrorKind::OutOfMemory)),
        }
    }

    fn store_byte(&mut self, out: &mut Str, byte: u8) -> Result<(), ParseError> {
        match out.try_push(byte) {
            Ok(()) => Ok(()),
            Err(_) => Err(self.error_here(ErrorKind::OutOfMemory)),
        }
    }

    fn bare_key(&mut self) -> Result<Str, ParseError> {
        let start = self.cursor.offset();
        while let Some(b) = self.cursor.peek() {
            if !is_keylike_byte(b) {
                break;
            }
            self.cursor.advance();
        }
        let end = self.cursor.offset();
        if start == end {
            return Err(self.wanted("a key"));
        }
        let mut key = Str::new();
        let bytes = self.cursor.bytes();
        self.store(&mut key, &bytes[start..end])?;
        Ok(key)
    }

    /// Reads a single bare or quoted key segment.
    pub(crate) fn read_key(&mut self) -> Result<Str, ParseError> {
        match self.cursor.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                if self.cursor.starts_with(&[quote; 3]) {
                    return Err(self.error_here(ErrorKind::MultilineStringKey));
                }
                self.cursor.advance();
                if quote == b'"' {
                    self.basic_string(false)
                } else {
                    self.literal_string(false)
                }
            }
            _ => self.bare_key(),
        }
    }

    /// Reads `a.b."c"` style keys, consuming the spaces and tabs around dots
    /// and after the last segment.
    pub(crate) fn read_dotted_key(&mut self) -> Result<Vec<Str>, ParseError> {
        let mut keys = Vec::with_capacity(1);
        loop {
            keys.push(self.read_key()?);
            self.cursor.eat_whitespace();
            if !self.cursor.eat(b'.') {
                return Ok(keys);
            }
            self.cursor.eat_whitespace();
        }
    }

    /// Reads any of the four string forms. The cursor sits on the opening
    /// quote.
    pub(crate) fn read_string(&mut self) -> Result<Str, ParseError> {
        let quote = match self.cursor.peek() {
            Some(quote @ (b'"' | b'\'')) => quote,
            _ => return Err(self.wanted("a string")),
        };
        let multiline = self.cursor.eat_slice(&[quote; 3]);
        if !multiline {
            self.cursor.advance();
        }
        if quote == b'"' {
            self.basic_string(multiline)
        } else {
            self.literal_string(multiline)
        }
    }

    fn at_raw_newline(&self) -> bool {
        match self.cursor.peek() {
            Some(b'\n') => true,
            Some(b'\r') => self.cursor.peek_at(1) == Some(b'\n'),
            _ => false,
        }
    }

    fn basic_string(&mut self, multiline: bool) -> Result<Str, ParseError> {
        let mut out = Str::new();
        if multiline {
            self.cursor.eat_newline();
        }
        loop {
            let Some(b) = self.cursor.peek() else {
                return Err(self.error_here(ErrorKind::UnterminatedString));
            };
            match b {
                b'"' if !multiline => {
                    self.cursor.advance();
                    return Ok(out);
                }
                b'"' if self.cursor.eat_slice(b"\"\"\"") => return Ok(out),
                b'\\' => {
                    self.cursor.advance();
                    self.read_escape(&mut out, multiline)?;
                }
                _ if !multiline && self.at_raw_newline() => {
                    return Err(self.error_here(ErrorKind::UnterminatedString));
                }
                _ => {
                    self.store_byte(&mut out, b)?;
                    self.cursor.advance();
                }
            }
        }
    }

    fn literal_string(&mut self, multiline: bool) -> Result<Str, ParseError> {
        let mut out = Str::new();
        if multiline {
            self.cursor.eat_newline();
        }
        loop {
            let Some(b) = self.cursor.peek() else {
                return Err(self.error_here(ErrorKind::UnterminatedString));
            };
            match b {
                b'\'' if !multiline => {
                    self.cursor.advance();
                    return Ok(out);
                }
                b'\'' if self.cursor.eat_slice(b"'''") => return Ok(out),
                _ if !multiline && self.at_raw_newline() => {
                    return Err(self.error_here(ErrorKind::UnterminatedString));
                }
                _ => {
                    self.store_byte(&mut out, b)?;
                    self.cursor.advance();
                }
            }
        }
    }

    /// Decodes one escape. The cursor sits just past the backslash.
    fn read_escape(&mut self, out: &mut Str, multiline: bool) -> Result<(), ParseError> {
        let Some(b) = self.cursor.peek() else {
            return Err(self.error_here(ErrorKind::UnterminatedString));
        };
        if multiline && self.cursor.eat_newline() {
            // Line continuation: the newline and following indentation vanish.
            while let Some(b' ' | b'\t' | b'\r') = self.cursor.peek() {
                self.cursor.advance();
            }
            return Ok(());
        }
        let byte = match b {
            b'b' => 0x08,
            b't' => b'\t',
            b'n' => b'\n',
            b'f' => 0x0C,
            b'r' => b'\r',
            b'"' => b'"',
            b'\\' => b'\\',
            b'u' | b'U' => {
                let digits = if b == b'u' { 4 } else { 8 };
                self.cursor.advance();
                return self.read_unicode_escape(out, digits);
            }
            _ => {
                let c = char_at(self.cursor.rest());
                return Err(self.error_here(ErrorKind::InvalidEscape(c)));
            }
        };
        self.cursor.advance();
        self.store_byte(out, byte)
    }

    fn read_unicode_escape(&mut self, out: &mut Str, digits: usize) -> Result<(), ParseError> {
        let at = self.cursor.position();
        let mut value: u32 = 0;
        for _ in 0..digits {
            let Some(b) = self.cursor.peek() else {
                return Err(self.error_here(ErrorKind::TruncatedEscape));
            };
            let Some(digit) = (b as char).to_digit(16) else {
                let c = char_at(self.cursor.rest());
                return Err(self.error_here(ErrorKind::InvalidHexEscape(c)));
            };
            value = (value << 4) | digit;
            self.cursor.advance();
        }
        if is_invalid_scalar(value) {
            let end = self.cursor.offset();
            return Err(self.set_error(at, Some(end), ErrorKind::InvalidEscapeValue(value)));
        }
        let mut buf = [0u8; 6];
        let encoded = encode_scalar(value, &mut buf);
        self.store(out, encoded)
    }
}
