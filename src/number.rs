//! Numeric, boolean and datetime scanners.

use crate::cursor::Position;
use crate::parser::{ParseError, Parser};
use crate::{Datetime, ErrorKind, Value};
use std::num::IntErrorKind;

const SPECIAL_FLOATS: [(&[u8], f64); 6] = [
    (b"+inf", f64::INFINITY),
    (b"-inf", f64::NEG_INFINITY),
    (b"inf", f64::INFINITY),
    (b"+nan", f64::NAN),
    (b"-nan", f64::NAN),
    (b"nan", f64::NAN),
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Integer,
    Float,
}

/// Bytes that may directly follow a scalar value.
fn ends_value(byte: Option<u8>) -> bool {
    matches!(
        byte,
        None | Some(b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}')
    )
}

/// Length of a datetime token: digits, letters, `-`, `:`, `.`, `+`, and one
/// space joining a full date to a following digit.
fn datetime_extent(rest: &[u8]) -> usize {
    let mut i = 0;
    loop {
        match rest.get(i) {
            Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.' | b'+') => {
                i += 1;
            }
            Some(b' ') if i == 10 && rest.get(i + 1).is_some_and(u8::is_ascii_digit) => i += 1,
            _ => return i,
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses `true` or `false`.
    pub(crate) fn read_bool(&mut self) -> Result<Value, ParseError> {
        let (word, value): (&[u8], bool) = if self.cursor.starts_with(b"true") {
            (b"true", true)
        } else {
            (b"false", false)
        };
        if !self.cursor.starts_with(word) || !ends_value(self.cursor.peek_at(word.len())) {
            return Err(self.error_here(ErrorKind::UnquotedString));
        }
        self.cursor.advance_n(word.len());
        Ok(Value::Boolean(value))
    }

    fn number_error(&mut self, start: Position, len: usize, kind: ErrorKind) -> ParseError {
        self.set_error(start, Some(start.offset + len.max(1)), kind)
    }

    /// Parses an integer, float or datetime starting at the cursor.
    pub(crate) fn read_number(&mut self) -> Result<Value, ParseError> {
        let start = self.cursor.position();
        let rest = self.cursor.rest();

        for (text, value) in SPECIAL_FLOATS {
            if rest.starts_with(text) {
                let next = rest.get(text.len()).copied();
                if next.is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.') {
                    let len = datetime_extent(rest);
                    return Err(self.number_error(start, len, ErrorKind::InvalidNumber));
                }
                self.cursor.advance_n(text.len());
                return Ok(Value::Float(value));
            }
        }

        let mut literal = String::new();
        let mut i = 0;
        let mut radix = 10;
        let mut kind = Kind::Integer;
        let mut signed = false;

        if let Some(&sign @ (b'+' | b'-')) = rest.first() {
            literal.push(sign as char);
            signed = true;
            i = 1;
        }
        if rest.get(i) == Some(&b'0') {
            radix = match rest.get(i + 1) {
                Some(b'x') => 16,
                Some(b'o') => 8,
                Some(b'b') => 2,
                _ => 10,
            };
            if radix != 10 {
                if signed {
                    return Err(self.number_error(start, i + 2, ErrorKind::InvalidNumber));
                }
                i += 2;
            }
        }

        let mut digits = 0;
        let mut exponent = false;
        let mut sign_allowed = false;
        loop {
            let Some(b) = rest.get(i).copied() else { break };
            let after_exponent = std::mem::take(&mut sign_allowed);
            match b {
                b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F'
                    if (b as char).is_digit(radix) =>
                {
                    literal.push(b as char);
                    digits += 1;
                }
                b'_' => {
                    let before = i.checked_sub(1).and_then(|p| rest.get(p));
                    let after = rest.get(i + 1);
                    let between = before.is_some_and(u8::is_ascii_alphanumeric)
                        && after.is_some_and(u8::is_ascii_alphanumeric);
                    if !between {
                        let len = datetime_extent(rest).max(i + 1);
                        return Err(self.number_error(start, len, ErrorKind::InvalidNumber));
                    }
                }
                b'.' if radix == 10 => {
                    let digit_before = i > 0 && rest[i - 1].is_ascii_digit();
                    let digit_after = rest.get(i + 1).is_some_and(u8::is_ascii_digit);
                    if kind == Kind::Float || !digit_before || !digit_after {
                        let len = datetime_extent(rest).max(i + 1);
                        return Err(self.number_error(start, len, ErrorKind::InvalidNumber));
                    }
                    kind = Kind::Float;
                    literal.push('.');
                }
                b'e' | b'E' if radix == 10 => {
                    if exponent || digits == 0 {
                        let len = datetime_extent(rest).max(i + 1);
                        return Err(self.number_error(start, len, ErrorKind::InvalidNumber));
                    }
                    exponent = true;
                    sign_allowed = true;
                    kind = Kind::Float;
                    literal.push('e');
                }
                b'+' | b'-' if after_exponent => literal.push(b as char),
                b'-' if radix == 10 && kind == Kind::Integer && !signed => {
                    return self.read_datetime(start);
                }
                b':' if radix == 10 && kind == Kind::Integer && !signed && i == 2 && digits == 2 => {
                    return self.read_datetime(start);
                }
                b if b.is_ascii_alphanumeric() || b == b'.' || b == b'+' || b == b'-' => {
                    let len = datetime_extent(rest).max(i + 1);
                    return Err(self.number_error(start, len, ErrorKind::InvalidNumber));
                }
                _ => break,
            }
            i += 1;
        }

        if digits == 0 {
            return Err(self.number_error(start, i, ErrorKind::InvalidNumber));
        }

        let value = match kind {
            Kind::Integer => match i64::from_str_radix(&literal, radix) {
                Ok(v) => Value::Integer(v),
                Err(err) => {
                    let kind = match err.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            ErrorKind::OutOfRange("i64")
                        }
                        _ => ErrorKind::InvalidNumber,
                    };
                    return Err(self.number_error(start, i, kind));
                }
            },
            Kind::Float => match literal.parse::<f64>() {
                Ok(v) => Value::Float(v),
                Err(_) => return Err(self.number_error(start, i, ErrorKind::InvalidNumber)),
            },
        };
        self.cursor.advance_n(i);
        Ok(value)
    }

    fn read_datetime(&mut self, start: Position) -> Result<Value, ParseError> {
        let rest = self.cursor.rest();
        let len = datetime_extent(rest);
        match Datetime::parse(&rest[..len]) {
            Some(datetime) => {
                self.cursor.advance_n(len);
                Ok(Value::Datetime(datetime))
            }
            None => Err(self.number_error(start, len, ErrorKind::InvalidDatetime)),
        }
    }
}
