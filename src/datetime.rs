//! Structural decomposition of TOML date and time literals.

#[cfg(test)]
#[path = "./datetime_tests.rs"]
mod tests;

use crate::{Error, ErrorKind, Span};
use std::fmt;
use std::str::FromStr;

/// Calendar date part of a [`Datetime`].
///
/// Only the field widths and basic ranges (month 1-12, day 1-31) are
/// checked; days-in-month and leap years are not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// Time-of-day part of a [`Datetime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    /// `0..=60`, leap seconds included.
    pub second: u8,
    pub nanosecond: u32,
    precision: u8,
    has_seconds: bool,
}

impl Time {
    /// Number of fractional-second digits written in the source, capped at 9.
    pub fn subsecond_precision(&self) -> u8 {
        self.precision
    }

    /// Whether seconds were written in the source, as opposed to defaulted
    /// to zero for `HH:MM` literals.
    pub fn has_seconds(&self) -> bool {
        self.has_seconds
    }
}

/// UTC offset of an offset date-time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOffset {
    /// `Z` suffix (UTC, "Zulu").
    Z,
    /// Explicit `+HH:MM` / `-HH:MM` offset from UTC.
    Custom { minutes: i16 },
}

/// A TOML date/time literal split into its fields.
///
/// Covers the four TOML shapes: offset date-time (date, time and offset),
/// local date-time (date and time), local date, and local time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Datetime {
    pub date: Option<Date>,
    pub time: Option<Time>,
    pub offset: Option<TimeOffset>,
}

enum State {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Frac,
    OffHour,
    OffMin,
}

impl Datetime {
    /// Decomposes a complete literal; trailing bytes make it invalid.
    pub fn parse(input: &[u8]) -> Option<Datetime> {
        match Datetime::munch(input) {
            Some((consumed, value)) if consumed == input.len() => Some(value),
            _ => None,
        }
    }

    /// Decomposes the longest date/time prefix of `input`, returning the
    /// number of bytes consumed.
    pub(crate) fn munch(input: &[u8]) -> Option<(usize, Datetime)> {
        let mut state = match input {
            [_, _, b':', _, _, ..] => State::Hour,
            [_, _, _, _, b'-', _, _, b'-', ..] => State::Year,
            _ => return None,
        };

        let mut date = Date {
            year: 0,
            month: 0,
            day: 0,
        };
        let mut has_date = false;
        let mut time = Time::default();
        let mut has_time = false;
        let mut offset = None;

        let mut current = 0u32;
        let mut len = 0u32;
        let mut off_sign: i16 = 1;
        let mut off_hour: u8 = 0;
        let mut i = 0usize;
        let mut valid = false;

        'outer: loop {
            let byte = input.get(i).copied().unwrap_or(0);
            if byte.is_ascii_digit() {
                len += 1;
                if len <= 9 {
                    current = current * 10 + (byte - b'0') as u32;
                }
                i += 1;
                continue;
            }
            'next: {
                match state {
                    State::Year => {
                        if len != 4 || byte != b'-' {
                            break 'outer;
                        }
                        date.year = current as u16;
                        state = State::Month;
                        break 'next;
                    }
                    State::Month => {
                        let m = current as u8;
                        if len != 2 || byte != b'-' || m < 1 || m > 12 {
                            break 'outer;
                        }
                        date.month = m;
                        state = State::Day;
                        break 'next;
                    }
                    State::Day => {
                        let d = current as u8;
                        if len != 2 || d < 1 || d > 31 {
                            break 'outer;
                        }
                        date.day = d;
                        has_date = true;
                        let joins_time = byte == b'T'
                            || byte == b't'
                            || (byte == b' ' && input.get(i + 1).is_some_and(u8::is_ascii_digit));
                        if joins_time {
                            state = State::Hour;
                            break 'next;
                        }
                        valid = true;
                        break 'outer;
                    }
                    State::Hour => {
                        let h = current as u8;
                        if len != 2 || byte != b':' || h > 23 {
                            break 'outer;
                        }
                        time.hour = h;
                        state = State::Minute;
                        break 'next;
                    }
                    State::Minute => {
                        let m = current as u8;
                        if len != 2 || m > 59 {
                            break 'outer;
                        }
                        time.minute = m;
                        has_time = true;
                        if byte == b':' {
                            state = State::Second;
                            break 'next;
                        }
                        // fall through to the offset check
                    }
                    State::Second => {
                        let s = current as u8;
                        if len != 2 || s > 60 {
                            break 'outer;
                        }
                        time.second = s;
                        time.has_seconds = true;
                        if byte == b'.' {
                            state = State::Frac;
                            break 'next;
                        }
                    }
                    State::Frac => {
                        if len == 0 {
                            break 'outer;
                        }
                        let digits = len.min(9);
                        time.nanosecond = current * 10u32.pow(9 - digits);
                        time.precision = digits as u8;
                    }
                    State::OffHour => {
                        let h = current as u8;
                        if len != 2 || byte != b':' || h > 23 {
                            break 'outer;
                        }
                        off_hour = h;
                        state = State::OffMin;
                        break 'next;
                    }
                    State::OffMin => {
                        if len != 2 || current > 59 {
                            break 'outer;
                        }
                        let minutes = off_hour as i16 * 60 + current as i16;
                        offset = Some(TimeOffset::Custom {
                            minutes: off_sign * minutes,
                        });
                        valid = true;
                        break 'outer;
                    }
                }
                match byte {
                    b'Z' | b'z' => {
                        offset = Some(TimeOffset::Z);
                        i += 1;
                        valid = true;
                        break 'outer;
                    }
                    b'+' => {
                        off_sign = 1;
                        state = State::OffHour;
                    }
                    b'-' => {
                        off_sign = -1;
                        state = State::OffHour;
                    }
                    _ => {
                        valid = true;
                        break 'outer;
                    }
                }
            }
            i += 1;
            current = 0;
            len = 0;
        }

        // Offsets only make sense on a full date-time.
        if !valid || (!has_date && offset.is_some()) {
            return None;
        }
        Some((
            i,
            Datetime {
                date: has_date.then_some(date),
                time: has_time.then_some(time),
                offset,
            },
        ))
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = &self.date {
            write!(f, "{:04}-{:02}-{:02}", date.year, date.month, date.day)?;
            if self.time.is_some() {
                f.write_str("T")?;
            }
        }
        if let Some(time) = &self.time {
            write!(f, "{:02}:{:02}:{:02}", time.hour, time.minute, time.second)?;
            if time.precision > 0 {
                let digits = time.precision as u32;
                let frac = time.nanosecond / 10u32.pow(9 - digits);
                write!(f, ".{:0width$}", frac, width = digits as usize)?;
            }
            match self.offset {
                None => {}
                Some(TimeOffset::Z) => f.write_str("Z")?,
                Some(TimeOffset::Custom { minutes }) => {
                    let sign = if minutes < 0 { '-' } else { '+' };
                    let abs = minutes.unsigned_abs();
                    write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Datetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Datetime::parse(s.as_bytes()) {
            Some(value) => Ok(value),
            None => Err(Error::from((ErrorKind::InvalidDatetime, Span::new(0, s.len())))),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Datetime {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ser.collect_str(self)
    }
}
