#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use crate::str::Str;
use crate::{Array, Datetime, Error, ErrorKind, Table};

/// A parsed TOML value.
///
/// Every value owns its payload; dropping a table or array drops everything
/// below it.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Table(Table),
    Array(Array),
    /// String contents. Usually UTF-8, but `\U` escapes above `U+10FFFF`
    /// produce the extended 5 and 6 byte encodings.
    String(Str),
    Integer(i64),
    Float(f64),
    Datetime(Datetime),
    Boolean(bool),
}

impl Value {
    /// Returns the TOML type name (e.g. `"string"`, `"integer"`, `"table"`).
    #[inline]
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::Table(_) => "table",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Datetime(_) => "datetime",
            Value::Boolean(_) => "boolean",
        }
    }

    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    pub fn is_datetime(&self) -> bool {
        matches!(self, Value::Datetime(_))
    }

    /// Returns a borrowed string if this is a string holding valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.as_str(),
            _ => None,
        }
    }

    /// Returns the raw string bytes if this is a string value.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns an `f64` if this is a float value. Integers are not converted.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_datetime(&self) -> Option<&Datetime> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns a borrowed array if this is an array value.
    #[inline]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a borrowed table if this is a table value.
    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str_mut(&mut self) -> Option<&mut Str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_integer_mut(&mut self) -> Option<&mut i64> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float_mut(&mut self) -> Option<&mut f64> {
        match self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool_mut(&mut self) -> Option<&mut bool> {
        match self {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_datetime_mut(&mut self) -> Option<&mut Datetime> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns a mutable array reference.
    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a mutable table reference.
    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns true if the value is a table and has the specified key.
    #[inline]
    pub fn has_key(&self, key: &str) -> bool {
        self.as_table().is_some_and(|t| t.contains_key(key))
    }
}

impl Value {
    /// Creates an "expected X, found Y" error using this value's type.
    #[inline]
    pub fn expected(&self, expected: &'static str) -> Error {
        Error::from(ErrorKind::WrongType {
            expected,
            found: self.type_str(),
        })
    }

    /// Returns the table, or a wrong-type error.
    pub fn expect_table(&self) -> Result<&Table, Error> {
        self.as_table().ok_or_else(|| self.expected("table"))
    }

    /// Returns the array, or a wrong-type error.
    pub fn expect_array(&self) -> Result<&Array, Error> {
        self.as_array().ok_or_else(|| self.expected("array"))
    }

    /// Returns the UTF-8 string, or a wrong-type error.
    ///
    /// A string that is not valid UTF-8 is reported as `bytes`.
    pub fn expect_str(&self) -> Result<&str, Error> {
        match self {
            Value::String(s) => match s.as_str() {
                Some(s) => Ok(s),
                None => Err(Error::from(ErrorKind::WrongType {
                    expected: "string",
                    found: "bytes",
                })),
            },
            _ => Err(self.expected("string")),
        }
    }

    pub fn expect_integer(&self) -> Result<i64, Error> {
        self.as_integer().ok_or_else(|| self.expected("integer"))
    }

    pub fn expect_float(&self) -> Result<f64, Error> {
        self.as_float().ok_or_else(|| self.expected("float"))
    }

    pub fn expect_bool(&self) -> Result<bool, Error> {
        self.as_bool().ok_or_else(|| self.expected("boolean"))
    }

    pub fn expect_datetime(&self) -> Result<&Datetime, Error> {
        self.as_datetime().ok_or_else(|| self.expected("datetime"))
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Str> for Value {
    fn from(s: Str) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Str::from(s))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Datetime> for Value {
    fn from(dt: Datetime) -> Self {
        Value::Datetime(dt)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Table(t) => t.serialize(ser),
            Value::Array(a) => a.serialize(ser),
            Value::String(s) => s.serialize(ser),
            Value::Integer(i) => ser.serialize_i64(*i),
            Value::Float(f) => ser.serialize_f64(*f),
            Value::Datetime(dt) => dt.serialize(ser),
            Value::Boolean(b) => ser.serialize_bool(*b),
        }
    }
}
