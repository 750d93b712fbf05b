//! A TOML parser that builds an owned, insertion-ordered document tree.
//!
//! The whole input is parsed in one pass into a root [`Table`]. Tables keep
//! their keys in the order they first appeared, arrays keep element order,
//! and date/time literals are decomposed into a [`Datetime`]. The first
//! syntax error aborts the parse and is reported with its line and column.
//!
//! # Examples
//!
//! ```
//! use toml_tree::{Error, Value};
//!
//! let content = r#"
//! dev-mode = true
//!
//! [[things]]
//! name = "hammer"
//! value = 43
//!
//! [[things]]
//! name = "drill"
//! value = 300
//! color = "green"
//! "#;
//!
//! let table = toml_tree::parse(content)?;
//!
//! let things = table.required("things")?.expect_array()?;
//! assert_eq!(things.len(), 2);
//!
//! let drill = things[1].expect_table()?;
//! assert_eq!(drill.get_str("name"), Some("drill"));
//! assert_eq!(drill.required("value")?.expect_integer()?, 300);
//!
//! assert_eq!(table.get_bool("dev-mode"), Some(true));
//! assert!(matches!(table["things"], Value::Array(_)));
//! # Ok::<(), Error>(())
//! ```
//!
//! Errors render as `<source>:<line>:<column>: <description>`:
//!
//! ```
//! let err = toml_tree::parse("a = 1\nb = @").unwrap_err();
//! assert_eq!(err.code(), toml_tree::ErrorCode::Syntax);
//! assert_eq!(err.to_string(), "<string>:2:5: unexpected character found: `@`");
//! ```

mod array;
mod cursor;
mod datetime;
mod error;
mod number;
mod parser;
mod path;
mod span;
mod str;
mod string;
mod table;
mod value;

pub use array::Array;
pub use datetime::{Date, Datetime, Time, TimeOffset};
pub use error::{Error, ErrorCode, ErrorKind};
pub use span::Span;
pub use str::Str;
pub use table::Table;
pub use value::Value;

use std::io::Read;
use std::path::Path;

const STRING_SOURCE: &str = "<string>";
const STREAM_SOURCE: &str = "<stream>";

/// Parses a TOML document held in a string.
///
/// Errors name the input `<string>`.
pub fn parse(input: &str) -> Result<Table, Error> {
    parse_bytes(input.as_bytes(), None)
}

/// Parses a TOML document from raw bytes.
///
/// `source_name` is used in error messages, eg. the path the bytes were read
/// from; it defaults to `<string>`.
pub fn parse_bytes(input: &[u8], source_name: Option<&str>) -> Result<Table, Error> {
    parser::parse_document(input, source_name.unwrap_or(STRING_SOURCE))
}

/// Reads `reader` to the end and parses the result.
///
/// Errors name the input `<stream>`.
pub fn from_reader(mut reader: impl Read) -> Result<Table, Error> {
    let mut buf = Vec::new();
    if let Err(err) = reader.read_to_end(&mut buf) {
        return Err(io_error(STREAM_SOURCE, "read", &err));
    }
    parse_bytes(&buf, Some(STREAM_SOURCE))
}

/// Reads the file at `path` and parses it.
///
/// Errors name the input by the path's display form.
pub fn from_path(path: impl AsRef<Path>) -> Result<Table, Error> {
    let path = path.as_ref();
    let name = path.display().to_string();
    match std::fs::read(path) {
        Ok(buf) => parse_bytes(&buf, Some(&name)),
        Err(err) => Err(io_error(&name, "open", &err)),
    }
}

fn io_error(name: &str, action: &str, err: &std::io::Error) -> Error {
    Error::from(ErrorKind::Io(format!("failed to {action} `{name}`: {err}"))).with_source(name)
}

impl std::str::FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
