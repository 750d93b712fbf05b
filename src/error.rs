use crate::Span;
use std::borrow::Cow;
use std::fmt::{self, Debug, Display};

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Misuse of the typed query surface, eg. a missing field or wrong type.
    Generic,
    /// Reading the input failed.
    Io,
    /// A string buffer could not grow.
    OutOfMemory,
    /// The document violates the grammar.
    Syntax,
    /// A `\u` or `\U` escape does not describe a valid scalar.
    InvalidUnicode,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generic => "generic",
            Self::Io => "io",
            Self::OutOfMemory => "out-of-memory",
            Self::Syntax => "syntax",
            Self::InvalidUnicode => "invalid-unicode",
        })
    }
}

/// Error produced while reading, parsing or querying a document.
#[derive(Debug, Clone)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// Byte range of the input the error refers to.
    pub span: Span,
    /// 1-based line and column, only available for errors coming from the parser
    pub line_info: Option<(usize, usize)>,
    /// Name of the input used when rendering the message, eg. a file path.
    pub source_name: Option<String>,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span)> for Error {
    fn from((kind, span): (ErrorKind, Span)) -> Self {
        Self {
            kind,
            span,
            line_info: None,
            source_name: None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from((kind, Span::default()))
    }
}

impl Error {
    /// Creates an error with a free form message.
    pub fn custom(message: impl Into<Cow<'static, str>>, span: Span) -> Self {
        Self::from((ErrorKind::Custom(message.into()), span))
    }

    /// Classification of this error.
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Rendered message, `<source>:<line>:<column>: <description>` when the
    /// error has a position.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn with_source(mut self, name: &str) -> Self {
        self.source_name = Some(name.to_owned());
        self
    }
}

/// The specific reason an [`Error`] was produced.
#[derive(Clone)]
pub enum ErrorKind {
    /// A byte that cannot start the construct expected at this point.
    Unexpected(char),

    /// A string was not closed before a newline or the end of input.
    UnterminatedString,

    /// A backslash followed by a byte that is not a known escape.
    InvalidEscape(char),

    /// A non-hex digit inside a `\u` or `\U` escape.
    InvalidHexEscape(char),

    /// A hex escape names a surrogate, a noncharacter, or a value past
    /// `0x7FFF_FFFF`.
    InvalidEscapeValue(u32),

    /// A `\u` or `\U` escape was cut short by the end of input.
    TruncatedEscape,

    /// A numeric literal is malformed.
    InvalidNumber,

    /// The number cannot be represented by the named type.
    OutOfRange(&'static str),

    /// A date or time literal has the wrong shape or a field out of range.
    InvalidDatetime,

    /// A different token was required at this point.
    Wanted {
        /// Expected token type.
        expected: &'static str,
        /// Description of the token that was present.
        found: &'static str,
    },

    /// A bare word in value position, usually a string missing its quotes.
    UnquotedString,

    /// A `"""` or `'''` string used as a key.
    MultilineStringKey,

    /// A table header with no name, `[]` or `[[]]`.
    EmptyTableName,

    /// The input ended right after a key.
    UnterminatedKeyValue,

    /// The input ended before the closing `]` of an array.
    UnterminatedArray,

    /// A header or dotted key tried to descend through the named non-table.
    NotATable(String),

    /// An array-of-tables header named an existing non-array key.
    NotAnArray(String),

    /// Reading the input failed.
    Io(String),

    /// A string buffer could not grow.
    OutOfMemory,

    /// [`Table::required`](crate::Table::required) found no such key.
    MissingField(String),

    /// A value had a different type than the one requested.
    WrongType {
        /// The requested type.
        expected: &'static str,
        /// The type that was actually stored.
        found: &'static str,
    },

    /// A custom error.
    Custom(Cow<'static, str>),
}

impl ErrorKind {
    /// Classification of this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::Io,
            Self::OutOfMemory => ErrorCode::OutOfMemory,
            Self::InvalidHexEscape(_) | Self::InvalidEscapeValue(_) | Self::TruncatedEscape => {
                ErrorCode::InvalidUnicode
            }
            Self::MissingField(_) | Self::WrongType { .. } | Self::Custom(_) => ErrorCode::Generic,
            _ => ErrorCode::Syntax,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Unexpected(..) => "unexpected",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidEscape(..) => "invalid-escape",
            Self::InvalidHexEscape(..) => "invalid-hex-escape",
            Self::InvalidEscapeValue(..) => "invalid-escape-value",
            Self::TruncatedEscape => "truncated-escape",
            Self::InvalidNumber => "invalid-number",
            Self::OutOfRange(_) => "out-of-range",
            Self::InvalidDatetime => "invalid-datetime",
            Self::Wanted { .. } => "wanted",
            Self::UnquotedString => "unquoted-string",
            Self::MultilineStringKey => "multiline-string-key",
            Self::EmptyTableName => "empty-table-name",
            Self::UnterminatedKeyValue => "unterminated-key-value",
            Self::UnterminatedArray => "unterminated-array",
            Self::NotATable(..) => "not-a-table",
            Self::NotAnArray(..) => "not-an-array",
            Self::Io(..) => "io",
            Self::OutOfMemory => "out-of-memory",
            Self::MissingField(..) => "missing-field",
            Self::WrongType { .. } => "wrong-type",
            Self::Custom(..) => "custom",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Escape(char);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        if self.0.is_whitespace() || self.0.is_control() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

fn describe(kind: &ErrorKind, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match kind {
        ErrorKind::Unexpected(c) => write!(f, "unexpected character found: `{}`", Escape(*c)),
        ErrorKind::UnterminatedString => f.write_str("unterminated string"),
        ErrorKind::InvalidEscape(c) => {
            write!(f, "invalid escape character in string: `{}`", Escape(*c))
        }
        ErrorKind::InvalidHexEscape(c) => {
            write!(f, "invalid hex escape character in string: `{}`", Escape(*c))
        }
        ErrorKind::InvalidEscapeValue(v) => write!(f, "invalid escape value: `{v:#x}`"),
        ErrorKind::TruncatedEscape => f.write_str("truncated unicode escape"),
        ErrorKind::InvalidNumber => f.write_str("invalid number"),
        ErrorKind::OutOfRange(ty) => write!(f, "out of range of '{ty}'"),
        ErrorKind::InvalidDatetime => f.write_str("invalid date or time"),
        ErrorKind::Wanted { expected, found } => write!(f, "expected {expected}, found {found}"),
        ErrorKind::UnquotedString => {
            f.write_str("invalid TOML value, did you mean to use a quoted string?")
        }
        ErrorKind::MultilineStringKey => f.write_str("multiline strings are not allowed for key"),
        ErrorKind::EmptyTableName => f.write_str("empty table name"),
        ErrorKind::UnterminatedKeyValue => f.write_str("unterminated key value pair"),
        ErrorKind::UnterminatedArray => f.write_str("unterminated array"),
        ErrorKind::NotATable(key) => write!(f, "key `{key}` is not a table"),
        ErrorKind::NotAnArray(key) => write!(f, "this key was not an array: `{key}`"),
        ErrorKind::Io(message) => f.write_str(message),
        ErrorKind::OutOfMemory => f.write_str("out of memory"),
        ErrorKind::MissingField(field) => write!(f, "missing field '{field}' in table"),
        ErrorKind::WrongType { expected, found } => {
            write!(f, "expected {expected}, found {found}")
        }
        ErrorKind::Custom(message) => f.write_str(message),
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((line, column)) = self.line_info {
            let name = self.source_name.as_deref().unwrap_or("<string>");
            write!(f, "{name}:{line}:{column}: ")?;
        }
        describe(&self.kind, f)
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Builds a `codespan-reporting` diagnostic labelling [`Error::span`] in
    /// the file `fid`.
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let diag = Diagnostic::error().with_code(self.kind.to_string());
        let primary = Label::primary(fid, self.span.start..self.span.end);

        match &self.kind {
            ErrorKind::Unexpected(c) => diag.with_labels(vec![
                primary.with_message(format!("unexpected character '{}'", Escape(*c))),
            ]),
            ErrorKind::InvalidEscape(c) => diag.with_labels(vec![
                primary.with_message(format!("invalid escape character '{}' in string", Escape(*c))),
            ]),
            ErrorKind::InvalidHexEscape(c) => diag.with_labels(vec![
                primary.with_message(format!("invalid hex escape '{}'", Escape(*c))),
            ]),
            ErrorKind::InvalidEscapeValue(_) => {
                diag.with_labels(vec![primary.with_message("invalid escape value")])
            }
            ErrorKind::InvalidNumber => {
                diag.with_labels(vec![primary.with_message("unable to parse number")])
            }
            ErrorKind::OutOfRange(ty) => diag
                .with_message(format!("number is out of range of '{ty}'"))
                .with_labels(vec![primary]),
            ErrorKind::InvalidDatetime => {
                diag.with_labels(vec![primary.with_message("unable to parse date or time")])
            }
            ErrorKind::Wanted { expected, .. } => {
                diag.with_labels(vec![primary.with_message(format!("expected {expected}"))])
            }
            ErrorKind::MultilineStringKey => {
                diag.with_labels(vec![primary.with_message("multiline keys are not allowed")])
            }
            ErrorKind::UnterminatedString => diag.with_labels(vec![
                primary.with_message("string terminator not found on this line"),
            ]),
            ErrorKind::UnquotedString => {
                diag.with_labels(vec![primary.with_message("string is not quoted")])
            }
            ErrorKind::UnterminatedArray => {
                diag.with_labels(vec![primary.with_message("eof reached before `]`")])
            }
            ErrorKind::NotATable(_) => diag
                .with_message(self.kind_message())
                .with_labels(vec![primary.with_message("attempted to descend here")]),
            ErrorKind::NotAnArray(_) => diag
                .with_message(self.kind_message())
                .with_labels(vec![primary.with_message("array of tables header")]),
            ErrorKind::MissingField(field) => diag
                .with_message(format!("missing field '{field}'"))
                .with_labels(vec![primary.with_message("table with missing field")]),
            _ => diag
                .with_message(self.kind_message())
                .with_labels(vec![primary]),
        }
    }

    fn kind_message(&self) -> String {
        struct Describe<'a>(&'a ErrorKind);
        impl Display for Describe<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                describe(self.0, f)
            }
        }
        Describe(&self.kind).to_string()
    }
}
