//! The error type shared by every stage of table compilation.
//!
//! Every variant is fatal: the compiler either produces a complete artifact or
//! nothing at all.

use std::fmt;
use std::io;
use std::result;

use crate::source::SourceTable;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The release identifier or a locator template is unusable.
    Config(String),

    /// A source document could not be retrieved.
    Fetch { locator: String, reason: String },

    /// A line or record of a source document does not have the expected shape.
    Format {
        table: SourceTable,
        line: usize,
        reason: String,
    },

    /// A label the output requires has no code points in the source.
    MissingLabel { table: SourceTable, label: String },

    /// The IDNA registry is not well-formed XML.
    Xml {
        table: SourceTable,
        source: roxmltree::Error,
    },

    /// The rendered artifact is not valid Rust source.
    Emit(String),

    Io(io::Error),
}

impl Error {
    pub fn format<R: Into<String>>(table: SourceTable, line: usize, reason: R) -> Error {
        Error::Format {
            table,
            line,
            reason: reason.into(),
        }
    }

    pub fn fetch<L: Into<String>, R: fmt::Display>(locator: L, reason: R) -> Error {
        Error::Fetch {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(reason) => write!(fmt, "configuration error: {}", reason),
            Error::Fetch { locator, reason } => {
                write!(fmt, "could not fetch {}: {}", locator, reason)
            }
            Error::Format {
                table,
                line,
                reason,
            } => write!(fmt, "{}:{}: {}", table.file_name(), line, reason),
            Error::MissingLabel { table, label } => {
                write!(fmt, "{}: no code points for {}", table.file_name(), label)
            }
            Error::Xml { table, source } => {
                write!(fmt, "{}: malformed XML: {}", table.file_name(), source)
            }
            Error::Emit(reason) => write!(fmt, "generated tables are not valid Rust: {}", reason),
            Error::Io(err) => write!(fmt, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Xml { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<syn::Error> for Error {
    fn from(err: syn::Error) -> Error {
        Error::Emit(err.to_string())
    }
}

#[test]
fn format_error_names_file_and_line() {
    let err = Error::format(SourceTable::Scripts, 12, "expected 2 fields, found 3");
    assert_eq!(err.to_string(), "Scripts.txt:12: expected 2 fields, found 3");
}

#[test]
fn missing_label_names_file_and_label() {
    let err = Error::MissingLabel {
        table: SourceTable::Scripts,
        label: "Han".to_string(),
    };
    assert_eq!(err.to_string(), "Scripts.txt: no code points for Han");
}

#[test]
fn fetch_error_names_locator() {
    let err = Error::fetch("http://example.invalid/Scripts.txt", "HTTP status 404 Not Found");
    assert_eq!(
        err.to_string(),
        "could not fetch http://example.invalid/Scripts.txt: HTTP status 404 Not Found"
    );
}
