//! Error catalog: fatal failures and recoverable decode warnings.
//!
//! Every anomaly the codec can report is an [`ErrorKind`] carrying a stable
//! numeric code, a message template with `%name%` placeholders, and a
//! [`Severity`]. Fatal and usage kinds surface as [`MarcError`]; recoverable
//! kinds are appended to a record's warning log as [`Warning`]s.

use std::fmt;

use thiserror::Error;

/// How an [`ErrorKind`] is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The input cannot be used; the current call aborts.
    Fatal,
    /// Logged on the record; processing continues with a fallback.
    Recoverable,
    /// The API was called incorrectly; always aborts the call.
    Usage,
}

/// Catalog of every anomaly the codec distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFile,
    InvalidSource,
    InvalidTerminator,
    NoDirectory,
    InvalidDirectoryLength,
    InvalidDirectoryTag,
    InvalidDirectoryTagLength,
    InvalidDirectoryOffset,
    InvalidDirectory,
    FieldEof,
    InvalidIndicators,
    EmptySubfield,
    InvalidIndicatorRequest,
    InsertFieldMode,
    InvalidField,
    InvalidSubfield,
    InsertSubfieldMode,
    IncorrectLength,
    MissingLength,
    NonnumericLength,
    InvalidTag,
    InvalidIndicator,
    LeaderTooLong,
    FieldTooLong,
    LeaderNotAscii,
}

impl ErrorKind {
    /// Stable numeric code.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::InvalidFile => -1,
            ErrorKind::InvalidSource => -2,
            ErrorKind::InvalidTerminator => -3,
            ErrorKind::NoDirectory => -4,
            ErrorKind::InvalidDirectoryLength => -5,
            ErrorKind::InvalidDirectoryTag => -6,
            ErrorKind::InvalidDirectoryTagLength => -7,
            ErrorKind::InvalidDirectoryOffset => -8,
            ErrorKind::InvalidDirectory => -9,
            ErrorKind::FieldEof => -10,
            ErrorKind::InvalidIndicators => -11,
            ErrorKind::EmptySubfield => -12,
            ErrorKind::InvalidIndicatorRequest => -13,
            ErrorKind::InsertFieldMode => -14,
            ErrorKind::InvalidField => -15,
            ErrorKind::InvalidSubfield => -16,
            ErrorKind::InsertSubfieldMode => -17,
            ErrorKind::IncorrectLength => -18,
            ErrorKind::MissingLength => -19,
            ErrorKind::NonnumericLength => -20,
            ErrorKind::InvalidTag => -21,
            ErrorKind::InvalidIndicator => -22,
            ErrorKind::LeaderTooLong => -23,
            ErrorKind::FieldTooLong => -24,
            ErrorKind::LeaderNotAscii => -25,
        }
    }

    /// Message template; `%name%` tokens are filled by [`format_error`].
    pub fn template(self) -> &'static str {
        match self {
            ErrorKind::InvalidFile => r#"Invalid input file "%filename%""#,
            ErrorKind::InvalidSource => "Invalid source for MARC records",
            ErrorKind::InvalidTerminator => "Invalid record terminator",
            ErrorKind::NoDirectory => "No directory found",
            ErrorKind::InvalidDirectoryLength => "Invalid directory length",
            ErrorKind::InvalidDirectoryTag => r#"Invalid tag "%tag%" in directory"#,
            ErrorKind::InvalidDirectoryTagLength => {
                r#"Invalid length "%len%" in directory for tag "%tag%""#
            }
            ErrorKind::InvalidDirectoryOffset => {
                r#"Invalid offset "%offset%" for tag "%tag%" in directory"#
            }
            ErrorKind::InvalidDirectory => {
                r#"Directory entry for tag "%tag%" runs past the end of the record"#
            }
            ErrorKind::FieldEof => {
                r#"Field for tag "%tag%" does not end with an end of field character"#
            }
            ErrorKind::InvalidIndicators => {
                r#"Invalid indicators "%indicators%" forced to blanks for tag "%tag%""#
            }
            ErrorKind::EmptySubfield => r#"No subfield data found in tag "%tag%""#,
            ErrorKind::InvalidIndicatorRequest => {
                r#"Attempt to access indicator "%indicator%" failed; 1 and 2 are the only valid indicators"#
            }
            ErrorKind::InsertFieldMode => r#"insert_field() mode "%mode%" was not recognized"#,
            ErrorKind::InvalidField => r#"Field "%tag%" is not a member of this record"#,
            ErrorKind::InvalidSubfield => {
                r#"Subfield "%code%" is not a member of field "%tag%""#
            }
            ErrorKind::InsertSubfieldMode => {
                r#"insert_subfield() mode "%mode%" was not recognized"#
            }
            ErrorKind::IncorrectLength => {
                r#"Invalid record length: Leader says "%record_length%" bytes; actual record length is "%actual%""#
            }
            ErrorKind::MissingLength => "Couldn't find record length",
            ErrorKind::NonnumericLength => r#"Record length "%record_length%" is not numeric"#,
            ErrorKind::InvalidTag => r#"Tag "%tag%" is not a valid tag."#,
            ErrorKind::InvalidIndicator => {
                r#"Illegal indicator "%indicator%" in field "%tag%" forced to blank"#
            }
            ErrorKind::LeaderTooLong => "Input leader was too long; truncated to %len% characters",
            ErrorKind::FieldTooLong => {
                r#"Field "%tag%" (%len% bytes at offset %offset%) does not fit the directory and was not written"#
            }
            ErrorKind::LeaderNotAscii => "Non-ASCII bytes in leader replaced with blanks",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            ErrorKind::InvalidFile
            | ErrorKind::InvalidSource
            | ErrorKind::InvalidTerminator
            | ErrorKind::InvalidTag
            | ErrorKind::InvalidIndicator => Severity::Fatal,
            ErrorKind::InvalidIndicatorRequest
            | ErrorKind::InsertFieldMode
            | ErrorKind::InvalidField
            | ErrorKind::InvalidSubfield
            | ErrorKind::InsertSubfieldMode => Severity::Usage,
            _ => Severity::Recoverable,
        }
    }
}

/// Fills a kind's template with the given `(placeholder, value)` pairs.
///
/// Placeholders without a value are left verbatim.
///
/// ```
/// use marc21::{format_error, ErrorKind};
///
/// assert_eq!(
///     format_error(ErrorKind::InvalidDirectoryTag, &[("tag", "24x")]),
///     r#"Invalid tag "24x" in directory"#,
/// );
/// ```
pub fn format_error(kind: ErrorKind, values: &[(&str, &str)]) -> String {
    let mut message = kind.template().to_string();
    for (token, value) in values {
        message = message.replace(&format!("%{token}%"), value);
    }
    message
}

/// A failure that aborts the current call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MarcError {
    kind: ErrorKind,
    message: String,
}

impl MarcError {
    pub fn new(kind: ErrorKind, values: &[(&str, &str)]) -> Self {
        Self {
            kind,
            message: format_error(kind, values),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A recoverable anomaly recorded on a record's warning log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    kind: ErrorKind,
    message: String,
}

impl Warning {
    pub fn new(kind: ErrorKind, values: &[(&str, &str)]) -> Self {
        Self {
            kind,
            message: format_error(kind, values),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A field that failed to construct during decode is downgraded to a warning.
impl From<MarcError> for Warning {
    fn from(err: MarcError) -> Self {
        Self {
            kind: err.kind,
            message: err.message,
        }
    }
}

pub type Result<T, E = MarcError> = std::result::Result<T, E>;
