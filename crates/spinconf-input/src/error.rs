//! Input errors
//!
//! Matchers report a location-free [`Reason`]; the loader attaches the file
//! and line number and hands an [`InputError`] to the caller. Every error
//! ends the load, the [`Severity`] only records which failure path the
//! directive took.

use std::fmt;
use std::io;
use std::path::PathBuf;

use spinconf_lexer::LexError;
use spinconf_units::Dimension;
use thiserror::Error;

use crate::geometry::GeometryError;

pub type Result<T> = std::result::Result<T, InputError>;

/// How a failed directive is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The directive was not understood; the caller decides to abort.
    Recoverable,
    /// The directive was understood but its value is unusable.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Recoverable => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal error"),
        }
    }
}

/// Why a single directive was rejected.
#[derive(Debug, Error)]
pub enum Reason {
    #[error("unknown control statement '{statement}'")]
    UnknownStatement { statement: String },

    #[error(
        "value '{value}' for '{statement}' is invalid, select one of: {}",
        .choices.join(", ")
    )]
    InvalidChoice {
        statement: String,
        value: String,
        choices: Vec<&'static str>,
    },

    #[error("value '{value}' for '{statement}' must be either 'true' or 'false'")]
    InvalidBoolean { statement: String, value: String },

    #[error("value '{value}' for '{statement}' is not a valid number")]
    InvalidNumber { statement: String, value: String },

    #[error("'{statement}' must be in the range {range}, got '{value}'")]
    OutOfRange {
        statement: String,
        value: String,
        range: String,
        severity: Severity,
    },

    #[error("unit '{unit}' for '{statement}' is not recognised")]
    UnknownUnit { statement: String, unit: String },

    #[error("unit type '{found}' is invalid for parameter '{statement}', expected '{expected}'")]
    UnitMismatch {
        statement: String,
        found: Dimension,
        expected: Dimension,
    },

    #[error("empty filename in control statement '{statement}'")]
    EmptyFilename { statement: String },

    #[error("empty value in control statement '{statement}'")]
    EmptyValue { statement: String },

    #[error(transparent)]
    Index(#[from] LexError),

    #[error("cannot open file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("geometry file '{}': {source}", .path.display())]
    Geometry {
        path: PathBuf,
        #[source]
        source: GeometryError,
    },

    /// Failure inside a file loaded by this directive; it already carries
    /// its own location.
    #[error(transparent)]
    Nested(Box<InputError>),
}

impl Reason {
    pub fn severity(&self) -> Severity {
        match self {
            Reason::UnknownStatement { .. } => Severity::Recoverable,
            Reason::OutOfRange { severity, .. } => *severity,
            Reason::Nested(inner) => inner.severity(),
            _ => Severity::Fatal,
        }
    }

    /// Attach a location. Nested errors keep their own.
    pub fn at(self, file: impl Into<PathBuf>, line: usize) -> InputError {
        match self {
            Reason::Nested(inner) => *inner,
            reason => InputError {
                file: file.into(),
                line,
                reason,
            },
        }
    }
}

/// A located input error.
///
/// `line` is 1-based; 0 means the error concerns the file as a whole
/// (for example it could not be opened).
#[derive(Debug)]
pub struct InputError {
    pub file: PathBuf,
    pub line: usize,
    pub reason: Reason,
}

impl InputError {
    pub fn severity(&self) -> Severity {
        self.reason.severity()
    }

    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        InputError {
            file: path.clone(),
            line: 0,
            reason: Reason::Open { path, source },
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.file.display(), self.reason)
        } else {
            write!(f, "{}:{}: {}", self.file.display(), self.line, self.reason)
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let err = Reason::OutOfRange {
            statement: "sim:dt".into(),
            value: "2.0e-5".into(),
            range: "[1e-20, 1e-6)".into(),
            severity: Severity::Fatal,
        }
        .at("input", 12);
        assert_eq!(
            err.to_string(),
            "input:12: 'sim:dt' must be in the range [1e-20, 1e-6), got '2.0e-5'"
        );
        assert_eq!(err.severity(), Severity::Fatal);
    }

    #[test]
    fn test_unknown_statement_is_recoverable() {
        let reason = Reason::UnknownStatement {
            statement: "sim:foo".into(),
        };
        assert_eq!(reason.severity(), Severity::Recoverable);
    }

    #[test]
    fn test_nested_keeps_inner_location() {
        let inner = Reason::EmptyFilename {
            statement: "material[0]:geometry".into(),
        }
        .at("Co.mat", 3);
        let outer = Reason::Nested(Box::new(inner)).at("input", 40);
        assert_eq!(outer.file, PathBuf::from("Co.mat"));
        assert_eq!(outer.line, 3);
    }

    #[test]
    fn test_open_error_has_no_line() {
        let err = InputError::open(
            "missing.mat",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().starts_with("missing.mat: cannot open file"));
    }

    #[test]
    fn test_empty_value_is_not_a_filename() {
        let reason = Reason::EmptyValue {
            statement: "create:crystal-structure".into(),
        };
        assert_eq!(
            reason.to_string(),
            "empty value in control statement 'create:crystal-structure'"
        );
        assert_eq!(reason.severity(), Severity::Fatal);
    }

    #[test]
    fn test_choices_listed() {
        let reason = Reason::InvalidChoice {
            statement: "sim:mpi-mode".into(),
            value: "shared".into(),
            choices: vec!["geometric-decomposition", "replicated-data"],
        };
        assert_eq!(
            reason.to_string(),
            "value 'shared' for 'sim:mpi-mode' is invalid, select one of: \
             geometric-decomposition, replicated-data"
        );
    }
}
