//! # Diagnostics
//!
//! The unified, `miette`-based error type for vecalc. Every failure produced by
//! the CSV reader, the record interpreter, the test runner, the geometry
//! functions, the configuration loader or the interactive menu is a
//! [`CalcError`].
//!
//! Errors fall into two families:
//!
//! - **File-level** errors (`FileOpen`, `EmptyFile`, `Read`) abort a test run and
//!   are propagated to the caller.
//! - **Record-level** errors (`LineTooLong`, `FieldCount`, `NumericParse`,
//!   `ToleranceMismatch`) belong to a single CSV row. The test runner absorbs
//!   them into the [`TestReport`](crate::harness::TestReport) and keeps going.
//!
//! Use [`CalcError::error_type`] instead of matching on display strings.

use std::io;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Type-safe error classification corresponding to `CalcError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// The input file could not be opened or read, or has no header.
    File,
    /// A single CSV record is malformed or its result is out of tolerance.
    Record,
    /// A geometric operation has no defined result for its operands.
    Geometry,
    /// User-supplied operands are invalid (wrong count, not numbers).
    Input,
    /// The configuration file is unreadable or malformed.
    Config,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::File => "File",
            ErrorType::Record => "Record",
            ErrorType::Geometry => "Geometry",
            ErrorType::Input => "Input",
            ErrorType::Config => "Config",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Unified error type for every vecalc failure mode.
#[derive(Debug, Error, Diagnostic)]
pub enum CalcError {
    #[error("could not open '{path}'")]
    #[diagnostic(
        code(vecalc::file::open),
        help("check that the file exists, that the path is correct, and that you have read permission")
    )]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("'{path}' is empty or has no header line")]
    #[diagnostic(
        code(vecalc::file::empty),
        help("the first line of a test file is a header and is always skipped")
    )]
    EmptyFile { path: String },

    #[error("failed to read '{path}' after line {line}")]
    #[diagnostic(code(vecalc::file::read))]
    Read {
        path: String,
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line is longer than the {limit}-byte limit")]
    #[diagnostic(
        code(vecalc::record::line_too_long),
        help("raise `max_line_length` in the configuration file if this row is intentional")
    )]
    LineTooLong { line: usize, limit: usize },

    #[error("expected {expected} fields, found {actual}")]
    #[diagnostic(code(vecalc::record::field_count))]
    FieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("field {field_index} is not a finite number: '{raw_value}'")]
    #[diagnostic(code(vecalc::record::numeric_parse))]
    NumericParse {
        line: usize,
        field_index: usize,
        raw_value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a number here")]
        span: SourceSpan,
    },

    #[error("expected {expected} got {actual}")]
    #[diagnostic(code(vecalc::record::tolerance_mismatch))]
    ToleranceMismatch {
        line: usize,
        expected: String,
        actual: String,
    },

    #[error("cannot normalize the zero vector")]
    #[diagnostic(code(vecalc::geometry::zero_vector))]
    ZeroVector,

    #[error("shape vectors are coplanar (volume {volume:?})")]
    #[diagnostic(
        code(vecalc::geometry::degenerate_shape),
        help("the three shape vectors must span a parallelepiped with non-zero volume")
    )]
    DegenerateShape { volume: f64 },

    #[error("invalid input: {message}")]
    #[diagnostic(code(vecalc::input))]
    InvalidInput { message: String },

    #[error("invalid configuration '{path}': {message}")]
    #[diagnostic(code(vecalc::config))]
    Config { path: String, message: String },
}

impl CalcError {
    /// Returns the type-safe classification for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            CalcError::FileOpen { .. } | CalcError::EmptyFile { .. } | CalcError::Read { .. } => {
                ErrorType::File
            }
            CalcError::LineTooLong { .. }
            | CalcError::FieldCount { .. }
            | CalcError::NumericParse { .. }
            | CalcError::ToleranceMismatch { .. } => ErrorType::Record,
            CalcError::ZeroVector | CalcError::DegenerateShape { .. } => ErrorType::Geometry,
            CalcError::InvalidInput { .. } => ErrorType::Input,
            CalcError::Config { .. } => ErrorType::Config,
        }
    }

    /// Record-level errors are recovered by the test runner and never abort a run.
    pub fn is_record_level(&self) -> bool {
        self.error_type() == ErrorType::Record
    }

    /// The 1-based CSV line this error is attributed to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CalcError::Read { line, .. }
            | CalcError::LineTooLong { line, .. }
            | CalcError::FieldCount { line, .. }
            | CalcError::NumericParse { line, .. }
            | CalcError::ToleranceMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            message: message.into(),
        }
    }
}

/// Builds the named source for a single CSV line, used to label a bad field.
pub fn line_source(file: &str, line: usize, text: &str) -> NamedSource<String> {
    NamedSource::new(format!("{file}:{line}"), text.to_string())
}

#[cfg(test)]
mod tests {
    use miette::Report;

    use super::*;

    #[test]
    fn classification_separates_file_and_record_errors() {
        let empty = CalcError::EmptyFile {
            path: "cases.csv".to_string(),
        };
        assert_eq!(empty.error_type(), ErrorType::File);
        assert!(!empty.is_record_level());

        let arity = CalcError::FieldCount {
            line: 3,
            expected: 7,
            actual: 6,
        };
        assert_eq!(arity.error_type(), ErrorType::Record);
        assert!(arity.is_record_level());
        assert_eq!(arity.line(), Some(3));
    }

    #[test]
    fn tolerance_mismatch_reads_expected_then_actual() {
        let err = CalcError::ToleranceMismatch {
            line: 2,
            expected: "5.0".to_string(),
            actual: "0.0".to_string(),
        };
        assert_eq!(err.to_string(), "expected 5.0 got 0.0");
    }

    #[test]
    fn numeric_parse_report_labels_the_field() {
        let text = "1,0,abc,0,1,0,0";
        let err = CalcError::NumericParse {
            line: 4,
            field_index: 2,
            raw_value: "abc".to_string(),
            src: line_source("cases.csv", 4, text),
            span: (4, 3).into(),
        };
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("expected a number here"));
        assert!(output.contains("abc"));
    }

    #[test]
    fn file_open_report_carries_help() {
        let err = CalcError::FileOpen {
            path: "missing.csv".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("missing.csv"));
        assert!(output.contains("read permission"));
    }
}
