//! Error types for loading event records and normalizing timestamps.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning an input document into calendar events.
///
/// Serialization itself never fails; every variant here is raised while
/// reading or validating input.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input text was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not an event object or array of them.
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// A required field is absent (or, for `summary`, empty).
    /// `index` is the 0-based position of the record in the input.
    #[error("Event {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A known field holds a JSON value of the wrong type.
    #[error("Event {index}: field '{field}' must be {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    /// A timestamp could not be parsed and the strict policy is active.
    #[error("Event {index}: malformed '{field}': {source}")]
    Timestamp {
        index: usize,
        field: &'static str,
        #[source]
        source: TimestampError,
    },

    /// Reading the input file failed.
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a timestamp string could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Fewer characters than the selected mode needs (after stripping `-` and `:`).
    #[error("'{input}' has {len} digits, {required} required")]
    TooShort {
        input: String,
        len: usize,
        required: usize,
    },

    /// A character inside a numeric group is not an ASCII digit.
    #[error("'{input}' has a non-digit at position {position}")]
    NonDigit { input: String, position: usize },
}

/// Convenience alias used throughout json2ical-core.
pub type Result<T> = std::result::Result<T, ConvertError>;
