//! Error types for certificate field transformation.
//!
//! Errors fall into three tiers with different propagation rules:
//!
//! - [`FieldResolutionError`]: a single rule could not produce a value. The
//!   engine absorbs these and writes an empty string for the field.
//! - [`ConfigurationError`]: a template, address clause list or price table is
//!   malformed. These always propagate to the caller.
//! - [`CompileIntegrityError`]: compilation left a placeholder unresolved. The
//!   half-filled output is never returned.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A date value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The value is not a recognized date or timestamp.
    #[error("'{value}' is not a valid date")]
    InvalidDate { value: String },

    /// The clock value is too far from the date to count the days between.
    #[error("clock value {now_ms} is out of range for date '{value}'")]
    ClockOutOfRange { value: String, now_ms: i64 },
}

/// A single transformer rule failed to compute a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldResolutionError {
    /// The dotted path does not exist in the record.
    #[error("no value at '{path}'")]
    MissingPath { path: String },

    /// The value at the path is a nested object that has no display form.
    #[error("value at '{path}' is not displayable")]
    NotScalar { path: String },

    /// The person's identifier type does not match the required type.
    #[error("identifier type '{found}' does not match required '{expected}'")]
    IdentifierTypeMismatch { expected: String, found: String },

    /// A date could not be formatted.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Broken configuration: template rules, address clauses or fee tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No conditional address clause matched and no default clause exists.
    #[error("no address condition matched for field '{field}' and no default clause is defined")]
    NoMatchingCondition { field: String },

    /// A default address clause is followed by further clauses.
    #[error(
        "default address clause for field '{field}' is at position {position} but must be last"
    )]
    DefaultNotLast { field: String, position: usize },

    /// An event has no price ranges at all.
    #[error("price table for {event} is empty")]
    EmptyPriceTable { event: String },

    /// The first price range does not start at day zero.
    #[error("price table for {event} starts at day {start}, expected 0")]
    PriceTableStart { event: String, start: u32 },

    /// Consecutive price ranges leave a gap or overlap.
    #[error("price range {index} for {event} starts at day {found}, expected {expected}")]
    PriceRangeGap {
        event: String,
        index: usize,
        expected: u32,
        found: u32,
    },

    /// A price range ends before it starts.
    #[error("price range {index} for {event} ends at day {end} before its start {start}")]
    InvertedPriceRange {
        event: String,
        index: usize,
        start: u32,
        end: u32,
    },

    /// A closed price range ends on the last representable day, so no range
    /// can follow it.
    #[error("price range {index} for {event} ends at day {end} and cannot be followed")]
    PriceRangeOverflow {
        event: String,
        index: usize,
        end: u32,
    },

    /// A price range charges a negative or non-finite fee.
    #[error("price range {index} for {event} has invalid fee {value}")]
    InvalidPrice {
        event: String,
        index: usize,
        value: String,
    },

    /// An open-ended price range is followed by further ranges.
    #[error("open-ended price range {index} for {event} must be last")]
    OpenRangeNotLast { event: String, index: usize },

    /// The last price range has an end, leaving later days uncovered.
    #[error("price table for {event} does not end with an open-ended range")]
    MissingOpenRange { event: String },
}

/// Compiled output still references fields with no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileIntegrityError {
    /// Placeholders that are neither in the field map nor declared by the template.
    #[error(
        "unresolved placeholders: {}{}",
        names.join(", "),
        format_suggestions(suggestions)
    )]
    UnresolvedPlaceholders {
        names: Vec<String>,
        suggestions: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Errors raised while composing a certificate end to end.
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("certificate template misconfigured: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("certificate could not be compiled: {0}")]
    Compile(#[from] CompileIntegrityError),
}

/// Errors that occur while loading configuration files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a configuration file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON syntax or shape error with location context.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The file parsed but describes an invalid configuration.
    #[error("{path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigurationError,
    },
}
