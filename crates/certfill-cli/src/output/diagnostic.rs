//! Miette diagnostic wrapper for configuration load errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;
use std::path::Path;

use certfill::LoadError;
use miette::{miette, Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for JSON configuration errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid configuration: {message}")]
#[diagnostic(code(certfill::config))]
pub struct ConfigDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl ConfigDiagnostic {
    /// Create a diagnostic pointing at `line:column` of `content`.
    pub fn at(path: &Path, content: &str, line: usize, column: usize, message: &str) -> Self {
        // Sum of (line_length + 1) for lines before the error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        ConfigDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: message.to_string(),
            help: help_for(message),
        }
    }
}

fn help_for(message: &str) -> Option<String> {
    if message.contains("unknown variant") {
        Some(
            "operations are FieldValue, IdentifierValue, DateFieldValue, ApplicantName, \
             NumberConversion and OfflineAddress"
                .to_string(),
        )
    } else if message.contains("did not match any variant") {
        Some(
            "fee tables need either \"ranges\" or \
             freePeriod/chargeUpLimit/lowestCharge/highestCharge"
                .to_string(),
        )
    } else {
        None
    }
}

/// Turn a load error into a report, with source context for parse errors.
pub fn load_report(err: &LoadError) -> Report {
    match err {
        LoadError::Parse {
            path,
            line,
            column,
            message,
        } => match read_to_string(path) {
            Ok(content) => ConfigDiagnostic::at(path, &content, *line, *column, message).into(),
            Err(_) => miette!("{}:{line}:{column}: {message}", path.display()),
        },
        other => miette!("{other}"),
    }
}
