//! Implementation of the `certfill check` command.

use std::path::{Path, PathBuf};

use certfill::config::{load_fee_schedule, load_jurisdictions, load_template};
use certfill::{lint_definition, LoadError};
use clap::ValueEnum;
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::load_report;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// What the files contain; guessed from the file name when omitted
    #[arg(long, value_enum)]
    pub kind: Option<ConfigKind>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Configuration file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    Template,
    Fees,
    Jurisdictions,
}

impl ConfigKind {
    /// Guess the kind from a file name: "fee" and "jurisdiction"/"location"
    /// select those kinds, anything else is a template.
    fn guess(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.contains("fee") {
            ConfigKind::Fees
        } else if name.contains("jurisdiction") || name.contains("location") {
            ConfigKind::Jurisdictions
        } else {
            ConfigKind::Template
        }
    }
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    kind: ConfigKind,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let kind = args.kind.unwrap_or_else(|| ConfigKind::guess(path));
        let (error, warnings) = check_file(path, kind);

        if !args.json {
            print_file_result(path, error.as_ref(), &warnings);
        }
        reports.push(FileReport {
            file: path.display().to_string(),
            kind,
            errors: error.iter().map(ToString::to_string).collect(),
            warnings,
        });
    }

    let failed = reports
        .iter()
        .filter(|r| !r.errors.is_empty() || !r.warnings.is_empty())
        .count();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        println!();
        if failed == 0 {
            println!("{} {} file(s) OK", "✓".green(), reports.len());
        } else {
            println!("{} {failed} of {} file(s) have problems", "✗".red(), reports.len());
        }
    }

    Ok(if failed == 0 {
        exitcode::OK
    } else {
        exitcode::DATAERR
    })
}

/// Load one file, returning its load error and lint warnings.
fn check_file(path: &Path, kind: ConfigKind) -> (Option<LoadError>, Vec<String>) {
    match kind {
        ConfigKind::Template => match load_template(path) {
            Ok(definition) => (
                None,
                lint_definition(&definition)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
            Err(e) => (Some(e), Vec::new()),
        },
        ConfigKind::Fees => (load_fee_schedule(path).err(), Vec::new()),
        ConfigKind::Jurisdictions => (load_jurisdictions(path).err(), Vec::new()),
    }
}

fn print_file_result(path: &Path, error: Option<&LoadError>, warnings: &[String]) {
    match error {
        Some(parse_error @ LoadError::Parse { .. }) => {
            eprintln!("{:?}", load_report(parse_error));
        }
        Some(other) => eprintln!("{} {other}", "error:".red().bold()),
        None if warnings.is_empty() => println!("{} {}", "✓".green(), path.display()),
        None => println!("{} {}", "!".yellow(), path.display()),
    }
    for warning in warnings {
        println!("  {} {warning}", "warning:".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_guessed_from_file_name() {
        assert_eq!(ConfigKind::guess(Path::new("config/fees.json")), ConfigKind::Fees);
        assert_eq!(
            ConfigKind::guess(Path::new("Jurisdictions.json")),
            ConfigKind::Jurisdictions
        );
        assert_eq!(
            ConfigKind::guess(Path::new("birth-certificate.json")),
            ConfigKind::Template
        );
    }
}
