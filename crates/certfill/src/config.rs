//! Loading configuration and records from JSON.
//!
//! Every loader comes in two forms: `load_*` reads a file, `*_from_str`
//! parses text already in memory. Both report JSON errors with line and
//! column, and validate what they load before returning it.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::address::JurisdictionTable;
use crate::error::{ConfigurationError, LoadError};
use crate::fees::{FeeSchedule, FeeScheduleConfig};
use crate::template::TemplateDefinition;
use crate::types::Record;

/// Load a template definition and check its address clauses.
pub fn load_template(path: impl AsRef<Path>) -> Result<TemplateDefinition, LoadError> {
    let path = path.as_ref();
    template_internal(&read(path)?, Some(path))
}

/// Parse a template definition from JSON text.
pub fn template_from_str(content: &str) -> Result<TemplateDefinition, LoadError> {
    template_internal(content, None)
}

/// Load a fee schedule and check that its price tables partition `[0, ∞)`.
pub fn load_fee_schedule(path: impl AsRef<Path>) -> Result<FeeSchedule, LoadError> {
    let path = path.as_ref();
    fee_schedule_internal(&read(path)?, Some(path))
}

/// Parse a fee schedule from JSON text.
pub fn fee_schedule_from_str(content: &str) -> Result<FeeSchedule, LoadError> {
    fee_schedule_internal(content, None)
}

/// Load a jurisdiction table from a JSON list of locations.
pub fn load_jurisdictions(path: impl AsRef<Path>) -> Result<JurisdictionTable, LoadError> {
    let path = path.as_ref();
    parse(&read(path)?, Some(path))
}

/// Parse a jurisdiction table from JSON text.
pub fn jurisdictions_from_str(content: &str) -> Result<JurisdictionTable, LoadError> {
    parse(content, None)
}

/// Load a record from a JSON file.
pub fn load_record(path: impl AsRef<Path>) -> Result<Record, LoadError> {
    let path = path.as_ref();
    parse(&read(path)?, Some(path))
}

/// Parse a record from JSON text.
pub fn record_from_str(content: &str) -> Result<Record, LoadError> {
    parse(content, None)
}

fn template_internal(content: &str, path: Option<&Path>) -> Result<TemplateDefinition, LoadError> {
    let definition: TemplateDefinition = parse(content, path)?;
    definition.validate().map_err(|e| invalid(path, e))?;
    Ok(definition)
}

fn fee_schedule_internal(content: &str, path: Option<&Path>) -> Result<FeeSchedule, LoadError> {
    let config: FeeScheduleConfig = parse(content, path)?;
    config.validate().map_err(|e| invalid(path, e))
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse<T: DeserializeOwned>(content: &str, path: Option<&Path>) -> Result<T, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse {
        path: path.map(Path::to_path_buf).unwrap_or_default(),
        line: e.line(),
        column: e.column(),
        message: strip_position(&e.to_string()),
    })
}

fn invalid(path: Option<&Path>, source: ConfigurationError) -> LoadError {
    LoadError::Invalid {
        path: path.map(Path::to_path_buf).unwrap_or_default(),
        source,
    }
}

/// serde_json appends " at line L column C"; the position is reported separately.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}
