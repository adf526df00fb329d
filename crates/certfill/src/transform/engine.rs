//! Rule execution.

use bon::Builder;
use tracing::debug;

use crate::address::{AddressResolver, JurisdictionTable};
use crate::error::ConfigurationError;
use crate::format::Locale;
use crate::transform::boxes::char_at;
use crate::transform::operations::{RuleContext, RuleError};
use crate::transform::rule::TransformerRule;
use crate::types::{FieldMap, Record};

/// Country code treated as "home" when none is configured.
pub const DEFAULT_HOME_COUNTRY: &str = "FAR";

/// Executes transformer rules against records.
///
/// The engine holds only read-only configuration, so one engine can serve any
/// number of concurrent runs.
///
/// # Example
///
/// ```
/// use certfill::{Locale, Operation, Record, TransformEngine, TransformerRule};
/// use serde_json::json;
///
/// let engine = TransformEngine::new();
/// let record = Record::new(json!({ "registration": { "number": "2024B7JXEBP" } }));
/// let rules = vec![
///     TransformerRule::new("registrationNumber", Operation::field_value("registration.number")),
///     TransformerRule::new("firstBox", Operation::field_value("registration.number")).at_index(0),
/// ];
///
/// let fields = engine.run(&record, &rules, &Locale::new()).unwrap();
/// assert_eq!(fields.get("registrationNumber"), Some("2024B7JXEBP"));
/// assert_eq!(fields.get("firstBox"), Some("2"));
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct TransformEngine {
    /// Locations used to display jurisdiction ids in addresses.
    #[builder(default)]
    jurisdictions: JurisdictionTable,

    /// Country code of the registering country.
    #[builder(default = DEFAULT_HOME_COUNTRY.to_string())]
    home_country: String,
}

impl Default for TransformEngine {
    fn default() -> Self {
        TransformEngine::builder().build()
    }
}

impl TransformEngine {
    /// Create an engine with no jurisdictions and the default home country.
    pub fn new() -> Self {
        Self::default()
    }

    /// The jurisdiction table.
    pub fn jurisdictions(&self) -> &JurisdictionTable {
        &self.jurisdictions
    }

    /// The home country code.
    pub fn home_country(&self) -> &str {
        &self.home_country
    }

    /// Run `rules` in order against `record`, producing a fresh field map.
    ///
    /// Later rules overwrite earlier ones writing the same output field. A rule
    /// that cannot resolve its value writes the empty string and the run
    /// continues.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when an address rule has no matching
    /// clause and no default clause.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(rules = rules.len(), language = locale.language())
    )]
    pub fn run(
        &self,
        record: &Record,
        rules: &[TransformerRule],
        locale: &Locale,
    ) -> Result<FieldMap, ConfigurationError> {
        let ctx = RuleContext {
            record,
            locale,
            resolver: AddressResolver::new(&self.jurisdictions, &self.home_country),
        };
        rules
            .iter()
            .enumerate()
            .try_fold(FieldMap::new(), |fields, (position, rule)| {
                let value = evaluate(rule, position, &ctx)?;
                Ok(fields.with(rule.output_field.as_str(), value))
            })
    }
}

/// Compute the final string for one rule.
fn evaluate(
    rule: &TransformerRule,
    position: usize,
    ctx: &RuleContext<'_>,
) -> Result<String, ConfigurationError> {
    let computed = match rule.operation.compute(&rule.output_field, ctx) {
        Ok(field) => field.to_display_string(),
        Err(RuleError::Field(error)) => {
            debug!(
                field = %rule.output_field,
                position,
                operation = rule.operation.name(),
                %error,
                "field left blank"
            );
            String::new()
        }
        Err(RuleError::Configuration(error)) => return Err(error),
    };
    Ok(match rule.value_index {
        Some(index) => char_at(&computed, index),
        None => computed,
    })
}
