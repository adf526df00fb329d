//! Conditional address resolution.
//!
//! An address rule carries an ordered list of [`ConditionalAddressKey`]s. The
//! first clause whose condition holds supplies the address templates, which
//! are filled from the record with `{dotted.path}` placeholders. Only the
//! paths a clause lists in `locationKeys` are looked up as location ids.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::JurisdictionTable;
use crate::error::ConfigurationError;
use crate::format::Locale;
use crate::parser::{Segment, parse_template};
use crate::types::{Field, Record, scalar_text};

/// When a conditional address clause applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressCondition {
    /// Applies when the record value at `key` is one of `match_values`.
    Match {
        key: String,
        #[serde(rename = "matchValues")]
        match_values: Vec<String>,
    },
    /// The catch-all clause: `{ "default": true }`.
    Default { default: bool },
}

impl AddressCondition {
    /// Whether this is the catch-all clause.
    pub fn is_default(&self) -> bool {
        matches!(self, AddressCondition::Default { default: true })
    }

    /// Evaluate the condition against a record.
    ///
    /// Label objects are matched on their `value`, not their display label.
    pub fn holds(&self, record: &Record) -> bool {
        match self {
            AddressCondition::Match { key, match_values } => match_text(record, key)
                .is_some_and(|found| match_values.iter().any(|candidate| *candidate == found)),
            AddressCondition::Default { default } => *default,
        }
    }
}

/// Address templates for one clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressTemplates {
    /// Record path of the country code that decides local vs. international.
    #[serde(default)]
    pub country_key: Option<String>,
    /// Template used for addresses in the home country.
    pub local_address: String,
    /// Template used when the country code is not the home country.
    #[serde(default)]
    pub international_address: Option<String>,
    /// Placeholder paths whose values are location ids, rendered as the
    /// location's display name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location_keys: Vec<String>,
}

/// One clause of a conditional address rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalAddressKey {
    pub condition: AddressCondition,
    pub addresses: AddressTemplates,
}

/// Check that a default clause, if present, is the last clause.
pub fn validate_conditional_keys(
    field: &str,
    keys: &[ConditionalAddressKey],
) -> Result<(), ConfigurationError> {
    let last = keys.len().saturating_sub(1);
    match keys
        .iter()
        .position(|key| key.condition.is_default())
        .filter(|&position| position != last)
    {
        Some(position) => Err(ConfigurationError::DefaultNotLast {
            field: field.to_string(),
            position,
        }),
        None => Ok(()),
    }
}

/// Resolves conditional address clauses against a record.
#[derive(Debug, Clone, Copy)]
pub struct AddressResolver<'a> {
    jurisdictions: &'a JurisdictionTable,
    home_country: &'a str,
}

impl<'a> AddressResolver<'a> {
    /// Create a resolver over a jurisdiction table for the given home country code.
    pub fn new(jurisdictions: &'a JurisdictionTable, home_country: &'a str) -> Self {
        Self {
            jurisdictions,
            home_country,
        }
    }

    /// Resolve the address for `field` from the first matching clause.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoMatchingCondition`] when no clause
    /// matches. A missing default clause is a template defect, not a data gap.
    pub fn resolve(
        &self,
        field: &str,
        keys: &[ConditionalAddressKey],
        record: &Record,
        locale: &Locale,
    ) -> Result<String, ConfigurationError> {
        let clause = keys
            .iter()
            .find(|key| key.condition.holds(record))
            .ok_or_else(|| ConfigurationError::NoMatchingCondition {
                field: field.to_string(),
            })?;
        let template = self.select_template(&clause.addresses, record);
        Ok(self.render(template, &clause.addresses.location_keys, record, locale.language()))
    }

    /// Pick the international template for foreign addresses when one exists.
    fn select_template<'t>(&self, addresses: &'t AddressTemplates, record: &Record) -> &'t str {
        let foreign = addresses
            .country_key
            .as_deref()
            .and_then(|key| record.text(key))
            .is_some_and(|country| !country.is_empty() && country != self.home_country);
        match (&addresses.international_address, foreign) {
            (Some(international), true) => international,
            _ => &addresses.local_address,
        }
    }

    /// Fill `{dotted.path}` placeholders from the record.
    ///
    /// Values at `location_keys` paths render as the location's display name
    /// when they name a known location. Missing values render as the empty
    /// string.
    fn render(
        &self,
        template: &str,
        location_keys: &[String],
        record: &Record,
        language: &str,
    ) -> String {
        parse_template(template)
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Placeholder(path) => {
                    let is_location = location_keys.iter().any(|key| key == path);
                    self.placeholder_value(path, is_location, record, language)
                }
            })
            .collect()
    }

    fn placeholder_value(
        &self,
        path: &str,
        is_location: bool,
        record: &Record,
        language: &str,
    ) -> String {
        let value = record
            .field(path, language)
            .as_ref()
            .map(Field::to_display_string)
            .unwrap_or_default();
        if !is_location {
            return value;
        }
        let location_name = self
            .jurisdictions
            .display_name(&value, language)
            .map(str::to_string);
        location_name.unwrap_or(value)
    }
}

/// The text a condition compares: scalars as-is, label objects by `value`.
fn match_text(record: &Record, key: &str) -> Option<String> {
    match record.lookup(key)? {
        Value::Object(map) => map.get("value").and_then(scalar_text),
        other => scalar_text(other),
    }
}
