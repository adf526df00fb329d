//! Declarative transformer rules.

use std::collections::BTreeMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::address::ConditionalAddressKey;
use crate::format::DigitMap;

/// One instruction mapping a record value to one output field.
///
/// Serialized as:
///
/// ```json
/// { "outputField": "eventDate", "operation": "DateFieldValue",
///   "parameters": { "key": "child.birthDate", "format": "DD/MM/YYYY" } }
/// ```
///
/// `valueIndex`, when present, keeps only the character at that position of
/// the computed value (empty when out of range).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerRule {
    pub output_field: String,
    #[serde(flatten)]
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_index: Option<usize>,
}

impl TransformerRule {
    /// Create a rule writing the full computed value to `output_field`.
    pub fn new(output_field: impl Into<String>, operation: impl Into<Operation>) -> Self {
        Self {
            output_field: output_field.into(),
            operation: operation.into(),
            value_index: None,
        }
    }

    /// Keep only the character at `index` of the computed value.
    #[must_use]
    pub fn at_index(mut self, index: usize) -> Self {
        self.value_index = Some(index);
        self
    }
}

/// The closed set of rule operations, each with its own parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "parameters")]
pub enum Operation {
    /// Direct lookup of a dotted path.
    FieldValue(FieldValueParams),
    /// A person's identifier, only when their identifier type matches.
    IdentifierValue(IdentifierParams),
    /// A date formatted with a pattern.
    DateFieldValue(DateFieldParams),
    /// A person's full name.
    ApplicantName(ApplicantNameParams),
    /// A value with its digits transliterated.
    NumberConversion(NumberConversionParams),
    /// An address chosen by conditional clauses.
    OfflineAddress(OfflineAddressParams),
}

impl Operation {
    /// The operation name as written in template definitions.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FieldValue(_) => "FieldValue",
            Operation::IdentifierValue(_) => "IdentifierValue",
            Operation::DateFieldValue(_) => "DateFieldValue",
            Operation::ApplicantName(_) => "ApplicantName",
            Operation::NumberConversion(_) => "NumberConversion",
            Operation::OfflineAddress(_) => "OfflineAddress",
        }
    }

    /// Shorthand for a [`Operation::FieldValue`] lookup.
    pub fn field_value(key: impl Into<String>) -> Self {
        Operation::FieldValue(FieldValueParams { key: key.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValueParams {
    /// Dotted record path.
    pub key: String,
}

/// Parameters for [`Operation::IdentifierValue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct IdentifierParams {
    /// Record section of the person, e.g. "mother".
    pub section: String,
    /// Identifier type the person must have, e.g. "NATIONAL_ID".
    pub id_type_value: String,
    /// Field holding the identifier.
    #[serde(default = "default_id_field")]
    #[builder(default = default_id_field())]
    pub id_field: String,
    /// Field holding the identifier type.
    #[serde(default = "default_id_type_field")]
    #[builder(default = default_id_type_field())]
    pub type_field: String,
}

fn default_id_field() -> String {
    "iD".to_string()
}

fn default_id_type_field() -> String {
    "iDType".to_string()
}

/// Parameters for [`Operation::DateFieldValue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct DateFieldParams {
    /// Dotted record path of the date.
    pub key: String,
    /// Output pattern, e.g. "DD/MM/YYYY".
    pub format: String,
    /// Convert the formatted digits through the locale digit map.
    #[serde(default)]
    #[builder(default)]
    pub convert_digits: bool,
}

/// Parameters for [`Operation::ApplicantName`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct ApplicantNameParams {
    /// Record section of the person, e.g. "child" or "father".
    pub actor: String,
    /// Uppercase the name with the locale's casing rules.
    #[serde(default)]
    #[builder(default)]
    pub upper_case: bool,
    /// Name fields per language tag or primary subtag.
    #[serde(default)]
    #[builder(default)]
    pub formats: BTreeMap<String, NameFormat>,
}

/// Which name fields to read for a language and in which order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameFormat {
    pub first_names: String,
    pub family_name: String,
    #[serde(default)]
    pub family_name_first: bool,
}

impl NameFormat {
    /// The built-in fields: `*Eng` fields for English, plain fields otherwise.
    pub fn default_for(language: &str) -> Self {
        let (first_names, family_name) = if language == "en" {
            ("firstNamesEng", "familyNameEng")
        } else {
            ("firstNames", "familyName")
        };
        Self {
            first_names: first_names.to_string(),
            family_name: family_name.to_string(),
            family_name_first: false,
        }
    }
}

/// Parameters for [`Operation::NumberConversion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberConversionParams {
    /// Dotted record path of the value.
    pub key: String,
    /// Digit map overriding the locale's.
    #[serde(default)]
    pub digits: Option<DigitMap>,
}

/// Parameters for [`Operation::OfflineAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineAddressParams {
    pub conditional_keys: Vec<ConditionalAddressKey>,
}

impl From<FieldValueParams> for Operation {
    fn from(params: FieldValueParams) -> Self {
        Operation::FieldValue(params)
    }
}

impl From<IdentifierParams> for Operation {
    fn from(params: IdentifierParams) -> Self {
        Operation::IdentifierValue(params)
    }
}

impl From<DateFieldParams> for Operation {
    fn from(params: DateFieldParams) -> Self {
        Operation::DateFieldValue(params)
    }
}

impl From<ApplicantNameParams> for Operation {
    fn from(params: ApplicantNameParams) -> Self {
        Operation::ApplicantName(params)
    }
}

impl From<NumberConversionParams> for Operation {
    fn from(params: NumberConversionParams) -> Self {
        Operation::NumberConversion(params)
    }
}

impl From<OfflineAddressParams> for Operation {
    fn from(params: OfflineAddressParams) -> Self {
        Operation::OfflineAddress(params)
    }
}
