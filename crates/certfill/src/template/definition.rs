//! Template definitions as loaded from configuration.

use std::collections::{BTreeMap, BTreeSet};

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::validate_conditional_keys;
use crate::error::ConfigurationError;
use crate::parser::parse_template;
use crate::transform::{Operation, TransformerRule};

/// The render target of a template.
///
/// Serialized as `{ "markup": "<svg>...</svg>" }` or `{ "document": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateBody {
    /// Markup text with `{field}` placeholders.
    Markup(String),
    /// A document-object tree whose string leaves may contain placeholders.
    Document(Value),
}

/// Font files for one language, in the renderer's four styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    pub normal: String,
    #[serde(default)]
    pub bold: Option<String>,
    #[serde(default)]
    pub italics: Option<String>,
    #[serde(default)]
    pub bolditalics: Option<String>,
}

/// A certificate template with the rules that fill it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct TemplateDefinition {
    /// Template identifier, e.g. "birth-certificate".
    #[serde(default)]
    #[builder(default)]
    pub id: String,

    pub body: TemplateBody,

    /// Rules run in order to produce the field map.
    #[serde(default)]
    #[builder(default)]
    pub rules: Vec<TransformerRule>,

    /// Fonts keyed by language.
    #[serde(default)]
    #[builder(default)]
    pub fonts: BTreeMap<String, FontFamily>,

    /// Fields supplied outside the rules (e.g. the fee) that may be absent.
    #[serde(default)]
    #[builder(default)]
    pub optional_fields: Vec<String>,
}

impl TemplateDefinition {
    /// Field names the template declares: rule outputs and optional fields.
    pub fn declared_fields(&self) -> BTreeSet<&str> {
        self.rules
            .iter()
            .map(|rule| rule.output_field.as_str())
            .chain(self.optional_fields.iter().map(String::as_str))
            .collect()
    }

    /// Every placeholder name referenced by the body.
    pub fn placeholders(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        match &self.body {
            TemplateBody::Markup(text) => collect_placeholders(text, &mut names),
            TemplateBody::Document(tree) => collect_tree_placeholders(tree, &mut names),
        }
        names
    }

    /// Check rule configuration that can be verified without a record.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DefaultNotLast`] when an address rule has
    /// a default clause before other clauses.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.rules.iter().try_for_each(|rule| match &rule.operation {
            Operation::OfflineAddress(params) => {
                validate_conditional_keys(&rule.output_field, &params.conditional_keys)
            }
            _ => Ok(()),
        })
    }
}

fn collect_placeholders(text: &str, names: &mut BTreeSet<String>) {
    names.extend(parse_template(text).placeholders().map(str::to_string));
}

fn collect_tree_placeholders(value: &Value, names: &mut BTreeSet<String>) {
    match value {
        Value::String(text) => collect_placeholders(text, names),
        Value::Array(items) => {
            for item in items {
                collect_tree_placeholders(item, names);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_tree_placeholders(item, names);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
