//! Placeholder substitution into markup and document templates.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};
use strsim::levenshtein;
use tracing::warn;

use crate::error::CompileIntegrityError;
use crate::parser::{Segment, parse_template};
use crate::template::definition::{FontFamily, TemplateBody, TemplateDefinition};
use crate::types::FieldMap;

/// A compiled template body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderedBody {
    Markup(String),
    Document(Value),
}

/// Output handed to the external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableTemplate {
    pub id: String,
    pub body: RenderedBody,
    pub fonts: BTreeMap<String, FontFamily>,
}

impl RenderableTemplate {
    /// The markup text, if this is a markup template.
    pub fn as_markup(&self) -> Option<&str> {
        match &self.body {
            RenderedBody::Markup(text) => Some(text),
            RenderedBody::Document(_) => None,
        }
    }

    /// The document tree, if this is a document template.
    pub fn as_document(&self) -> Option<&Value> {
        match &self.body {
            RenderedBody::Document(tree) => Some(tree),
            RenderedBody::Markup(_) => None,
        }
    }
}

/// Merge `fields` into `template`.
///
/// Every `{name}` is replaced by its field value. A name missing from
/// `fields` renders as `""` when the template declares it (as a rule output
/// or optional field). Substituted values are not scanned again, and all text
/// around placeholders is kept byte for byte. Document templates keep their
/// structure; only string leaves change.
///
/// # Errors
///
/// Returns [`CompileIntegrityError::UnresolvedPlaceholders`] listing every
/// placeholder that is neither in `fields` nor declared.
///
/// # Example
///
/// ```
/// use certfill::{FieldMap, TemplateBody, TemplateDefinition, compile};
///
/// let template = TemplateDefinition::builder()
///     .body(TemplateBody::Markup("Name: {childName}".to_string()))
///     .build();
/// let fields = FieldMap::new().with("childName", "JANE DOE");
///
/// let rendered = compile(&template, &fields).unwrap();
/// assert_eq!(rendered.as_markup(), Some("Name: JANE DOE"));
/// ```
pub fn compile(
    template: &TemplateDefinition,
    fields: &FieldMap,
) -> Result<RenderableTemplate, CompileIntegrityError> {
    let mut substituter = Substituter {
        fields,
        declared: template.declared_fields(),
        unresolved: BTreeSet::new(),
    };

    let body = match &template.body {
        TemplateBody::Markup(text) => RenderedBody::Markup(substituter.fill(text)),
        TemplateBody::Document(tree) => RenderedBody::Document(substituter.fill_tree(tree)),
    };

    if !substituter.unresolved.is_empty() {
        let known: Vec<String> = fields
            .names()
            .chain(substituter.declared.iter().copied())
            .map(str::to_string)
            .collect();
        let names: Vec<String> = substituter.unresolved.into_iter().collect();
        let suggestions: BTreeSet<String> = names
            .iter()
            .flat_map(|name| compute_suggestions(name, known.iter()))
            .collect();
        warn!(template = %template.id, unresolved = ?names, "template has unresolved placeholders");
        return Err(CompileIntegrityError::UnresolvedPlaceholders {
            names,
            suggestions: suggestions.into_iter().collect(),
        });
    }

    Ok(RenderableTemplate {
        id: template.id.clone(),
        body,
        fonts: template.fonts.clone(),
    })
}

/// Typo suggestions for `name` among `available` (edit distance 1 for short
/// names, 2 otherwise; at most three, closest first).
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl Iterator<Item = &'a String>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort();
    suggestions.dedup();
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}

struct Substituter<'a> {
    fields: &'a FieldMap,
    declared: BTreeSet<&'a str>,
    unresolved: BTreeSet<String>,
}

impl Substituter<'_> {
    fn fill(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        for segment in parse_template(text).segments {
            match segment {
                Segment::Literal(literal) => output.push_str(&literal),
                Segment::Placeholder(name) => {
                    if let Some(value) = self.fields.get(&name) {
                        output.push_str(value);
                    } else if !self.declared.contains(name.as_str()) {
                        self.unresolved.insert(name);
                    }
                }
            }
        }
        output
    }

    fn fill_tree(&mut self, value: &Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.fill(text)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.fill_tree(item)).collect())
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), self.fill_tree(item)))
                    .collect::<Map<String, Value>>(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }
}
