use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FieldResolutionError;
use crate::format::primary_language;
use crate::types::Field;

/// A civil-registration record: nested sections of named values.
///
/// The record is read-only input to a transformation run. Values are addressed
/// with dotted paths such as `child.birthDate` or `mother.address.0.district`
/// (numeric segments index into lists).
///
/// # Example
///
/// ```
/// use certfill::Record;
/// use serde_json::json;
///
/// let record = Record::new(json!({ "child": { "firstNamesEng": "Jane" } }));
/// assert_eq!(record.text("child.firstNamesEng"), Some("Jane".to_string()));
/// assert_eq!(record.text("child.familyNameEng"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    data: Value,
}

impl Record {
    /// Wrap a JSON value as a record.
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// The underlying JSON value.
    pub fn as_json(&self) -> &Value {
        &self.data
    }

    /// Look up the raw value at a dotted path.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.data, |value, segment| match value {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    /// Look up a scalar value at a dotted path as text.
    ///
    /// Returns `None` for missing paths, `null`, and nested objects or lists.
    pub fn text(&self, path: &str) -> Option<String> {
        self.lookup(path).and_then(scalar_text)
    }

    /// Look up the value at a dotted path as a [`Field`].
    ///
    /// Label objects (`{"label": ..., "value": ...}`) resolve their label for
    /// `language`; lists convert element-wise.
    pub fn field(&self, path: &str, language: &str) -> Result<Field, FieldResolutionError> {
        let value = self
            .lookup(path)
            .ok_or_else(|| FieldResolutionError::MissingPath {
                path: path.to_string(),
            })?;
        to_field(value, language).ok_or_else(|| FieldResolutionError::NotScalar {
            path: path.to_string(),
        })
    }
}

impl From<Value> for Record {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

/// Render a JSON scalar as text.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn to_field(value: &Value, language: &str) -> Option<Field> {
    match value {
        Value::Null => Some(Field::empty()),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => scalar_text(value).map(Field::Text),
        Value::Array(items) => Some(Field::List(
            items
                .iter()
                .filter_map(|item| to_field(item, language))
                .collect(),
        )),
        Value::Object(map) => label_field(map, language),
    }
}

fn label_field(map: &Map<String, Value>, language: &str) -> Option<Field> {
    let label = match map.get("label")? {
        Value::Object(translations) => translations
            .get(language)
            .or_else(|| translations.get(primary_language(language)))
            .or_else(|| translations.get("en"))
            .and_then(scalar_text)
            .unwrap_or_default(),
        other => scalar_text(other).unwrap_or_default(),
    };
    let value = map.get("value").and_then(scalar_text).unwrap_or_default();
    Some(Field::Label { label, value })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lookup_indexes_into_lists() {
        let record = Record::new(json!({ "mother": { "address": [{ "district": "d1" }] } }));
        assert_eq!(
            record.text("mother.address.0.district"),
            Some("d1".to_string())
        );
        assert_eq!(record.text("mother.address.1.district"), None);
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        let record = Record::new(json!({ "registration": { "count": 3 } }));
        assert_eq!(record.text("registration.count"), Some("3".to_string()));
    }

    #[test]
    fn label_objects_resolve_per_language() {
        let record = Record::new(json!({
            "child": {
                "placeOfBirth": {
                    "label": { "en": "Health institution", "bn": "স্বাস্থ্য প্রতিষ্ঠান" },
                    "value": "HEALTH_FACILITY"
                }
            }
        }));
        let field = record.field("child.placeOfBirth", "bn").unwrap();
        assert_eq!(field.to_display_string(), "স্বাস্থ্য প্রতিষ্ঠান");
        let field = record.field("child.placeOfBirth", "fr").unwrap();
        assert_eq!(field.to_display_string(), "Health institution");
    }

    #[test]
    fn plain_objects_are_not_displayable() {
        let record = Record::new(json!({ "child": { "name": { "first": "A" } } }));
        assert_eq!(
            record.field("child.name", "en"),
            Err(FieldResolutionError::NotScalar {
                path: "child.name".to_string()
            })
        );
    }
}
